//! postdex: markdown post index for a personal blog
//!
//! Reads a directory of markdown posts with YAML front-matter, renders math,
//! markdown and highlighted code to HTML, and exposes the route data a
//! presentation layer needs (listings, pagination, single posts with
//! neighbours, tags) as static JSON or over HTTP.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod index;
pub mod routes;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::ContentError;

/// The blog site rooted at a directory
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the posts
    pub posts_dir: PathBuf,
    /// The about page document
    pub about_path: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Production or development
    pub mode: config::Mode,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P, mode: config::Mode) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let about_path = base_dir.join(&config.about_file);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            about_path,
            public_dir,
            mode,
        })
    }

    /// A loader rendering with this site's settings
    pub fn loader(&self) -> Result<content::PostLoader> {
        let renderer = content::Renderer::from_config(&self.config)?;
        Ok(content::PostLoader::new(&self.posts_dir, renderer))
    }

    /// A post cache honouring this site's mode
    pub fn cache(&self) -> Result<cache::PostCache> {
        Ok(cache::PostCache::new(self.loader()?, self.mode))
    }

    /// Load posts and write all route data
    pub async fn build(&self) -> Result<usize> {
        commands::build::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
