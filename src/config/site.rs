//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable selecting the execution mode
pub const MODE_ENV: &str = "POSTDEX_ENV";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // Directory
    pub posts_dir: String,
    pub about_file: String,
    pub public_dir: String,

    // Listing
    pub per_page: usize,
    #[serde(default)]
    pub preview: PreviewConfig,
    pub words_per_minute: usize,

    // Rendering
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub math: MathConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            author: "John Doe".to_string(),

            posts_dir: "posts".to_string(),
            about_file: "about.md".to_string(),
            public_dir: "public".to_string(),

            per_page: 10,
            preview: PreviewConfig::default(),
            words_per_minute: 240,

            highlight: HighlightConfig::default(),
            math: MathConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            anyhow::bail!("per_page must be at least 1");
        }
        if self.words_per_minute == 0 {
            anyhow::bail!("words_per_minute must be at least 1");
        }
        Ok(())
    }
}

/// Preview lengths, in characters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Used by the full post listing and tag listings
    pub list_length: usize,
    /// Used by the paginated post history
    pub page_length: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            list_length: 100,
            page_length: 250,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Math rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MathConfig {
    pub enable: bool,
}

impl Default for MathConfig {
    fn default() -> Self {
        Self { enable: true }
    }
}

/// Execution mode. Development mode re-reads content on every access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Production,
    Development,
}

impl Mode {
    /// Read the mode from `POSTDEX_ENV`
    pub fn from_env() -> Self {
        std::env::var(MODE_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Mode::Development,
            _ => Mode::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == Mode::Development
    }
}
