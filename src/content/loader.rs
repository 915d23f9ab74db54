//! Content loader - reads posts and the about page from disk

use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post, Renderer};
use crate::error::{ContentError, Result};
use crate::routes::About;

/// Loads and renders content files
pub struct PostLoader {
    posts_dir: PathBuf,
    renderer: Renderer,
}

impl PostLoader {
    /// Create a new content loader
    pub fn new(posts_dir: impl Into<PathBuf>, renderer: Renderer) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            renderer,
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Load every post in the posts directory, newest first.
    ///
    /// All files are read before any is parsed; the first failure aborts
    /// the whole load.
    pub async fn load_posts(&self) -> Result<Vec<Post>> {
        let paths = post_files(&self.posts_dir)?;
        tracing::debug!("Reading {} files from {:?}", paths.len(), self.posts_dir);

        let contents = try_join_all(paths.iter().map(|path| read_file(path))).await?;

        let mut posts = Vec::with_capacity(paths.len());
        for (path, content) in paths.iter().zip(&contents) {
            let mut post = self
                .parse_post(content)
                .map_err(|e| e.in_file(path.as_path()))?;
            post.source = path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            posts.push(post);
        }

        sort_by_date(&mut posts);
        Ok(posts)
    }

    /// Parse and render a single post document
    pub fn parse_post(&self, content: &str) -> Result<Post> {
        let (fm, body) = FrontMatter::parse(content)?;
        let text = self.renderer.render(body)?;

        let mut post = Post::new(fm.id, fm.title, fm.date);
        post.subtitle = fm.subtitle;
        post.tags = fm.tags;
        post.image = fm.image;
        post.text = text;
        Ok(post)
    }

    /// Load the standalone about page
    pub async fn load_about(&self, path: &Path) -> Result<About> {
        let content = match read_file(path).await {
            Err(ContentError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                return Err(ContentError::NotFound("about page".to_string()));
            }
            other => other?,
        };
        let (fm, body) = FrontMatter::parse(&content).map_err(|e| e.in_file(path))?;
        let text = self.renderer.render(body).map_err(|e| e.in_file(path))?;
        Ok(About {
            title: fm.title,
            text,
        })
    }
}

async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Markdown files directly inside `dir`, sorted by file name
fn post_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ContentError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "posts directory not found"),
        });
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ContentError::Io {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        let path = entry.path();
        if path.is_file() && is_markdown_file(path) && !is_hidden(path) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Sort by date descending; equal dates keep their order
pub fn sort_by_date(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}
