//! Memoized post index
//!
//! The index is loaded once on first access and shared afterwards. In
//! development mode the cache is bypassed and every access re-reads the
//! posts directory, so edits show up without a restart.

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::config::Mode;
use crate::content::PostLoader;
use crate::error::Result;
use crate::index::PostIndex;

/// Lazily initialised, shareable post index
pub struct PostCache {
    loader: PostLoader,
    mode: Mode,
    index: OnceCell<Arc<PostIndex>>,
}

impl PostCache {
    pub fn new(loader: PostLoader, mode: Mode) -> Self {
        Self {
            loader,
            mode,
            index: OnceCell::new(),
        }
    }

    pub fn loader(&self) -> &PostLoader {
        &self.loader
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The post index, loading it if needed
    pub async fn get(&self) -> Result<Arc<PostIndex>> {
        if self.mode.is_development() {
            tracing::debug!("Development mode, reloading posts");
            return self.load().await;
        }

        let index = self.index.get_or_try_init(|| self.load()).await?;
        Ok(Arc::clone(index))
    }

    /// Whether an index has been memoized
    pub fn is_loaded(&self) -> bool {
        self.index.initialized()
    }

    async fn load(&self) -> Result<Arc<PostIndex>> {
        let start = std::time::Instant::now();
        let posts = self.loader.load_posts().await?;
        tracing::info!(
            "Loaded {} posts from {:?} in {:.2}s",
            posts.len(),
            self.loader.posts_dir(),
            start.elapsed().as_secs_f64()
        );
        Ok(Arc::new(PostIndex::new(posts)))
    }
}
