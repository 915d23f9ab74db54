//! Build route data files

use anyhow::Result;

use crate::content::PostLoader;
use crate::error::ContentError;
use crate::generator::Generator;
use crate::index::PostIndex;
use crate::Blog;

/// Load every post and write the route data, returning the file count
pub async fn run(blog: &Blog) -> Result<usize> {
    let start = std::time::Instant::now();

    let loader = blog.loader()?;
    let posts = loader.load_posts().await?;
    tracing::info!("Loaded {} posts", posts.len());

    let index = PostIndex::new(posts);
    let about = load_about(&loader, blog).await?;

    let generator = Generator::new(&blog.config, &blog.public_dir);
    let written = generator.generate(&index, about.as_ref())?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} files in {:.2}s",
        written,
        duration.as_secs_f64()
    );

    Ok(written)
}

/// The about page is optional
async fn load_about(loader: &PostLoader, blog: &Blog) -> Result<Option<crate::routes::About>> {
    match loader.load_about(&blog.about_path).await {
        Ok(about) => Ok(Some(about)),
        Err(ContentError::NotFound(_)) => {
            tracing::debug!("No about page at {:?}", blog.about_path);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
