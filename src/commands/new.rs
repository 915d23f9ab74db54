//! Create a new post

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::helpers::is_file_name_safe;
use crate::Blog;

/// Front-matter of a freshly scaffolded post
#[derive(Serialize)]
struct NewFrontMatter<'a> {
    id: &'a str,
    title: &'a str,
    date: String,
    tags: Vec<String>,
}

/// Write a new post skeleton, returning its path
pub fn create_post(blog: &Blog, title: &str, id: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let id = match id {
        Some(id) => id.to_string(),
        None => slug::slugify(title),
    };
    if id.is_empty() {
        anyhow::bail!("Cannot derive a post id from title {:?}", title);
    }
    if !is_file_name_safe(&id) {
        anyhow::bail!("Post id {:?} cannot be used as a file name", id);
    }

    let file_path = blog.posts_dir.join(format!("{}.md", id));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let front_matter = serde_yaml::to_string(&NewFrontMatter {
        id: &id,
        title,
        date: now.format("%Y-%m-%d").to_string(),
        tags: Vec::new(),
    })?;
    let content = format!("---\n{}---\n", front_matter);

    fs::create_dir_all(&blog.posts_dir)?;
    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
