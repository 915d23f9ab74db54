//! Content module - handles posts, front-matter and body rendering

mod frontmatter;
pub mod loader;
mod markdown;
pub mod math;
mod post;
mod renderer;

pub use frontmatter::FrontMatter;
pub use loader::PostLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Image, Post};
pub use renderer::Renderer;
