//! Body rendering pipeline: math first, then markdown

use super::math::{render_math, KatexEngine, MathEngine};
use super::MarkdownRenderer;
use crate::config::SiteConfig;
use crate::error::Result;

/// Renders a post body to HTML
pub struct Renderer {
    markdown: MarkdownRenderer,
    math: Option<Box<dyn MathEngine>>,
}

impl Renderer {
    /// Build the renderer described by the site configuration
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let markdown = MarkdownRenderer::with_options(&config.highlight)?;
        let math: Option<Box<dyn MathEngine>> = if config.math.enable {
            Some(Box::new(KatexEngine))
        } else {
            None
        };
        Ok(Self { markdown, math })
    }

    /// Use a specific math engine, or none to leave `$` untouched
    pub fn with_math_engine(mut self, engine: Option<Box<dyn MathEngine>>) -> Self {
        self.math = engine;
        self
    }

    pub fn render(&self, body: &str) -> Result<String> {
        match &self.math {
            Some(engine) => {
                let with_math = render_math(body, engine.as_ref())?;
                Ok(self.markdown.render(&with_math))
            }
            None => Ok(self.markdown.render(body)),
        }
    }
}
