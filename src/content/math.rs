//! Math rendering: `$$ … $$` display blocks and `$ … $` inline expressions

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::error::{ContentError, Result};

lazy_static! {
    /// Code is matched first so dollars inside it are copied through untouched.
    static ref MATH_RE: Regex = Regex::new(
        r"(?ms)(?P<fence>^[ \t]*(?:```|~~~).*?^[ \t]*(?:```|~~~)[ \t]*$)|(?P<code>`[^`\n]+`)|\$\$(?P<block>.+?)\$\$|(?P<pre>^|[^\\$])\$(?P<inline>[^$\n]+?)\$"
    )
    .expect("math pattern is valid");
}

/// Turns a TeX expression into HTML
pub trait MathEngine: Send + Sync {
    fn render(&self, expr: &str, display: bool) -> std::result::Result<String, String>;
}

/// KaTeX running in an embedded JS runtime
#[derive(Debug, Default, Clone, Copy)]
pub struct KatexEngine;

impl MathEngine for KatexEngine {
    fn render(&self, expr: &str, display: bool) -> std::result::Result<String, String> {
        let opts = katex::Opts::builder()
            .display_mode(display)
            .output_type(katex::OutputType::Html)
            .build()
            .map_err(|e| e.to_string())?;
        katex::render_with_opts(expr, &opts).map_err(|e| e.to_string())
    }
}

/// Replace every math expression in `text` with the engine's markup.
///
/// Fails on the first expression the engine rejects.
pub fn render_math(text: &str, engine: &dyn MathEngine) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for caps in MATH_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        output.push_str(&text[last..whole.start()]);
        last = whole.end();

        if caps.name("fence").is_some() || caps.name("code").is_some() {
            output.push_str(whole.as_str());
        } else if let Some(expr) = caps.name("block") {
            output.push_str(&render_expr(engine, expr.as_str(), true)?);
        } else if let Some(expr) = caps.name("inline") {
            output.push_str(group(&caps, "pre"));
            output.push_str(&render_expr(engine, expr.as_str(), false)?);
        }
    }

    output.push_str(&text[last..]);
    Ok(output)
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map(|m| m.as_str()).unwrap_or("")
}

fn render_expr(engine: &dyn MathEngine, expr: &str, display_mode: bool) -> Result<String> {
    let expr = expr.trim();
    engine.render(expr, display_mode).map_err(|message| {
        tracing::error!(expr, display_mode, error = %message, "failed to render math");
        ContentError::Math {
            expr: expr.to_string(),
            message,
        }
    })
}
