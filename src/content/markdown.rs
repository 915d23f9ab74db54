//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::config::HighlightConfig;
use crate::error::{ContentError, Result};

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with the default theme
    pub fn new() -> Result<Self> {
        Self::with_options(&HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(config: &HighlightConfig) -> Result<Self> {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set.themes.remove(&config.theme).ok_or_else(|| {
            ContentError::Render(format!("unknown highlight theme `{}`", config.theme))
        })?;

        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            line_numbers: config.line_number,
        })
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is stripped before this point, so no metadata blocks
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // (language, content) of the code block being collected
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, content)) = code_block.take() {
                        let highlighted = self.highlight_code(&content, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, content)) = code_block.as_mut() {
                        content.push_str(&text);
                    }
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block, falling back to a plain block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let Some(lang) = lang else {
            return plain_code_block(code, None);
        };

        let Some(syntax) = self.find_syntax(lang) else {
            tracing::debug!("No syntax for language `{}`, leaving unhighlighted", lang);
            return plain_code_block(code, Some(lang));
        };

        match self.highlight_lines(code, syntax) {
            Ok(lines) if self.line_numbers => self.add_line_numbers(&lines, lang),
            Ok(lines) => format!(
                r#"<pre class="highlight"{}><code class="language-{}">{}</code></pre>"#,
                self.background_style(),
                html_escape(lang),
                lines.concat()
            ),
            Err(e) => {
                tracing::warn!("Highlighting `{}` failed: {}", lang, e);
                plain_code_block(code, Some(lang))
            }
        }
    }

    fn find_syntax(&self, lang: &str) -> Option<&SyntaxReference> {
        self.syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
    }

    /// Highlighted HTML per source line, line endings included
    fn highlight_lines(
        &self,
        code: &str,
        syntax: &SyntaxReference,
    ) -> Result<Vec<String>, syntect::Error> {
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let regions = highlighter.highlight_line(line, &self.syntax_set)?;
            lines.push(styled_line_to_highlighted_html(
                &regions[..],
                IncludeBackground::No,
            )?);
        }
        Ok(lines)
    }

    fn background_style(&self) -> String {
        self.theme
            .settings
            .background
            .map(|c| {
                format!(
                    r#" style="background-color:#{:02x}{:02x}{:02x};""#,
                    c.r, c.g, c.b
                )
            })
            .unwrap_or_default()
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, lines: &[String], lang: &str) -> String {
        let mut gutter = String::new();
        let mut code_lines = String::new();

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                gutter.push('\n');
            }
            gutter.push_str(&format!(r#"<span class="line-number">{}</span>"#, i + 1));
            code_lines.push_str(line.trim_end_matches('\n'));
            if i + 1 < lines.len() {
                code_lines.push('\n');
            }
        }

        format!(
            r#"<figure class="highlight {}"{}><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            html_escape(lang),
            self.background_style(),
            gutter,
            code_lines
        )
    }
}

/// Unhighlighted, escaped code block
fn plain_code_block(code: &str, lang: Option<&str>) -> String {
    match lang {
        Some(lang) => format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            html_escape(lang),
            html_escape(code)
        ),
        None => format!("<pre><code>{}</code></pre>", html_escape(code)),
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
