//! Error types for content ingestion and route lookups

use std::path::PathBuf;

/// Errors raised while loading, rendering or querying posts
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The document does not start with a `---` fenced metadata block
    #[error("markdown should include a metadata block")]
    MissingMetadata,

    /// The metadata block does not match the frontmatter schema
    #[error("invalid metadata: {message}")]
    Validation { message: String },

    /// A math expression could not be rendered
    #[error("failed to render math expression `{expr}`: {message}")]
    Math { expr: String, message: String },

    /// Markdown or highlighter failure
    #[error("render error: {0}")]
    Render(String),

    /// Unknown post id or tag
    #[error("not found: {0}")]
    NotFound(String),

    /// Page number is not a positive integer
    #[error("invalid page: {0}")]
    InvalidPage(String),

    /// Reading a content file or directory failed
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file failed to parse or render
    #[error("{path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<ContentError>,
    },
}

impl ContentError {
    /// Attach the offending file to an error
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        ContentError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping file context
    pub fn root(&self) -> &ContentError {
        match self {
            ContentError::File { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;
