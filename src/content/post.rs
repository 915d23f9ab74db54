//! Post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Unique identifier, used in `/read/{id}`
    pub id: String,

    /// Post title
    pub title: String,

    /// Optional subtitle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Publication date
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,

    /// Post tags
    pub tags: Vec<String>,

    /// Cover image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,

    /// Rendered HTML content
    pub text: String,

    /// Source file name
    #[serde(skip)]
    pub source: String,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(id: String, title: String, date: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            subtitle: None,
            date,
            tags: Vec::new(),
            image: None,
            text: String::new(),
            source: String::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Cover image of a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}
