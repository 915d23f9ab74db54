//! Front-matter parsing and validation

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use super::post::Image;
use crate::error::{ContentError, Result};

/// Fence that opens and closes the metadata block
const FENCE: &str = "---";

/// Metadata block as written in the file, before date validation
#[derive(Debug, Deserialize)]
struct RawFrontMatter {
    id: String,
    title: String,
    subtitle: Option<String>,
    date: String,
    tags: Option<Vec<String>>,
    image: Option<Image>,
}

/// Validated front-matter of a post or page
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub image: Option<Image>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim();

        let rest = content
            .strip_prefix(FENCE)
            .ok_or(ContentError::MissingMetadata)?;
        let end_pos = rest.find(FENCE).ok_or(ContentError::MissingMetadata)?;

        let yaml_content = &rest[..end_pos];
        if yaml_content.trim().is_empty() {
            return Err(ContentError::MissingMetadata);
        }

        let raw: RawFrontMatter =
            serde_yaml::from_str(yaml_content).map_err(|e| ContentError::Validation {
                message: e.to_string(),
            })?;

        let date = parse_date_string(&raw.date).ok_or_else(|| ContentError::Validation {
            message: format!("date: `{}` is not a valid date", raw.date),
        })?;

        if raw.id.trim().is_empty() {
            return Err(ContentError::Validation {
                message: "id: must not be empty".to_string(),
            });
        }
        let tags = raw.tags.unwrap_or_default();
        if tags.iter().any(|t| t.trim().is_empty()) {
            return Err(ContentError::Validation {
                message: "tags: must not contain empty tags".to_string(),
            });
        }

        let remaining = rest[end_pos + FENCE.len()..].trim();

        let fm = FrontMatter {
            id: raw.id,
            title: raw.title,
            subtitle: raw.subtitle,
            date,
            tags,
            image: raw.image,
        };

        Ok((fm, remaining))
    }
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let content = "---\nid: \"1\"\ntitle: \"Hi\"\ndate: \"2024-01-01\"\n---\nHello";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.id, "1");
        assert_eq!(fm.title, "Hi");
        assert_eq!(fm.date.format("%Y-%m-%d").to_string(), "2024-01-01");
        assert!(fm.tags.is_empty());
        assert_eq!(fm.subtitle, None);
        assert_eq!(body, "Hello");
    }

    #[test]
    fn test_parse_full_document() {
        let content = r#"
---
id: rust-intro
title: Hello World
subtitle: First steps
date: 2024-01-15 10:30:00
tags:
  - rust
  - blog
image:
  src: /images/cover.png
  alt: A cover
draft_notes: ignored
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.id, "rust-intro");
        assert_eq!(fm.subtitle.as_deref(), Some("First steps"));
        assert_eq!(fm.tags, vec!["rust", "blog"]);
        let image = fm.image.unwrap();
        assert_eq!(image.src, "/images/cover.png");
        assert_eq!(image.alt, "A cover");
        assert_eq!(
            fm.date.format("%Y-%m-%d %H:%M").to_string(),
            "2024-01-15 10:30"
        );
        assert_eq!(body, "This is the content.");
    }

    #[test]
    fn test_missing_leading_fence() {
        let content = "id: \"1\"\ntitle: \"Hi\"\ndate: \"2024-01-01\"\n---\nHello";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, ContentError::MissingMetadata));
    }

    #[test]
    fn test_missing_closing_fence() {
        let content = "---\nid: \"1\"\ntitle: \"Hi\"\ndate: \"2024-01-01\"\nHello";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, ContentError::MissingMetadata));
    }

    #[test]
    fn test_empty_metadata_block() {
        let err = FrontMatter::parse("---\n\n---\nbody").unwrap_err();
        assert!(matches!(err, ContentError::MissingMetadata));
    }

    #[test]
    fn test_missing_required_field() {
        let content = "---\nid: \"1\"\ndate: \"2024-01-01\"\n---\nHello";
        let err = FrontMatter::parse(content).unwrap_err();
        match err {
            ContentError::Validation { message } => assert!(message.contains("title")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tags_must_be_a_list() {
        let content = "---\nid: a\ntitle: A\ndate: 2024-01-01\ntags: rust\n---\nbody";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, ContentError::Validation { .. }));
    }

    #[test]
    fn test_image_requires_alt() {
        let content = "---\nid: a\ntitle: A\ndate: 2024-01-01\nimage:\n  src: x.png\n---\nbody";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, ContentError::Validation { .. }));
    }

    #[test]
    fn test_empty_id_and_tags_rejected() {
        for content in [
            "---\nid: \"\"\ntitle: A\ndate: 2024-01-01\n---\nbody",
            "---\nid: \"  \"\ntitle: A\ndate: 2024-01-01\n---\nbody",
            "---\nid: a\ntitle: A\ndate: 2024-01-01\ntags: [rust, \"\"]\n---\nbody",
        ] {
            let err = FrontMatter::parse(content).unwrap_err();
            assert!(matches!(err, ContentError::Validation { .. }), "{content}");
        }
    }

    #[test]
    fn test_invalid_date() {
        let content = "---\nid: a\ntitle: A\ndate: someday\n---\nbody";
        let err = FrontMatter::parse(content).unwrap_err();
        match err {
            ContentError::Validation { message } => assert!(message.contains("someday")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let cases = [
            "2024-01-15",
            "2024/01/15",
            "2024-01-15 10:30",
            "2024-01-15T10:30:00",
            "2024-01-15T10:30:00.250",
            "2024-01-15T10:30:00Z",
            "2024-01-15T12:30:00+02:00",
        ];
        for case in cases {
            let dt = parse_date_string(case).unwrap();
            assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15", "{case}");
        }
        assert_eq!(
            parse_date_string("2024-01-15T12:30:00+02:00").unwrap(),
            parse_date_string("2024-01-15T10:30:00Z").unwrap()
        );
    }

    #[test]
    fn test_body_keeps_inner_rules() {
        let content = "---\nid: a\ntitle: A\ndate: 2024-01-01\n---\n\nfirst\n\n---\n\nsecond\n";
        let (_, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(body, "first\n\n---\n\nsecond");
    }
}
