//! List site content

use anyhow::Result;

use crate::index::PostIndex;
use crate::Blog;

/// List site content by type
pub async fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let posts = blog.loader()?.load_posts().await?;
    let index = PostIndex::new(posts);

    for line in lines(&index, content_type)? {
        println!("{}", line);
    }

    Ok(())
}

fn lines(index: &PostIndex, content_type: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();
    match content_type {
        "post" | "posts" => {
            out.push(format!("Posts ({}):", index.len()));
            for post in index.posts() {
                out.push(format!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.id
                ));
            }
        }
        "tag" | "tags" => {
            let mut tags = index.tag_counts();
            out.push(format!("Tags ({}):", tags.len()));
            // Most used first; names break ties
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                out.push(format!("  {} ({})", tag, count));
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::tests::sample_index;

    #[test]
    fn test_list_posts() {
        let out = lines(&sample_index(), "post").unwrap();
        assert_eq!(out[0], "Posts (4):");
        assert_eq!(out[1], "  2024-01-04 - Title d [d]");
    }

    #[test]
    fn test_list_tags() {
        let out = lines(&sample_index(), "tags").unwrap();
        assert_eq!(
            out,
            vec!["Tags (3):", "  rust (2)", "  web (2)", "  life (1)"]
        );
    }

    #[test]
    fn test_list_unknown_type() {
        assert!(lines(&sample_index(), "category").is_err());
    }
}
