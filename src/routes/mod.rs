//! Route data for the presentation layer
//!
//! Every route is a pure function of the post index:
//!
//! - `/posts` - all posts as previews
//! - `/posts/{page}` - one page of post history
//! - `/read/{id}` - a single post with its neighbours
//! - `/tags` - every tag
//! - `/tags/{tag}` - previews of the posts carrying a tag

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::error::{ContentError, Result};
use crate::helpers::{decode_segment, encode_segment, preview, reading_time};
use crate::index::PostIndex;

/// Listing entry for a post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPreview {
    pub id: String,
    pub title: String,
    /// Milliseconds since the Unix epoch
    pub date: i64,
    pub preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_read: Option<usize>,
}

impl PostPreview {
    /// Preview text is the subtitle when the post has one, else the start of the body
    fn from_post(post: &Post, length: usize) -> Self {
        let preview = match &post.subtitle {
            Some(subtitle) => subtitle.clone(),
            None => preview(&post.text, length),
        };
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            date: post.date.timestamp_millis(),
            preview,
            tags: None,
            time_to_read: None,
        }
    }

    fn with_tags(mut self, post: &Post) -> Self {
        self.tags = Some(post.tags.clone());
        self
    }
}

/// One page of the post history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostHistory {
    pub current_page: usize,
    pub num_pages: usize,
    pub posts: Vec<PostPreview>,
}

/// Link to a neighbouring post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavPost {
    pub id: String,
    pub title: String,
}

impl From<&Post> for NavPost {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
        }
    }
}

/// A single post with links to the posts around it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadPost {
    pub post: Post,
    /// The older post
    pub previous_post: Option<NavPost>,
    /// The newer post
    pub next_post: Option<NavPost>,
}

/// The standalone about page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct About {
    pub title: String,
    pub text: String,
}

/// All posts as previews, with tags
pub fn posts(index: &PostIndex, config: &SiteConfig) -> Vec<PostPreview> {
    index
        .posts()
        .iter()
        .map(|p| PostPreview::from_post(p, config.preview.list_length).with_tags(p))
        .collect()
}

/// One page of post history; `page` is the raw 1-based route parameter
pub fn post_history(index: &PostIndex, page: &str, config: &SiteConfig) -> Result<PostHistory> {
    let current_page: usize = page
        .trim()
        .parse()
        .ok()
        .filter(|p| *p > 0)
        .ok_or_else(|| ContentError::InvalidPage(page.to_string()))?;

    let posts = index
        .page(current_page, config.per_page)
        .iter()
        .map(|p| {
            let mut preview = PostPreview::from_post(p, config.preview.page_length);
            preview.time_to_read = Some(reading_time(&p.text, config.words_per_minute));
            preview
        })
        .collect();

    Ok(PostHistory {
        current_page,
        num_pages: index.num_pages(config.per_page),
        posts,
    })
}

/// A post by id, with its neighbours
pub fn read_post(index: &PostIndex, id: &str) -> Result<ReadPost> {
    let position = index
        .position(id)
        .ok_or_else(|| ContentError::NotFound(format!("no post found with id `{id}`")))?;
    let neighbours = index.neighbours(position);

    Ok(ReadPost {
        post: index.posts()[position].clone(),
        previous_post: neighbours.previous.map(NavPost::from),
        next_post: neighbours.next.map(NavPost::from),
    })
}

/// Every tag, deduplicated and sorted
pub fn tags(index: &PostIndex) -> Vec<String> {
    index.tags()
}

/// Previews of the posts carrying `tag`
pub fn tag_posts(index: &PostIndex, tag: &str, config: &SiteConfig) -> Result<Vec<PostPreview>> {
    let posts: Vec<_> = index
        .with_tag(tag)
        .map(|p| PostPreview::from_post(p, config.preview.list_length).with_tags(p))
        .collect();

    if posts.is_empty() {
        return Err(ContentError::NotFound(format!("no posts tagged `{tag}`")));
    }
    Ok(posts)
}

/// Every concrete route the index produces
pub fn static_routes(index: &PostIndex, config: &SiteConfig) -> Vec<Route> {
    let mut routes = vec![Route::Posts];
    routes.extend(
        (1..=index.num_pages(config.per_page)).map(|n| Route::PostHistory(n.to_string())),
    );
    routes.extend(index.posts().iter().map(|p| Route::Read(p.id.clone())));
    routes.push(Route::Tags);
    routes.extend(index.tags().into_iter().map(Route::TagPosts));
    routes
}

/// Every concrete path the index produces, parameters percent-encoded
pub fn static_paths(index: &PostIndex, config: &SiteConfig) -> Vec<String> {
    static_routes(index, config).iter().map(Route::path).collect()
}

/// A parsed route path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Posts,
    PostHistory(String),
    Read(String),
    Tags,
    TagPosts(String),
}

impl Route {
    /// Parse a path such as `/tags/c%2B%2B`, decoding its parameter
    pub fn parse(path: &str) -> Result<Self> {
        let not_found = || ContentError::NotFound(format!("no route for `{path}`"));
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        let param = |raw: &str| decode_segment(raw).ok_or_else(not_found);

        match segments.as_slice() {
            ["posts"] => Ok(Route::Posts),
            ["posts", page] => Ok(Route::PostHistory(param(*page)?)),
            ["read", id] => Ok(Route::Read(param(*id)?)),
            ["tags"] => Ok(Route::Tags),
            ["tags", tag] => Ok(Route::TagPosts(param(*tag)?)),
            _ => Err(not_found()),
        }
    }

    /// The route's URL path, parameter percent-encoded
    pub fn path(&self) -> String {
        match self {
            Route::Posts => "/posts".to_string(),
            Route::PostHistory(page) => format!("/posts/{}", encode_segment(page)),
            Route::Read(id) => format!("/read/{}", encode_segment(id)),
            Route::Tags => "/tags".to_string(),
            Route::TagPosts(tag) => format!("/tags/{}", encode_segment(tag)),
        }
    }

    /// Collection and decoded parameter, if the route has one
    pub fn segments(&self) -> (&'static str, Option<&str>) {
        match self {
            Route::Posts => ("posts", None),
            Route::PostHistory(page) => ("posts", Some(page.as_str())),
            Route::Read(id) => ("read", Some(id.as_str())),
            Route::Tags => ("tags", None),
            Route::TagPosts(tag) => ("tags", Some(tag.as_str())),
        }
    }

    /// Resolve the route to its JSON payload
    pub fn resolve(&self, index: &PostIndex, config: &SiteConfig) -> Result<serde_json::Value> {
        let value = match self {
            Route::Posts => serde_json::to_value(posts(index, config)),
            Route::PostHistory(page) => serde_json::to_value(post_history(index, page, config)?),
            Route::Read(id) => serde_json::to_value(read_post(index, id)?),
            Route::Tags => serde_json::to_value(tags(index)),
            Route::TagPosts(tag) => serde_json::to_value(tag_posts(index, tag, config)?),
        };
        value.map_err(|e| ContentError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::tests::{post, sample_index};

    #[test]
    fn test_posts_previews() {
        let mut config = SiteConfig::default();
        config.preview.list_length = 5;

        let previews = posts(&sample_index(), &config);
        assert_eq!(previews.len(), 4);
        assert_eq!(previews[0].id, "d");
        assert_eq!(previews[0].preview, "<p>Bo");
        assert_eq!(previews[0].tags.as_deref(), Some(&["rust".to_string()][..]));
        assert_eq!(previews[0].time_to_read, None);
    }

    #[test]
    fn test_preview_prefers_subtitle() {
        let mut p = post("s", 1, &[]);
        p.subtitle = Some("A short summary".to_string());
        let index = PostIndex::new(vec![p]);

        let previews = posts(&index, &SiteConfig::default());
        assert_eq!(previews[0].preview, "A short summary");
    }

    #[test]
    fn test_post_history() {
        let posts = (1..=12).map(|d| post(&d.to_string(), d, &[])).collect();
        let index = PostIndex::new(posts);
        let config = SiteConfig::default();

        let first = post_history(&index, "1", &config).unwrap();
        assert_eq!(first.current_page, 1);
        assert_eq!(first.num_pages, 2);
        assert_eq!(first.posts.len(), 10);
        assert_eq!(first.posts[0].id, "12");
        assert_eq!(first.posts[0].time_to_read, Some(1));
        assert!(first.posts[0].tags.is_none());

        let second = post_history(&index, "2", &config).unwrap();
        assert_eq!(second.posts.len(), 2);

        let beyond = post_history(&index, "7", &config).unwrap();
        assert!(beyond.posts.is_empty());
        assert_eq!(beyond.num_pages, 2);
    }

    #[test]
    fn test_post_history_invalid_page() {
        let index = sample_index();
        let config = SiteConfig::default();
        for page in ["abc", "0", "-1", ""] {
            let err = post_history(&index, page, &config).unwrap_err();
            assert!(matches!(err, ContentError::InvalidPage(_)), "{page}");
        }
    }

    #[test]
    fn test_read_post_links() {
        let index = sample_index();

        let newest = read_post(&index, "d").unwrap();
        assert_eq!(newest.post.id, "d");
        assert!(newest.next_post.is_none());
        assert_eq!(newest.previous_post.unwrap().id, "c");

        let middle = read_post(&index, "c").unwrap();
        assert_eq!(middle.next_post.unwrap().id, "d");
        assert_eq!(middle.previous_post.unwrap().id, "b");

        let oldest = read_post(&index, "a").unwrap();
        assert!(oldest.previous_post.is_none());
        assert_eq!(
            oldest.next_post,
            Some(NavPost {
                id: "b".to_string(),
                title: "Title b".to_string()
            })
        );
    }

    #[test]
    fn test_read_post_not_found() {
        let err = read_post(&sample_index(), "missing").unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[test]
    fn test_tag_posts() {
        let index = sample_index();
        let config = SiteConfig::default();

        let web = tag_posts(&index, "web", &config).unwrap();
        let ids: Vec<_> = web.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);

        assert!(matches!(
            tag_posts(&index, "nope", &config),
            Err(ContentError::NotFound(_))
        ));
        assert_eq!(tags(&index), vec!["life", "rust", "web"]);
    }

    #[test]
    fn test_json_shape() {
        let index = sample_index();
        let config = SiteConfig::default();

        let read = Route::Read("c".to_string()).resolve(&index, &config).unwrap();
        assert_eq!(read["post"]["id"], "c");
        assert_eq!(read["post"]["date"], 1_704_240_000_000i64);
        assert_eq!(read["previousPost"]["id"], "b");
        assert_eq!(read["nextPost"]["title"], "Title d");

        let history = Route::PostHistory("1".to_string())
            .resolve(&index, &config)
            .unwrap();
        assert_eq!(history["currentPage"], 1);
        assert_eq!(history["numPages"], 1);
        assert_eq!(history["posts"][0]["timeToRead"], 1);
        assert!(history["posts"][0].get("tags").is_none());
    }

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse("/posts").unwrap(), Route::Posts);
        assert_eq!(
            Route::parse("/posts/2").unwrap(),
            Route::PostHistory("2".to_string())
        );
        assert_eq!(
            Route::parse("/read/hello-world/").unwrap(),
            Route::Read("hello-world".to_string())
        );
        assert_eq!(
            Route::parse("/tags/c%2B%2B").unwrap(),
            Route::TagPosts("c++".to_string())
        );
        assert!(Route::parse("/nowhere").is_err());
        assert!(Route::parse("/tags/a/b").is_err());
    }

    #[test]
    fn test_static_paths_resolve() {
        let mut index_posts = vec![post("x", 1, &["c++", "a b"])];
        index_posts.push(post("y", 2, &["a b"]));
        let index = PostIndex::new(index_posts);
        let config = SiteConfig::default();

        let paths = static_paths(&index, &config);
        assert_eq!(
            paths,
            vec![
                "/posts",
                "/posts/1",
                "/read/y",
                "/read/x",
                "/tags",
                "/tags/a%20b",
                "/tags/c%2B%2B"
            ]
        );
        for path in &paths {
            let route = Route::parse(path).unwrap();
            assert_eq!(&route.path(), path);
            route.resolve(&index, &config).unwrap();
        }
    }

    #[test]
    fn test_static_routes_keep_raw_parameters() {
        let index = PostIndex::new(vec![post("", 1, &["", "c++"])]);
        let routes = static_routes(&index, &SiteConfig::default());
        assert!(routes.contains(&Route::Read(String::new())));
        assert!(routes.contains(&Route::TagPosts(String::new())));
        assert!(routes.contains(&Route::TagPosts("c++".to_string())));
        assert_eq!(
            Route::TagPosts("c++".to_string()).segments(),
            ("tags", Some("c++"))
        );
        assert_eq!(Route::Tags.segments(), ("tags", None));
    }
}
