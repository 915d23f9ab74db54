//! Date-sorted post index and the lookups built on it

use std::collections::BTreeSet;

use crate::content::loader::sort_by_date;
use crate::content::Post;

/// All posts, newest first
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
}

/// Posts adjacent to a given one in sort order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbours<'a> {
    /// The older post (one position later)
    pub previous: Option<&'a Post>,
    /// The newer post (one position earlier)
    pub next: Option<&'a Post>,
}

impl PostIndex {
    /// Build an index, sorting by date descending
    pub fn new(mut posts: Vec<Post>) -> Self {
        sort_by_date(&mut posts);
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Position of the first post with this id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.posts.iter().position(|p| p.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.position(id).map(|i| &self.posts[i])
    }

    /// Neighbours of the post at `index`
    pub fn neighbours(&self, index: usize) -> Neighbours<'_> {
        let next = index.checked_sub(1).and_then(|i| self.posts.get(i));
        let previous = if index < self.posts.len() {
            self.posts.get(index + 1)
        } else {
            None
        };
        Neighbours { previous, next }
    }

    /// Every tag used by any post, deduplicated and sorted
    pub fn tags(&self) -> Vec<String> {
        self.posts
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Tags with the number of posts carrying them, sorted by name
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        let mut counts = std::collections::BTreeMap::new();
        for post in &self.posts {
            let unique: BTreeSet<&String> = post.tags.iter().collect();
            for tag in unique {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }

    /// Posts carrying `tag`, in index order
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Post> + 'a {
        self.posts.iter().filter(move |p| p.has_tag(tag))
    }

    /// Number of pages of `per_page` posts
    pub fn num_pages(&self, per_page: usize) -> usize {
        self.posts.len().div_ceil(per_page.max(1))
    }

    /// Posts on 1-based `page`; empty past the end
    pub fn page(&self, page: usize, per_page: usize) -> &[Post] {
        let per_page = per_page.max(1);
        let start = page.saturating_sub(1).saturating_mul(per_page);
        if page == 0 || start >= self.posts.len() {
            return &[];
        }
        let end = (start + per_page).min(self.posts.len());
        &self.posts[start..end]
    }
}
