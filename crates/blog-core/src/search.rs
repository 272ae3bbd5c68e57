//! Keyword search over post title and text.
//!
//! A keyword matches a post when it is a case-insensitive substring of the
//! title or of the text. An absent or empty keyword matches everything.
//! The keyword is taken literally: no trimming, no wildcards.

use crate::domain::Post;

/// A normalized keyword filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    keyword: Option<String>,
    needle: Option<String>,
}

impl SearchQuery {
    /// Build a query from raw user input. Empty input means no filtering.
    pub fn new(keyword: Option<&str>) -> Self {
        match keyword {
            Some(k) if !k.is_empty() => Self {
                keyword: Some(k.to_string()),
                needle: Some(k.to_lowercase()),
            },
            _ => Self::default(),
        }
    }

    /// Query that matches every post.
    pub fn all() -> Self {
        Self::default()
    }

    /// The keyword as entered, if any.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// The lowercased keyword used for comparisons.
    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches(&self, post: &Post) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => {
                post.title.to_lowercase().contains(needle.as_str())
                    || post.text.to_lowercase().contains(needle.as_str())
            }
        }
    }
}

/// Narrow `posts` to those matching `query`, keeping their order.
pub fn filter_posts(posts: Vec<Post>, query: &SearchQuery) -> Vec<Post> {
    if query.is_empty() {
        return posts;
    }
    posts.into_iter().filter(|post| query.matches(post)).collect()
}
