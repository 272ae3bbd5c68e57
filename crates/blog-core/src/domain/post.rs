use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 150;

/// Maximum slug length, in characters.
pub const SLUG_MAX_CHARS: usize = 50;

/// Post entity - a single blog entry.
///
/// `id` is assigned by the store on insert and grows with insertion order.
/// `slug` never changes once the post exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Replace title and text, refreshing `updated_at`.
    pub fn revise(&mut self, title: String, text: String) -> Result<(), DomainError> {
        validate_title(&title)?;

        self.title = title;
        self.text = text;
        self.updated_at = Utc::now().max(self.created_at);
        Ok(())
    }
}

/// A validated post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub slug: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post stamped with the current time.
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let slug = slug.into();
        let title = title.into();

        if !is_valid_slug(&slug) {
            return Err(DomainError::Validation(format!(
                "slug '{slug}' must be 1-{SLUG_MAX_CHARS} letters, digits, hyphens or underscores"
            )));
        }
        validate_title(&title)?;

        let now = Utc::now();
        Ok(Self {
            slug,
            title,
            text: text.into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Backdate the post, e.g. when importing existing entries.
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.updated_at = at;
        self
    }

    /// Attach the store-assigned id.
    pub fn into_post(self, id: i64) -> Post {
        Post {
            id,
            slug: self.slug,
            title: self.title,
            text: self.text,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Slugs are non-empty ASCII letters, digits, `-` and `_`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= SLUG_MAX_CHARS
        && slug
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.is_empty() {
        return Err(DomainError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::Validation(format!(
            "title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(())
}
