//! Data Transfer Objects - response types for the posts API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as listed by `GET /api/posts/`. Carries everything but the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A full post as returned by `GET /api/posts/{slug}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
