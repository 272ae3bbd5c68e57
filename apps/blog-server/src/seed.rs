//! Demo content for local runs against an empty store.

use chrono::{Duration, Utc};

use blog_core::domain::NewPost;
use blog_core::{DomainError, PostService};

const DEMO_POSTS: &[(&str, &str, &str)] = &[
    ("first-post", "First post", "This blog is opened."),
    ("second-post", "Second post", "This is the second post."),
    ("third-post", "Third post", "This is not the first post."),
    ("forth-post", "Dummy first post", "This is the forth post."),
    ("fifth-post", "Draft post", "The First post has been withdrawn."),
];

/// Publish the demo posts, an hour apart, unless posts already exist.
/// Returns how many were published.
pub async fn seed_demo_posts(posts: &PostService) -> Result<usize, DomainError> {
    let existing = posts.list_page(None, None).await?;
    if existing.window.count > 0 {
        tracing::info!(existing = existing.window.count, "Store not empty - skipping demo posts");
        return Ok(0);
    }

    let start = Utc::now() - Duration::hours(DEMO_POSTS.len() as i64);
    for (i, (slug, title, text)) in DEMO_POSTS.iter().enumerate() {
        let post = NewPost::new(*slug, *title, *text)?.created_at(start + Duration::hours(i as i64));
        posts.publish(post).await?;
    }

    tracing::info!(count = DEMO_POSTS.len(), "Seeded demo posts");
    Ok(DEMO_POSTS.len())
}
