use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;
use crate::search::SearchQuery;

/// Generic repository trait for entities addressed by a primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist changes to an existing entity.
    /// Returns `RepoError::NotFound` when nothing was stored under its ID.
    async fn save(&self, entity: T) -> Result<T, RepoError>;
}

/// Post repository.
///
/// Listings are always ordered newest first: `created_at` descending,
/// then `id` descending.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Find a post by its slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Count the posts matching `query`.
    async fn count(&self, query: &SearchQuery) -> Result<u64, RepoError>;

    /// Fetch matching posts in listing order, skipping `offset` and
    /// returning at most `limit` (all remaining when `None`).
    async fn fetch(
        &self,
        query: &SearchQuery,
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Post>, RepoError>;

    /// Store a new post and assign its ID.
    /// Returns `RepoError::Constraint` when the slug is taken.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;
}
