//! In-memory post store - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::SearchQuery;
use blog_core::domain::{NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};
use blog_core::search::filter_posts;

#[derive(Default)]
struct Store {
    posts: BTreeMap<i64, Post>,
    last_id: i64,
}

impl Store {
    /// Snapshot of all posts, newest first.
    fn ordered(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().cloned().collect();
        posts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        posts
    }
}

/// In-memory post repository guarded by an async RwLock.
///
/// Search runs as a post-fetch filter over the snapshot.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn matching(&self, query: &SearchQuery) -> Vec<Post> {
        let store = self.store.read().await;
        filter_posts(store.ordered(), query)
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let existing = store.posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;

        if existing.slug != post.slug {
            return Err(RepoError::Constraint(format!(
                "slug of post {} cannot change",
                post.id
            )));
        }

        *existing = post.clone();
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn count(&self, query: &SearchQuery) -> Result<u64, RepoError> {
        Ok(self.matching(query).await.len() as u64)
    }

    async fn fetch(
        &self,
        query: &SearchQuery,
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Post>, RepoError> {
        let posts = self.matching(query).await.into_iter().skip(offset as usize);

        Ok(match limit {
            Some(limit) => posts.take(limit as usize).collect(),
            None => posts.collect(),
        })
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if store.posts.values().any(|p| p.slug == post.slug) {
            return Err(RepoError::Constraint(format!(
                "duplicate slug '{}'",
                post.slug
            )));
        }

        store.last_id += 1;
        let post = post.into_post(store.last_id);
        store.posts.insert(post.id, post.clone());

        Ok(post)
    }
}
