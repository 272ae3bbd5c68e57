use std::sync::Arc;

use crate::domain::{NewPost, Post, is_valid_slug};
use crate::error::{DomainError, RepoError};
use crate::pagination::{PAGE_SIZE, Page, PageRequest, PageWindow};
use crate::ports::PostRepository;
use crate::search::SearchQuery;

/// Read and authoring operations over posts.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// One page of the newest-first listing, narrowed by `keyword`.
    ///
    /// `page` is the raw query parameter; unparsable or out-of-range pages
    /// are `DomainError::PageNotFound`.
    pub async fn list_page(
        &self,
        keyword: Option<&str>,
        page: Option<&str>,
    ) -> Result<Page<Post>, DomainError> {
        let query = SearchQuery::new(keyword);
        let request = PageRequest::parse(page)?;

        let count = self.repo.count(&query).await?;
        let window = PageWindow::resolve(request, count, PAGE_SIZE)?;

        let items = if window.is_empty() {
            Vec::new()
        } else {
            self.repo
                .fetch(&query, window.offset(), Some(window.page_size))
                .await?
        };

        tracing::debug!(
            keyword = query.keyword().unwrap_or_default(),
            page = window.number,
            num_pages = window.num_pages,
            count = window.count,
            "Listed posts"
        );

        Ok(Page { items, window })
    }

    /// Every post, newest first.
    pub async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.fetch(&SearchQuery::all(), 0, None).await?)
    }

    /// The post addressed by `slug`.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Post, DomainError> {
        if !is_valid_slug(slug) {
            return Err(DomainError::post_not_found(slug));
        }

        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::post_not_found(slug))
    }

    /// Store a new post.
    pub async fn publish(&self, post: NewPost) -> Result<Post, DomainError> {
        let slug = post.slug.clone();
        let stored = self.repo.insert(post).await.map_err(|e| match e {
            RepoError::Constraint(_) => {
                DomainError::Duplicate(format!("a post with slug '{slug}' already exists"))
            }
            other => other.into(),
        })?;

        tracing::info!(post_id = stored.id, slug = %stored.slug, "Post published");
        Ok(stored)
    }

    /// Replace the title and text of the post addressed by `slug`.
    pub async fn revise(
        &self,
        slug: &str,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Post, DomainError> {
        let mut post = self.get_by_slug(slug).await?;
        post.revise(title.into(), text.into())?;

        let saved = self.repo.save(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(slug),
            other => other.into(),
        })?;

        tracing::info!(post_id = saved.id, slug = %saved.slug, "Post revised");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::ports::BaseRepository;
    use crate::search::filter_posts;

    /// Vec-backed repository kept in listing order.
    #[derive(Default)]
    struct VecRepository {
        posts: Mutex<Vec<Post>>,
    }

    impl VecRepository {
        fn ordered(&self) -> Vec<Post> {
            let mut posts = self.posts.lock().unwrap().clone();
            posts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
            posts
        }
    }

    #[async_trait]
    impl BaseRepository<Post, i64> for VecRepository {
        async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
            Ok(self.ordered().into_iter().find(|p| p.id == id))
        }

        async fn save(&self, post: Post) -> Result<Post, RepoError> {
            let mut posts = self.posts.lock().unwrap();
            let slot = posts
                .iter_mut()
                .find(|p| p.id == post.id)
                .ok_or(RepoError::NotFound)?;
            *slot = post.clone();
            Ok(post)
        }
    }

    #[async_trait]
    impl PostRepository for VecRepository {
        async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
            Ok(self.ordered().into_iter().find(|p| p.slug == slug))
        }

        async fn count(&self, query: &SearchQuery) -> Result<u64, RepoError> {
            Ok(filter_posts(self.ordered(), query).len() as u64)
        }

        async fn fetch(
            &self,
            query: &SearchQuery,
            offset: u64,
            limit: Option<u64>,
        ) -> Result<Vec<Post>, RepoError> {
            let posts = filter_posts(self.ordered(), query)
                .into_iter()
                .skip(offset as usize);
            Ok(match limit {
                Some(limit) => posts.take(limit as usize).collect(),
                None => posts.collect(),
            })
        }

        async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
            let mut posts = self.posts.lock().unwrap();
            if posts.iter().any(|p| p.slug == post.slug) {
                return Err(RepoError::Constraint("posts_slug_key".to_string()));
            }
            let stored = post.into_post(posts.len() as i64 + 1);
            posts.push(stored.clone());
            Ok(stored)
        }
    }

    fn service() -> PostService {
        PostService::new(Arc::new(VecRepository::default()))
    }

    async fn seed_numbered(service: &PostService, n: i64) {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for i in 1..=n {
            let post = NewPost::new(format!("post-{i}"), "Example title", "This is an example text.")
                .unwrap()
                .created_at(base + Duration::minutes(i));
            service.publish(post).await.unwrap();
        }
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_page_newest_first() {
        let service = service();
        seed_numbered(&service, 11).await;

        let first = service.list_page(None, Some("1")).await.unwrap();
        assert_eq!(
            slugs(&first.items),
            vec![
                "post-11", "post-10", "post-9", "post-8", "post-7", "post-6", "post-5",
                "post-4", "post-3", "post-2"
            ]
        );
        assert!(first.window.has_next());

        let second = service.list_page(None, Some("2")).await.unwrap();
        assert_eq!(slugs(&second.items), vec!["post-1"]);
        assert!(!second.window.has_next());

        let third = service.list_page(None, Some("3")).await.unwrap_err();
        assert!(third.is_not_found());
    }

    #[tokio::test]
    async fn test_same_timestamp_breaks_ties_by_id() {
        let service = service();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        for slug in ["a", "b", "c"] {
            let post = NewPost::new(slug, "Same time", "").unwrap().created_at(at);
            service.publish(post).await.unwrap();
        }

        let page = service.list_page(None, None).await.unwrap();
        assert_eq!(slugs(&page.items), vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let service = service();

        let page = service.list_page(None, None).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.window.num_pages, 1);

        let err = service.get_by_slug("post").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_page_token() {
        let service = service();
        seed_numbered(&service, 1).await;

        for token in ["invalid", "0", "-1", "2"] {
            let err = service.list_page(None, Some(token)).await.unwrap_err();
            assert!(err.is_not_found(), "token {token}");
        }
    }

    #[tokio::test]
    async fn test_keyword_narrows_listing() {
        let service = service();
        seed_numbered(&service, 3).await;
        service
            .publish(NewPost::new("needle", "A Needle here", "").unwrap())
            .await
            .unwrap();

        let page = service.list_page(Some("needle"), None).await.unwrap();
        assert_eq!(slugs(&page.items), vec!["needle"]);
        assert_eq!(page.window.count, 1);
    }

    #[tokio::test]
    async fn test_publish_duplicate_slug() {
        let service = service();
        service
            .publish(NewPost::new("post", "One", "").unwrap())
            .await
            .unwrap();

        let err = service
            .publish(NewPost::new("post", "Two", "").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_revise_updates_stored_post() {
        let service = service();
        service
            .publish(NewPost::new("post", "Sample post", "old").unwrap())
            .await
            .unwrap();

        let revised = service.revise("post", "Sample post v2", "new").await.unwrap();
        assert_eq!(revised.title, "Sample post v2");
        assert!(revised.updated_at >= revised.created_at);

        let fetched = service.get_by_slug("post").await.unwrap();
        assert_eq!(fetched, revised);

        let missing = service.revise("nope", "x", "y").await.unwrap_err();
        assert!(missing.is_not_found());
    }

    #[tokio::test]
    async fn test_malformed_slug_is_not_found() {
        let service = service();
        let err = service.get_by_slug("not a slug").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
