//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use blog_core::SearchQuery;
use blog_core::domain::{NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_read_err, map_write_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Escape LIKE metacharacters so the keyword matches literally.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `LOWER(title) LIKE %kw% OR LOWER(text) LIKE %kw%`, or no condition at all.
pub(crate) fn search_condition(query: &SearchQuery) -> Condition {
    let Some(needle) = query.needle() else {
        return Condition::all();
    };

    let pattern = format!("%{}%", escape_like(needle));
    let lower_like = |column: post::Column| {
        Expr::expr(Func::lower(Expr::col((PostEntity, column))))
            .like(LikeExpr::new(pattern.clone()).escape('\\'))
    };

    Condition::any()
        .add(lower_like(post::Column::Title))
        .add(lower_like(post::Column::Text))
}

/// Matching posts in listing order.
pub(crate) fn listing_select(query: &SearchQuery) -> Select<PostEntity> {
    PostEntity::find()
        .filter(search_condition(query))
        .order_by_desc(post::Column::CreatedAt)
        .order_by_desc(post::Column::Id)
}

#[async_trait]
impl BaseRepository<Post, i64> for PostgresPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.find_model(id).await?.map(Into::into))
    }

    /// UPDATE ... WHERE id = $1 AND slug = $2. A row that exists under
    /// another slug is a constraint violation, not a rename.
    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let id = entity.id;
        let slug = entity.slug.clone();
        let active_model: post::ActiveModel = entity.into();

        let updated = PostEntity::update(active_model)
            .filter(post::Column::Slug.eq(slug.as_str()))
            .exec(&self.db)
            .await;

        match updated {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => match self.find_model(id).await? {
                Some(_) => Err(RepoError::Constraint(format!(
                    "slug of post {id} cannot change"
                ))),
                None => Err(RepoError::NotFound),
            },
            Err(e) => Err(map_write_err(e)),
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_read_err)?;

        Ok(result.map(Into::into))
    }

    async fn count(&self, query: &SearchQuery) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(search_condition(query))
            .count(&self.db)
            .await
            .map_err(map_read_err)
    }

    async fn fetch(
        &self,
        query: &SearchQuery,
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(
            keyword = query.keyword().unwrap_or_default(),
            offset,
            ?limit,
            "Fetching posts"
        );

        let result = listing_select(query)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_read_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = post.into();
        let model = active_model.insert(&self.db).await.map_err(map_write_err)?;

        Ok(model.into())
    }
}
