//! Read-only JSON API over posts.

use actix_web::{HttpResponse, web};

use blog_core::domain::Post;
use blog_shared::{PostDetail, PostSummary};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_summary(post: Post) -> PostSummary {
    PostSummary {
        id: post.id,
        slug: post.slug,
        title: post.title,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn to_detail(post: Post) -> PostDetail {
    PostDetail {
        id: post.id,
        slug: post.slug,
        title: post.title,
        text: post.text,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// GET /api/posts/ - every post, newest first, without its text.
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;
    let body: Vec<PostSummary> = posts.into_iter().map(to_summary).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{slug}/
pub async fn get_post(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_slug(&slug).await?;

    Ok(HttpResponse::Ok().json(to_detail(post)))
}
