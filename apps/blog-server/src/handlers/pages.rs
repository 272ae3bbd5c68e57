//! HTML pages: the searchable listing and the post detail.

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use url::form_urlencoded;

use crate::middleware::error::{AppError, PageResult};
use crate::state::AppState;
use crate::views::{DetailTemplate, IndexTemplate, render_html};

/// Query parameters of the listing page. Both are optional and kept raw:
/// the keyword is matched literally and the page token is parsed by the
/// paginator. A repeated parameter keeps its last value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListingParams {
    pub keyword: Option<String>,
    pub page: Option<String>,
}

impl ListingParams {
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "keyword" => params.keyword = Some(value.into_owned()),
                "page" => params.page = Some(value.into_owned()),
                _ => {}
            }
        }
        params
    }
}

/// GET /?keyword=...&page=...
pub async fn index(state: web::Data<AppState>, req: HttpRequest) -> PageResult<HttpResponse> {
    let params = ListingParams::from_query(req.query_string());
    let keyword = params.keyword.as_deref();

    let page = state.posts.list_page(keyword, params.page.as_deref()).await?;

    Ok(render_html(&IndexTemplate::new(&page, keyword), StatusCode::OK)?)
}

/// GET /{slug}/
pub async fn detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> PageResult<HttpResponse> {
    let post = state.posts.get_by_slug(&slug).await?;

    Ok(render_html(&DetailTemplate::from(&post), StatusCode::OK)?)
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> PageResult<HttpResponse> {
    tracing::debug!(path = req.path(), "No route matched");
    Err(AppError::NotFound(format!("No page at {}", req.path())).into())
}
