use actix_web::{App, http::StatusCode, test, web};
use chrono::{Duration, TimeZone, Utc};

use blog_core::domain::NewPost;
use blog_shared::{ErrorResponse, PostDetail, PostSummary};

use super::configure_routes;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

/// Publish posts in the given order, one minute apart.
async fn state_with(posts: &[(&str, &str, &str)]) -> AppState {
    let state = AppState::in_memory();
    let base = Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap();

    for (i, (slug, title, text)) in posts.iter().enumerate() {
        let post = NewPost::new(*slug, *title, *text)
            .unwrap()
            .created_at(base + Duration::minutes(i as i64));
        state.posts.publish(post).await.unwrap();
    }

    state
}

async fn numbered_state(n: usize) -> AppState {
    let slugs: Vec<String> = (1..=n).map(|i| format!("post-{i}")).collect();
    let posts: Vec<(&str, &str, &str)> = slugs
        .iter()
        .map(|s| (s.as_str(), "Example title", "This is an example text."))
        .collect();
    state_with(&posts).await
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

async fn get_body(state: AppState, uri: &str) -> (StatusCode, String) {
    let app = app!(state);
    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[actix_web::test]
async fn test_index_single_post() {
    let state = state_with(&[("single", "Single post", "")]).await;

    let (status, body) = get_body(state, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Single post"));
    assert!(body.contains(r#"name="keyword""#));
}

#[actix_web::test]
async fn test_index_empty_store() {
    let (status, body) = get_body(AppState::in_memory(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No posts to display."));
}

#[actix_web::test]
async fn test_index_paginates_newest_first() {
    let (status, body) = get_body(numbered_state(11).await, "/?page=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/post-11/""#));
    assert!(body.contains(r#"href="/post-2/""#));
    assert!(!body.contains(r#"href="/post-1/""#));
    assert!(body.contains(r#"href="/?page=2""#));

    let (status, body) = get_body(numbered_state(11).await, "/?page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/post-1/""#));
    assert!(!body.contains(r#"href="/post-2/""#));

    let (status, _) = get_body(numbered_state(11).await, "/?page=3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_index_last_page_token() {
    let (status, body) = get_body(numbered_state(11).await, "/?page=last").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/post-1/""#));
}

#[actix_web::test]
async fn test_index_invalid_page() {
    for uri in ["/?page=invalid", "/?page=0", "/?page=-1", "/?page=2"] {
        let (status, body) = get_body(numbered_state(1).await, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body.contains("404"), "{uri}");
    }
}

#[actix_web::test]
async fn test_index_repeated_params_use_last_value() {
    let (status, body) = get_body(numbered_state(11).await, "/?page=1&page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/post-1/""#));
    assert!(!body.contains(r#"href="/post-2/""#));

    let (status, _) = get_body(numbered_state(11).await, "/?page=1&page=9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let state = state_with(&[
        ("alpha", "Alpha", ""),
        ("beta", "Beta", ""),
    ])
    .await;
    let (status, body) = get_body(state, "/?keyword=alpha&keyword=beta").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/beta/""#));
    assert!(!body.contains(r#"href="/alpha/""#));
}

#[actix_web::test]
async fn test_index_filters_by_keyword() {
    let state = state_with(&[
        ("first-post", "First post", "This blog is opened."),
        ("second-post", "Second post", "This is the second post."),
        ("third-post", "Third post", "This is not the first post."),
        ("forth-post", "Dummy first post", "This is the forth post."),
        ("fifth-post", "Draft post", "The First post has been withdrawn."),
    ])
    .await;

    let (status, body) = get_body(state, "/?keyword=FIRST").await;

    assert_eq!(status, StatusCode::OK);
    for slug in ["first-post", "third-post", "forth-post", "fifth-post"] {
        assert!(body.contains(&format!(r#"href="/{slug}/""#)), "{slug}");
    }
    assert!(!body.contains(r#"href="/second-post/""#));
    assert!(body.contains(r#"value="FIRST""#));
}

#[actix_web::test]
async fn test_detail_page() {
    let state = state_with(&[("post", "Sample post", "Hello & welcome")]).await;

    let (status, body) = get_body(state, "/post/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sample post"));
    assert!(!body.contains("Hello & welcome"));
    assert!(body.contains("Hello &#38; welcome") || body.contains("Hello &amp; welcome"));
}

#[actix_web::test]
async fn test_detail_unknown_slug() {
    let (status, body) = get_body(AppState::in_memory(), "/post/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Not Found"));
}

#[actix_web::test]
async fn test_unmatched_route() {
    let (status, _) = get_body(AppState::in_memory(), "/no/such/page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_api_list_excludes_text() {
    let app = app!(numbered_state(3).await);

    let req = test::TestRequest::get().uri("/api/posts/").to_request();
    let raw: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let items = raw.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|item| item.get("text").is_none()));

    let req = test::TestRequest::get().uri("/api/posts/").to_request();
    let posts: Vec<PostSummary> = test::call_and_read_body_json(&app, req).await;
    let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["post-3", "post-2", "post-1"]);
}

#[actix_web::test]
async fn test_api_list_empty() {
    let app = app!(AppState::in_memory());

    let req = test::TestRequest::get().uri("/api/posts/").to_request();
    let posts: Vec<PostSummary> = test::call_and_read_body_json(&app, req).await;
    assert!(posts.is_empty());
}

#[actix_web::test]
async fn test_api_detail() {
    let app = app!(state_with(&[("post", "Sample post", "Full text")]).await);

    let req = test::TestRequest::get().uri("/api/posts/post/").to_request();
    let post: PostDetail = test::call_and_read_body_json(&app, req).await;

    assert_eq!(post.slug, "post");
    assert_eq!(post.title, "Sample post");
    assert_eq!(post.text, "Full text");
    assert!(post.created_at <= post.updated_at);
}

#[actix_web::test]
async fn test_api_detail_unknown_slug() {
    let app = app!(AppState::in_memory());

    let req = test::TestRequest::get().uri("/api/posts/post/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key("x-request-id"));

    let error: ErrorResponse = test::read_body_json(res).await;
    assert_eq!(error.status, 404);
    assert_eq!(error.title, "Not Found");
}

#[actix_web::test]
async fn test_health() {
    let app = app!(AppState::in_memory());

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}
