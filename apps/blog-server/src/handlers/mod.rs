//! HTTP handlers and route configuration.

mod api;
mod health;
mod pages;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
///
/// The API scope is registered first so `/api/...` never reaches the
/// slug route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("/", web::get().to(api::list_posts))
                    .route("/{slug}/", web::get().to(api::get_post)),
            ),
    )
    .route("/", web::get().to(pages::index))
    .route("/{slug}/", web::get().to(pages::detail))
    .default_service(web::to(pages::not_found));
}
