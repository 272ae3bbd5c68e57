//! Error handling - RFC 7807 JSON for the API, rendered pages for HTML routes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::DomainError;
use blog_shared::ErrorResponse;
use thiserror::Error;

use crate::views::{ErrorTemplate, TemplateRenderError, render_html};

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Client-facing detail. Internal details stay in the logs.
    fn public_detail(&self) -> Option<&str> {
        match self {
            AppError::NotFound(detail) | AppError::BadRequest(detail) | AppError::Conflict(detail) => {
                Some(detail.as_str())
            }
            AppError::Internal(_) => None,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "Not Found",
            AppError::BadRequest(_) => "Bad Request",
            AppError::Conflict(_) => "Conflict",
            AppError::Internal(_) => "Internal Server Error",
        }
    }

    fn log(&self) {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.log();

        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(_) => ErrorResponse::internal_error(),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, key } => {
                AppError::NotFound(format!("{} '{}' not found", entity_type, key))
            }
            DomainError::PageNotFound(msg) => AppError::NotFound(msg),
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<TemplateRenderError> for AppError {
    fn from(err: TemplateRenderError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// The same failures as [`AppError`], rendered as an HTML page.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct PageError(#[from] pub AppError);

impl From<DomainError> for PageError {
    fn from(err: DomainError) -> Self {
        PageError(err.into())
    }
}

impl From<TemplateRenderError> for PageError {
    fn from(err: TemplateRenderError) -> Self {
        PageError(err.into())
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        self.0.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        self.0.log();

        let status = self.status_code();
        let template = ErrorTemplate {
            status: status.as_u16(),
            title: self.0.title().to_string(),
            detail: self
                .0
                .public_detail()
                .unwrap_or("Something went wrong on our side.")
                .to_string(),
        };

        render_html(&template, status).unwrap_or_else(|e| {
            tracing::error!("Failed to render error page: {}", e);
            HttpResponse::build(status)
                .content_type("text/plain; charset=utf-8")
                .body(self.0.title())
        })
    }
}

/// Result type alias for JSON handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for HTML handlers.
pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_status() {
        let cases = [
            (DomainError::post_not_found("post"), StatusCode::NOT_FOUND),
            (
                DomainError::PageNotFound("page 3".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                DomainError::Validation("title".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::Duplicate("slug".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                DomainError::Internal("db down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = AppError::Internal("password=hunter2".to_string());
        assert_eq!(err.public_detail(), None);
    }
}
