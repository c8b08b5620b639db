//! Blog Error Types
//!
//! Blog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::CatalogError;
use kernel::error::{app_error::AppError, database::database_error, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// No published post with this slug
    #[error("Post not found: {0}")]
    PostNotFound(String),

    /// Referenced tool does not exist
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Request is missing required data
    #[error("{0}")]
    Validation(String),

    /// `published_at` is neither a keyword nor a date
    #[error("Invalid published_at value: {0}")]
    InvalidPublishDate(String),

    /// Error from the tool catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::PostNotFound(_) | BlogError::ToolNotFound(_) => ErrorKind::NotFound,
            BlogError::Validation(_) | BlogError::InvalidPublishDate(_) => ErrorKind::BadRequest,
            BlogError::Catalog(e) => e.kind(),
            BlogError::Database(_) => self.to_app_error().kind(),
            BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::Catalog(e) if e.kind().is_server_error() => {
                tracing::error!(error = %e, "Blog catalog error");
            }
            BlogError::Validation(msg) => {
                tracing::warn!(message = %msg, "Blog validation error");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }

    /// Convert to the unified error, keeping a client-safe message
    pub fn to_app_error(&self) -> AppError {
        match self {
            BlogError::Database(e) => database_error(e),
            BlogError::Catalog(e) => e.to_app_error(),
            BlogError::Internal(_) => AppError::internal("Internal server error"),
            BlogError::InvalidPublishDate(_) => AppError::bad_request(self.to_string())
                .with_action("Use \"now\", \"schedule\", \"draft\", an RFC 3339 timestamp or YYYY-MM-DD"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl From<BlogError> for AppError {
    fn from(err: BlogError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            BlogError::PostNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BlogError::Validation("Title and content_html are required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BlogError::InvalidPublishDate("tomorrow".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BlogError::Catalog(CatalogError::ToolNotFound("x".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BlogError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let err = BlogError::Validation("Title and content_html are required".into());
        assert_eq!(err.to_app_error().message(), "Title and content_html are required");
    }
}
