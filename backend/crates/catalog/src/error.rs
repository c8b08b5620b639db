//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, database::database_error, kind::ErrorKind};
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No tool with this slug
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Comparison requested without any tool
    #[error("Select at least one tool to compare")]
    NoToolsSelected,

    /// Comparison requested with more tools than allowed
    #[error("You can compare up to {max} tools at once (got {requested})")]
    TooManyTools { max: usize, requested: usize },

    /// Tool cannot be enriched because it has no website
    #[error("Tool has no website URL: {0}")]
    MissingWebsite(String),

    /// Fetching the tool's website failed
    #[error("Website fetch failed: {0}")]
    Upstream(String),

    /// Built-in seed dataset is malformed
    #[error("Invalid seed data: {0}")]
    SeedData(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::ToolNotFound(_) => ErrorKind::NotFound,
            CatalogError::NoToolsSelected | CatalogError::TooManyTools { .. } => {
                ErrorKind::BadRequest
            }
            CatalogError::MissingWebsite(_) => ErrorKind::UnprocessableEntity,
            CatalogError::Upstream(_) => ErrorKind::BadGateway,
            CatalogError::SeedData(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
            CatalogError::Database(_) => self.to_app_error().kind(),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::SeedData(e) => {
                tracing::error!(error = %e, "Catalog seed data error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::Upstream(msg) => {
                tracing::warn!(message = %msg, "Catalog upstream error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }

    /// Convert to the unified error, keeping a client-safe message
    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::Database(e) => database_error(e),
            CatalogError::SeedData(_) | CatalogError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            CatalogError::TooManyTools { .. } => AppError::bad_request(self.to_string())
                .with_action("Remove tools from the comparison"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for CatalogError {
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
            CatalogError::ToolNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::NoToolsSelected.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::TooManyTools { max: 4, requested: 5 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::Upstream("timeout".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            CatalogError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            CatalogError::Database(sqlx::Error::Protocol("unexpected".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = CatalogError::Internal("pool handle poisoned".into()).to_app_error();
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn test_malformed_seed_json_converts() {
        fn parse(raw: &str) -> CatalogResult<Vec<String>> {
            Ok(serde_json::from_str(raw)?)
        }

        let err = parse("[\"ChatGPT\",").unwrap_err();
        assert!(matches!(err, CatalogError::SeedData(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }
}
