//! Database errors as client-facing errors
//!
//! Postgres error codes: <https://www.postgresql.org/docs/current/errcodes-appendix.html>

use super::app_error::AppError;

/// Classify a `sqlx` error without exposing its details
pub fn database_error(err: &sqlx::Error) -> AppError {
    match err {
        sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            AppError::service_unavailable("Database is temporarily unavailable")
        }
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") => AppError::conflict("Duplicate key value"),
            Some("23502" | "23514") => AppError::bad_request("Invalid data"),
            Some("53000" | "53100" | "53200" | "53300" | "57P01" | "57P02" | "57P03") => {
                AppError::service_unavailable("Database is temporarily unavailable")
            }
            _ => AppError::internal("Database error"),
        },
        _ => AppError::internal("Database error"),
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        database_error(&err).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_classification() {
        assert_eq!(
            database_error(&sqlx::Error::PoolTimedOut).kind(),
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(database_error(&sqlx::Error::RowNotFound).kind(), ErrorKind::NotFound);
        assert_eq!(
            database_error(&sqlx::Error::Protocol("bad frame".into())).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_conversion_keeps_source() {
        use std::error::Error;
        let err = AppError::from(sqlx::Error::PoolClosed);
        assert!(err.source().is_some());
        assert_eq!(err.message(), "Database is temporarily unavailable");
    }
}
