//! Error Kind
//!
//! [`ErrorKind`] is the single place where an error category meets its HTTP
//! status code and reason phrase.

use serde::Serialize;

/// Error categories the backend can answer with.
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::TooManyRequests.status_code(), 429);
/// assert_eq!(ErrorKind::NotFound.as_str(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed input or failed validation
    BadRequest,
    /// Missing or wrong admin secret
    Unauthorized,
    /// Unknown tool, category or post
    NotFound,
    /// Unique constraint hit
    Conflict,
    /// Well-formed request the stored data cannot satisfy (tool has no website)
    UnprocessableEntity,
    TooManyRequests,
    InternalServerError,
    /// A tool's website could not be fetched
    BadGateway,
    /// Database unreachable or pool exhausted
    ServiceUnavailable,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::InternalServerError => 500,
            ErrorKind::BadGateway => 502,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// Reason phrase, used as the problem `title`
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::BadGateway => "Bad Gateway",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// 5xx; logged at error level by the domain crates
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let expected = [
            (ErrorKind::BadRequest, 400),
            (ErrorKind::Unauthorized, 401),
            (ErrorKind::NotFound, 404),
            (ErrorKind::Conflict, 409),
            (ErrorKind::UnprocessableEntity, 422),
            (ErrorKind::TooManyRequests, 429),
            (ErrorKind::InternalServerError, 500),
            (ErrorKind::BadGateway, 502),
            (ErrorKind::ServiceUnavailable, 503),
        ];
        for (kind, code) in expected {
            assert_eq!(kind.status_code(), code, "{kind}");
        }
    }

    #[test]
    fn test_server_errors() {
        assert!(ErrorKind::BadGateway.is_server_error());
        assert!(!ErrorKind::TooManyRequests.is_server_error());
        assert_eq!(ErrorKind::TooManyRequests.to_string(), "Too Many Requests");
    }
}
