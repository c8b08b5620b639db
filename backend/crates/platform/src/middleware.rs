//! Rate Limit Middleware
//!
//! Wires a [`RateLimitStore`] into a router with `from_fn_with_state`:
//!
//! ```ignore
//! let state = RateLimitState::new(limiter, RateLimitConfig::default());
//! let router = router.layer(axum::middleware::from_fn_with_state(
//!     state,
//!     enforce_rate_limit::<FixedWindowRateLimiter>,
//! ));
//! ```

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, SecondsFormat};
use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::client::client_key;
use crate::rate_limit::{RateLimitConfig, RateLimitResult, RateLimitStore};

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Middleware state
pub struct RateLimitState<S> {
    pub store: Arc<S>,
    pub config: Arc<RateLimitConfig>,
}

impl<S> RateLimitState<S> {
    pub fn new(store: Arc<S>, config: RateLimitConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

// Manual impl: the store itself need not be Clone.
impl<S> Clone for RateLimitState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

/// Middleware that counts the request against the client's window
///
/// Denied requests get 429 and never reach the handler. Allowed requests
/// pass through and the response, whatever its status, carries the
/// `X-RateLimit-*` headers.
pub async fn enforce_rate_limit<S>(
    State(state): State<RateLimitState<S>>,
    req: Request<Body>,
    next: Next,
) -> Response
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let key = client_key(req.headers());
    let result = state.store.check_and_increment(&key, &state.config).await;

    if !result.allowed {
        let retry_after = result.retry_after_secs(state.store.now_ms());
        tracing::debug!(
            key = %key,
            path = %req.uri().path(),
            retry_after = retry_after,
            "Request rejected by rate limiter"
        );

        let mut response = AppError::too_many_requests("Too many requests. Please try again later.")
            .with_action(format!("Retry after {} seconds", retry_after))
            .into_response();
        let headers = response.headers_mut();
        headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        apply_rate_limit_headers(headers, &result);
        return response;
    }

    let mut response = next.run(req).await;
    apply_rate_limit_headers(response.headers_mut(), &result);
    response
}

/// Insert `X-RateLimit-Limit`, `-Remaining` and `-Reset` (RFC 3339)
pub fn apply_rate_limit_headers(headers: &mut HeaderMap, result: &RateLimitResult) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(result.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(result.remaining));
    if let Some(value) = format_reset(result.reset_at_ms)
        .and_then(|reset| HeaderValue::from_str(&reset).ok())
    {
        headers.insert(X_RATELIMIT_RESET, value);
    }
}

fn format_reset(reset_at_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(reset_at_ms)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
}
