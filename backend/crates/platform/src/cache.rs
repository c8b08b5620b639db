//! Conditional-response helpers
//!
//! Content fingerprints for `ETag`, `If-None-Match` matching and the
//! `Cache-Control` values used by the public JSON endpoints.
//!
//! The fingerprint is a rolling multiplicative hash (`h = h * 31 + byte`).
//! It detects changes, nothing more; collisions only cost a stale 304.

use axum::Json;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Fingerprint of a byte sequence as 16 lowercase hex digits
///
/// Deterministic and order-sensitive.
pub fn fingerprint(bytes: &[u8]) -> String {
    let hash = bytes.iter().fold(0u64, |h, &b| {
        h.wrapping_mul(31).wrapping_add(u64::from(b))
    });
    format!("{:016x}", hash)
}

/// Wrap a fingerprint in double quotes, the `ETag` wire format
pub fn quote_etag(fp: &str) -> String {
    format!("\"{}\"", fp)
}

/// Quoted `ETag` of a value's JSON serialisation
///
/// `None` when serialisation fails; callers then skip the cache path.
pub fn etag_for<T: Serialize + ?Sized>(value: &T) -> Option<String> {
    match serde_json::to_vec(value) {
        Ok(bytes) => Some(quote_etag(&fingerprint(&bytes))),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialise response for ETag");
            None
        }
    }
}

/// Whether the client's validator equals the current one
///
/// Exact comparison; weak validators and lists are not interpreted.
pub fn matches(supplied: Option<&str>, current: &str) -> bool {
    supplied.is_some_and(|s| s == current)
}

/// Shared-cache policy for public responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub max_age_secs: u32,
    pub stale_while_revalidate_secs: u32,
}

impl Default for CachePolicy {
    /// One hour fresh, one day stale-while-revalidate
    fn default() -> Self {
        Self {
            max_age_secs: 3600,
            stale_while_revalidate_secs: 86400,
        }
    }
}

impl CachePolicy {
    pub const fn new(max_age_secs: u32, stale_while_revalidate_secs: u32) -> Self {
        Self {
            max_age_secs,
            stale_while_revalidate_secs,
        }
    }

    pub fn header_value(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate={}, max-age={}",
            self.max_age_secs, self.stale_while_revalidate_secs, self.max_age_secs
        )
    }
}

/// `Cache-Control` for responses that must not be stored
pub const NO_CACHE: &str = "no-cache";

/// JSON response honouring `If-None-Match`
///
/// 304 with `ETag` and `Cache-Control` when the client's validator matches,
/// otherwise 200 with the body and the same headers. When no `ETag` can be
/// computed the body is still served, without validators.
pub fn cached_json<T: Serialize>(request_headers: &HeaderMap, data: T, policy: CachePolicy) -> Response {
    let cache_control = policy.header_value();

    let Some(etag) = etag_for(&data) else {
        return (
            [(header::CACHE_CONTROL, cache_control)],
            Json(data),
        )
            .into_response();
    };

    let supplied = request_headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok());

    let mut response = if matches(supplied, &etag) {
        StatusCode::NOT_MODIFIED.into_response()
    } else {
        Json(data).into_response()
    };

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, value);
    }
    if let Ok(value) = HeaderValue::from_str(&cache_control) {
        headers.insert(header::CACHE_CONTROL, value);
    }
    response
}

/// Empty JSON array marked uncacheable, served when the store is unavailable
pub fn empty_list_no_cache() -> Response {
    (
        [(header::CACHE_CONTROL, NO_CACHE)],
        Json(Vec::<serde_json::Value>::new()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fingerprint_is_deterministic_and_fixed_width() {
        let a = fingerprint(b"[{\"slug\":\"chatgpt\"}]");
        let b = fingerprint(b"[{\"slug\":\"chatgpt\"}]");
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_fingerprint_known_values() {
        assert_eq!(fingerprint(b""), "0000000000000000");
        // 'a' = 97
        assert_eq!(fingerprint(b"a"), format!("{:016x}", 97));
        // 97 * 31 + 98
        assert_eq!(fingerprint(b"ab"), format!("{:016x}", 97 * 31 + 98));
    }

    #[test]
    fn test_fingerprint_is_order_sensitive() {
        assert_ne!(fingerprint(b"ab"), fingerprint(b"ba"));
    }

    #[test]
    fn test_etag_for_is_quoted_fingerprint_of_json() {
        let value = json!({"title": "Hello"});
        let expected = quote_etag(&fingerprint(br#"{"title":"Hello"}"#));
        assert_eq!(etag_for(&value), Some(expected));
    }

    #[test]
    fn test_etag_changes_with_content() {
        let before = etag_for(&json!([{"slug": "a"}])).unwrap();
        let after = etag_for(&json!([{"slug": "a"}, {"slug": "b"}])).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_matches_is_exact() {
        assert!(matches(Some("\"abc\""), "\"abc\""));
        assert!(!matches(Some("abc"), "\"abc\""));
        assert!(!matches(Some("W/\"abc\""), "\"abc\""));
        assert!(!matches(None, "\"abc\""));
    }

    #[test]
    fn test_cache_policy_header_value() {
        assert_eq!(
            CachePolicy::default().header_value(),
            "public, s-maxage=3600, stale-while-revalidate=86400, max-age=3600"
        );
        assert_eq!(
            CachePolicy::new(60, 120).header_value(),
            "public, s-maxage=60, stale-while-revalidate=120, max-age=60"
        );
    }

    #[test]
    fn test_cached_json_serves_body_then_not_modified() {
        let data = json!([{"slug": "chatgpt"}]);
        let etag = etag_for(&data).unwrap();

        let fresh = cached_json(&HeaderMap::new(), data.clone(), CachePolicy::default());
        assert_eq!(fresh.status(), StatusCode::OK);
        assert_eq!(fresh.headers().get(header::ETAG).unwrap(), etag.as_str());

        let mut headers = HeaderMap::new();
        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_str(&etag).unwrap());
        let revalidated = cached_json(&headers, data, CachePolicy::default());
        assert_eq!(revalidated.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(revalidated.headers().get(header::ETAG).unwrap(), etag.as_str());
        assert_eq!(
            revalidated.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, s-maxage=3600, stale-while-revalidate=86400, max-age=3600"
        );
    }

    #[test]
    fn test_cached_json_stale_validator_gets_full_body() {
        let mut headers = HeaderMap::new();
        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("\"0000000000000000\""));
        let response = cached_json(&headers, json!({"k": 1}), CachePolicy::default());
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_empty_list_no_cache() {
        let response = empty_list_no_cache();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), NO_CACHE);
    }
}
