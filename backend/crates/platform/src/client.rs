//! Client identification utilities
//!
//! Derives the rate limit key for a request from proxy headers.

use axum::http::HeaderMap;

/// Key used when no header identifies the client.
/// All such requests share one bucket.
pub const UNKNOWN_CLIENT: &str = "unknown";

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Derive the client key for rate limiting
///
/// ## Order
/// 1. First entry of `X-Forwarded-For` (trimmed, non-empty)
/// 2. `X-Real-IP` (trimmed, non-empty)
/// 3. [`UNKNOWN_CLIENT`]
///
/// Header values are taken as-is, not parsed as IP addresses; a proxy that
/// forwards something odd still yields a stable key.
pub fn client_key(headers: &HeaderMap) -> String {
    if let Some(first) = header_str(headers, X_FORWARDED_FOR)
        .and_then(|xff| xff.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return first.to_string();
    }

    if let Some(real_ip) = header_str(headers, X_REAL_IP)
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return real_ip.to_string();
    }

    UNKNOWN_CLIENT.to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
