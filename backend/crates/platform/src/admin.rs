//! Admin Guard
//!
//! Shared-secret protection for the `/admin` routes. The secret is accepted
//! as `Authorization: Bearer <secret>` or as a `?secret=` query parameter.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, Request, Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;

const BEARER_PREFIX: &str = "Bearer ";

/// Verifies the admin secret
///
/// Only the SHA-256 digest of the configured secret is kept. Digests are
/// compared in constant time, which also hides the secret's length.
pub struct AdminGuard {
    secret_digest: [u8; 32],
}

impl std::fmt::Debug for AdminGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGuard").finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct SecretQuery {
    secret: Option<String>,
}

impl AdminGuard {
    pub fn new(secret: &str) -> Self {
        Self {
            secret_digest: digest(secret),
        }
    }

    /// Check a presented secret
    pub fn verify(&self, presented: &str) -> bool {
        !presented.is_empty() && digests_equal(&digest(presented), &self.secret_digest)
    }

    /// Check the secret carried by a request (header first, then query)
    pub fn authorize(&self, headers: &HeaderMap, uri: &Uri) -> bool {
        presented_secret(headers, uri).is_some_and(|s| self.verify(&s))
    }
}

fn digest(secret: &str) -> [u8; 32] {
    Sha256::digest(secret.as_bytes()).into()
}

/// Every byte is visited regardless of where the first mismatch is
fn digests_equal(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn presented_secret(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(|s| s.trim().to_string());

    bearer.or_else(|| {
        Query::<SecretQuery>::try_from_uri(uri)
            .ok()
            .and_then(|Query(q)| q.secret)
    })
}

/// Middleware that rejects requests without the admin secret
pub async fn require_admin(
    State(guard): State<Arc<AdminGuard>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !guard.authorize(req.headers(), req.uri()) {
        tracing::warn!(path = %req.uri().path(), "Admin request rejected");

        let mut response = AppError::unauthorized("Unauthorized")
            .with_action("Provide the admin secret as a bearer token")
            .into_response();
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        return response;
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/seed", post(|| async { "seeded" }))
            .layer(axum::middleware::from_fn_with_state(
                Arc::new(AdminGuard::new("s3cret")),
                require_admin,
            ))
    }

    fn post_to(uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_digest_is_sha256() {
        assert_eq!(
            hex::encode(digest("hello")),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert!(digests_equal(&digest("a"), &digest("a")));
        assert!(!digests_equal(&digest("a"), &digest("b")));
    }

    #[test]
    fn test_verify() {
        let guard = AdminGuard::new("s3cret");
        assert!(guard.verify("s3cret"));
        assert!(!guard.verify("s3cre"));
        assert!(!guard.verify(""));
    }

    #[tokio::test]
    async fn test_bearer_token_accepted() {
        let response = app()
            .oneshot(post_to("/seed", Some("Bearer s3cret")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_query_secret_accepted() {
        let response = app().oneshot(post_to("/seed?secret=s3cret", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_or_wrong_secret_rejected() {
        let response = app().oneshot(post_to("/seed", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");

        let response = app()
            .oneshot(post_to("/seed", Some("Bearer wrong")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app()
            .oneshot(post_to("/seed", Some("Basic s3cret")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
