//! Router Assembly
//!
//! Feature routers are mounted under `/api`. Public reads sit behind the
//! rate limiter, admin routes behind the admin guard.

use axum::{
    Json, Router,
    http::{self, Method, header},
    middleware,
    routing::get,
};
use blog::BlogRouters;
use catalog::CatalogRouters;
use platform::admin::{AdminGuard, require_admin};
use platform::middleware::{RateLimitState, enforce_rate_limit};
use platform::rate_limit::RateLimitStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Everything the HTTP surface is built from
pub struct AppParts<S> {
    pub catalog: CatalogRouters,
    pub blog: BlogRouters,
    pub rate_limit: RateLimitState<S>,
    pub admin_guard: Arc<AdminGuard>,
    pub frontend_origins: Vec<String>,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::IF_NONE_MATCH,
        ]))
        .expose_headers([
            header::ETAG,
            header::RETRY_AFTER,
            platform::middleware::X_RATELIMIT_LIMIT,
            platform::middleware::X_RATELIMIT_REMAINING,
            platform::middleware::X_RATELIMIT_RESET,
        ])
        .allow_credentials(true)
}

pub fn build_app<S>(parts: AppParts<S>) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let public = Router::new()
        .merge(parts.catalog.public)
        .merge(parts.blog.public)
        .layer(middleware::from_fn_with_state(
            parts.rate_limit,
            enforce_rate_limit::<S>,
        ));

    let admin = Router::new()
        .merge(parts.catalog.admin)
        .merge(parts.blog.admin)
        .layer(middleware::from_fn_with_state(
            parts.admin_guard,
            require_admin,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api/admin", admin)
        .nest("/api", public)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&parts.frontend_origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use blog::{BlogConfig, InMemoryBlogRepository, blog_router_generic};
    use catalog::domain::repository::WebsiteFetcher;
    use catalog::{CatalogConfig, CatalogResult, InMemoryCatalogRepository, catalog_router_generic};
    use platform::rate_limit::{FixedWindowRateLimiter, RateLimitConfig};
    use tower::ServiceExt;

    struct NoFetch;

    impl WebsiteFetcher for NoFetch {
        async fn fetch_html(&self, url: &str) -> CatalogResult<String> {
            Err(catalog::CatalogError::Upstream(format!("{url} unreachable")))
        }
    }

    fn app(max_requests: u32) -> Router {
        let tools = InMemoryCatalogRepository::new();
        build_app(AppParts {
            catalog: catalog_router_generic(tools.clone(), NoFetch, CatalogConfig::default()),
            blog: blog_router_generic(InMemoryBlogRepository::new(), tools, BlogConfig::default()),
            rate_limit: RateLimitState::new(
                Arc::new(FixedWindowRateLimiter::new()),
                RateLimitConfig::new(max_requests, 60),
            ),
            admin_guard: Arc::new(AdminGuard::new("s3cret")),
            frontend_origins: vec!["http://localhost:3000".to_string()],
        })
    }

    fn request(uri: &str, method: &str, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-for", "203.0.113.7");
        if let Some(secret) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {secret}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(10).oneshot(request("/health", "GET", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_routes_are_rate_limited() {
        let app = app(2);

        for uri in ["/api/tools", "/api/posts"] {
            let response = app.clone().oneshot(request(uri, "GET", None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert!(response.headers().contains_key("x-ratelimit-remaining"));
        }

        let denied = app.oneshot(request("/api/categories", "GET", None)).await.unwrap();
        assert_eq!(denied.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(denied.headers().contains_key(header::RETRY_AFTER));
    }

    #[tokio::test]
    async fn test_admin_routes_need_the_secret() {
        let app = app(10);

        let rejected = app
            .clone()
            .oneshot(request("/api/admin/seed", "POST", None))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);

        let seeded = app
            .clone()
            .oneshot(request("/api/admin/seed", "POST", Some("s3cret")))
            .await
            .unwrap();
        assert_eq!(seeded.status(), StatusCode::OK);

        let needing = app
            .oneshot(request("/api/admin/tools-needing-posts?secret=s3cret", "GET", None))
            .await
            .unwrap();
        assert_eq!(needing.status(), StatusCode::OK);
    }
}
