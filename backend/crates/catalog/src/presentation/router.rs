//! Catalog Router
//!
//! Public and admin routes are separate routers so the binary can put
//! different guards in front of each.

use crate::application::config::CatalogConfig;
use crate::domain::repository::{CatalogRepository, WebsiteFetcher};
use crate::error::CatalogResult;
use crate::infra::http::HttpWebsiteFetcher;
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Catalog routes, unguarded
pub struct CatalogRouters {
    /// `/tools`, `/tools/{slug}`, `/compare`, `/categories`
    pub public: Router,
    /// `/seed`, `/tools/{slug}/enrich`
    pub admin: Router,
}

/// Create the catalog routers with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository, config: CatalogConfig) -> CatalogResult<CatalogRouters> {
    let fetcher = HttpWebsiteFetcher::new(&config)?;
    Ok(catalog_router_generic(repo, fetcher, config))
}

/// Create catalog routers for any repository and fetcher implementation
pub fn catalog_router_generic<R, F>(repo: R, fetcher: F, config: CatalogConfig) -> CatalogRouters
where
    R: CatalogRepository,
    F: WebsiteFetcher + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        fetcher: Arc::new(fetcher),
        config: Arc::new(config),
    };

    let public = Router::new()
        .route("/tools", get(handlers::list_tools::<R, F>))
        .route("/tools/{slug}", get(handlers::get_tool::<R, F>))
        .route("/compare", get(handlers::compare_tools::<R, F>))
        .route("/categories", get(handlers::list_categories::<R, F>))
        .with_state(state.clone());

    let admin = Router::new()
        .route("/seed", post(handlers::seed_catalog::<R, F>))
        .route("/tools/{slug}/enrich", post(handlers::enrich_tool::<R, F>))
        .with_state(state);

    CatalogRouters { public, admin }
}
