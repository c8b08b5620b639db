//! HTTP Handlers

use crate::application::compare_tools::CompareToolsUseCase;
use crate::application::config::CatalogConfig;
use crate::application::enrich_tool::EnrichToolUseCase;
use crate::application::get_tool::GetToolUseCase;
use crate::application::list_categories::ListCategoriesUseCase;
use crate::application::list_tools::{ListToolsInput, ListToolsUseCase};
use crate::application::seed_catalog::{SeedCatalogUseCase, SeedData};
use crate::domain::repository::{CatalogRepository, WebsiteFetcher};
use crate::domain::services::ToolComparison;
use crate::domain::value_objects::{PageNumber, PricingFilter, ToolSort};
use crate::error::CatalogResult;
use crate::presentation::dto::{
    CompareQuery, EnrichResponse, SeedResponse, ToolDetailResponse, ToolListQuery,
    ToolListResponse,
};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use platform::cache::{NO_CACHE, cached_json, empty_list_no_cache};
use std::sync::Arc;

/// Shared state for catalog handlers
pub struct CatalogAppState<R, F>
where
    R: CatalogRepository,
    F: WebsiteFetcher + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub fetcher: Arc<F>,
    pub config: Arc<CatalogConfig>,
}

impl<R, F> Clone for CatalogAppState<R, F>
where
    R: CatalogRepository,
    F: WebsiteFetcher + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            fetcher: self.fetcher.clone(),
            config: self.config.clone(),
        }
    }
}

/// GET /api/tools
pub async fn list_tools<R, F>(
    State(state): State<CatalogAppState<R, F>>,
    headers: HeaderMap,
    Query(query): Query<ToolListQuery>,
) -> Response
where
    R: CatalogRepository,
    F: WebsiteFetcher + Send + Sync + 'static,
{
    let input = ListToolsInput {
        search: query.search,
        category: query.category,
        pricing: PricingFilter::parse(query.pricing.as_deref()),
        sort: ToolSort::parse(query.sort.as_deref()),
        page: PageNumber::parse(query.page.as_deref()),
    };

    let use_case = ListToolsUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(input).await;

    if output.degraded {
        let body = ToolListResponse::from(output);
        return ([(header::CACHE_CONTROL, NO_CACHE)], Json(body)).into_response();
    }

    cached_json(
        &headers,
        ToolListResponse::from(output),
        state.config.cache_policy,
    )
}

/// GET /api/tools/{slug}
pub async fn get_tool<R, F>(
    State(state): State<CatalogAppState<R, F>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> CatalogResult<Response>
where
    R: CatalogRepository,
    F: WebsiteFetcher + Send + Sync + 'static,
{
    let use_case = GetToolUseCase::new(state.repo.clone(), state.config.clone());
    let detail = use_case.execute(&slug).await?;

    Ok(cached_json(
        &headers,
        ToolDetailResponse::from(detail),
        state.config.cache_policy,
    ))
}

/// GET /api/compare?slugs=a,b
pub async fn compare_tools<R, F>(
    State(state): State<CatalogAppState<R, F>>,
    Query(query): Query<CompareQuery>,
) -> CatalogResult<Json<ToolComparison>>
where
    R: CatalogRepository,
    F: WebsiteFetcher + Send + Sync + 'static,
{
    let use_case = CompareToolsUseCase::new(state.repo.clone(), state.config.clone());
    let comparison = use_case
        .execute(query.slugs.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(comparison))
}

/// GET /api/categories
///
/// Never fails: a storage error yields `[]` marked `no-cache`.
pub async fn list_categories<R, F>(State(state): State<CatalogAppState<R, F>>) -> Response
where
    R: CatalogRepository,
    F: WebsiteFetcher + Send + Sync + 'static,
{
    let use_case = ListCategoriesUseCase::new(state.repo.clone());

    match use_case.execute().await {
        Ok(categories) => (
            [(header::CACHE_CONTROL, state.config.cache_policy.header_value())],
            Json(categories),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching categories");
            empty_list_no_cache()
        }
    }
}

/// POST /api/admin/seed
pub async fn seed_catalog<R, F>(
    State(state): State<CatalogAppState<R, F>>,
) -> CatalogResult<Json<SeedResponse>>
where
    R: CatalogRepository,
    F: WebsiteFetcher + Send + Sync + 'static,
{
    let data = SeedData::builtin()?;
    let use_case = SeedCatalogUseCase::new(state.repo.clone());
    let output = use_case.execute(data).await?;

    Ok(Json(SeedResponse::from(output)))
}

/// POST /api/admin/tools/{slug}/enrich
pub async fn enrich_tool<R, F>(
    State(state): State<CatalogAppState<R, F>>,
    Path(slug): Path<String>,
) -> CatalogResult<Json<EnrichResponse>>
where
    R: CatalogRepository,
    F: WebsiteFetcher + Send + Sync + 'static,
{
    let use_case = EnrichToolUseCase::new(state.repo.clone(), state.fetcher.clone());
    let output = use_case.execute(&slug).await?;

    Ok(Json(EnrichResponse::from(output)))
}
