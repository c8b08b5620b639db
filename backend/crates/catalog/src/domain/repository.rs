//! Repository Traits
//!
//! Interfaces for data persistence and outbound fetches. Implementations are
//! in the infra layer.

use crate::domain::entities::{Category, Tool};
use crate::error::CatalogResult;

/// Tool repository trait
#[trait_variant::make(ToolRepository: Send)]
pub trait LocalToolRepository {
    /// All tools, most popular first (newest first on ties)
    async fn list_all(&self) -> CatalogResult<Vec<Tool>>;

    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<Tool>>;

    /// Tools whose slug is in `slugs`, in no particular order
    async fn find_by_slugs(&self, slugs: &[String]) -> CatalogResult<Vec<Tool>>;

    /// Name or description contains `query` (case-insensitive), or a tag
    /// equals it; most popular first
    async fn search(&self, query: &str) -> CatalogResult<Vec<Tool>>;

    /// Tools of one category name, most popular first
    async fn list_by_category(&self, category: &str) -> CatalogResult<Vec<Tool>>;

    /// Insert, or overwrite the tool with the same slug
    async fn upsert(&self, tool: &Tool) -> CatalogResult<()>;

    /// Store enriched website data; returns false when the slug is unknown
    async fn update_enrichment(
        &self,
        slug: &str,
        description: &str,
        logo_url: Option<&str>,
    ) -> CatalogResult<bool>;
}

/// Category repository trait
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    /// All categories by name
    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;

    /// Insert, or overwrite the category with the same slug
    async fn upsert_category(&self, category: &Category) -> CatalogResult<()>;
}

/// Fetches a tool's landing page
#[trait_variant::make(WebsiteFetcher: Send)]
pub trait LocalWebsiteFetcher {
    async fn fetch_html(&self, url: &str) -> CatalogResult<String>;
}

/// Everything the catalog handlers need from storage
pub trait CatalogRepository:
    ToolRepository + CategoryRepository + Clone + Send + Sync + 'static
{
}

impl<R> CatalogRepository for R where
    R: ToolRepository + CategoryRepository + Clone + Send + Sync + 'static
{
}
