//! List Tools Use Case
//!
//! Search, category and full listings share one pipeline:
//! source -> pricing filter -> sort -> page. Storage failures degrade to an
//! empty result instead of an error; the output says so.

use crate::application::config::CatalogConfig;
use crate::domain::entities::{Category, Tool};
use crate::domain::repository::{CategoryRepository, ToolRepository};
use crate::domain::services::{
    CategoryCount, apply_pricing_filter, category_counts, paginate, sort_tools,
};
use crate::domain::value_objects::{Page, PageNumber, PricingFilter, ToolSort};
use std::sync::Arc;

/// Input for listing tools
#[derive(Debug, Clone, Default)]
pub struct ListToolsInput {
    pub search: Option<String>,
    pub category: Option<String>,
    pub pricing: Option<PricingFilter>,
    pub sort: ToolSort,
    pub page: PageNumber,
}

/// Output of listing tools
#[derive(Debug, Clone)]
pub struct ListToolsOutput {
    pub page: Page<Tool>,
    /// Size of the whole catalogue, regardless of filters
    pub total_tools: usize,
    pub categories: Vec<CategoryCount>,
    /// Some storage call failed; the result may be incomplete
    pub degraded: bool,
}

/// List Tools Use Case
pub struct ListToolsUseCase<R>
where
    R: ToolRepository + CategoryRepository,
{
    repo: Arc<R>,
    config: Arc<CatalogConfig>,
}

impl<R> ListToolsUseCase<R>
where
    R: ToolRepository + CategoryRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CatalogConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ListToolsInput) -> ListToolsOutput {
        let mut degraded = false;

        let categories = match self.repo.list_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load categories for tool listing");
                degraded = true;
                Vec::new()
            }
        };

        let (all_tools, all_degraded) = self.all_tools_with_fallback(&categories).await;
        degraded |= all_degraded;

        let search = input.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let category = input.category.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let source = if let Some(query) = search {
            self.repo.search(query).await
        } else if let Some(category) = category {
            self.repo.list_by_category(category).await
        } else {
            Ok(all_tools.clone())
        };

        let tools = match source {
            Ok(tools) => tools,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    search = ?search,
                    category = ?category,
                    "Failed to load tools for listing"
                );
                degraded = true;
                Vec::new()
            }
        };

        let mut tools = apply_pricing_filter(tools, input.pricing);
        sort_tools(&mut tools, input.sort);
        let page = paginate(&tools, input.page, self.config.tools_per_page);

        tracing::debug!(
            matched = page.total_items,
            page = page.page,
            total_tools = all_tools.len(),
            degraded = degraded,
            "Listed tools"
        );

        ListToolsOutput {
            page,
            total_tools: all_tools.len(),
            categories: category_counts(&categories, &all_tools),
            degraded,
        }
    }

    /// Every tool; when the full listing fails or comes back empty while
    /// categories exist, concatenate the per-category listings instead
    async fn all_tools_with_fallback(&self, categories: &[Category]) -> (Vec<Tool>, bool) {
        match self.repo.list_all().await {
            Ok(tools) if !tools.is_empty() || categories.is_empty() => (tools, false),
            Ok(_) => {
                tracing::info!("Full tool listing empty, falling back to per-category listing");
                (self.tools_by_categories(categories).await, false)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Full tool listing failed, falling back to per-category listing");
                (self.tools_by_categories(categories).await, true)
            }
        }
    }

    async fn tools_by_categories(&self, categories: &[Category]) -> Vec<Tool> {
        let mut tools = Vec::new();
        for category in categories {
            match self.repo.list_by_category(&category.name).await {
                Ok(found) => tools.extend(found),
                Err(e) => {
                    tracing::warn!(error = %e, category = %category.name, "Category listing failed");
                }
            }
        }
        tracing::info!(tools = tools.len(), "Fetched tools by category");
        tools
    }
}
