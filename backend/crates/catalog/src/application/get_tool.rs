//! Get Tool Use Case

use crate::application::config::CatalogConfig;
use crate::domain::entities::Tool;
use crate::domain::repository::ToolRepository;
use crate::domain::services::{ToolMetadata, format_pricing, related_tools, tool_metadata};
use crate::error::{CatalogError, CatalogResult};
use std::sync::Arc;

/// Output DTO for a tool page
#[derive(Debug, Clone)]
pub struct ToolDetail {
    pub tool: Tool,
    pub related_tools: Vec<Tool>,
    pub pricing_label: String,
    pub metadata: ToolMetadata,
}

/// Get Tool Use Case
pub struct GetToolUseCase<R>
where
    R: ToolRepository,
{
    repo: Arc<R>,
    config: Arc<CatalogConfig>,
}

impl<R> GetToolUseCase<R>
where
    R: ToolRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CatalogConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, slug: &str) -> CatalogResult<ToolDetail> {
        let tool = self
            .repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| CatalogError::ToolNotFound(slug.to_string()))?;

        // Related tools are decoration; a failure leaves the list empty.
        let related = match self.repo.list_all().await {
            Ok(all) => related_tools(&tool, &all, self.config.related_tools_limit),
            Err(e) => {
                tracing::warn!(error = %e, slug = %slug, "Failed to load related tools");
                Vec::new()
            }
        };

        Ok(ToolDetail {
            pricing_label: format_pricing(tool.pricing_details.as_ref()),
            metadata: tool_metadata(Some(&tool), &self.config.site_name),
            related_tools: related,
            tool,
        })
    }
}
