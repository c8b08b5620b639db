//! API DTOs (Data Transfer Objects)

use crate::application::enrich_tool::EnrichOutput;
use crate::application::get_tool::ToolDetail;
use crate::application::list_tools::ListToolsOutput;
use crate::application::seed_catalog::SeedOutput;
use crate::domain::entities::Tool;
use crate::domain::services::{CategoryCount, ToolMetadata};
use crate::domain::website::WebsiteInfo;
use serde::{Deserialize, Serialize};

/// Query for GET /api/tools
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub pricing: Option<String>,
    /// Kept as text so a bad value falls back to page 1 instead of a 400
    pub page: Option<String>,
}

/// Response for GET /api/tools
#[derive(Debug, Clone, Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<Tool>,
    pub page: u32,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub total_tools: usize,
    pub categories: Vec<CategoryCount>,
}

impl From<ListToolsOutput> for ToolListResponse {
    fn from(output: ListToolsOutput) -> Self {
        Self {
            page: output.page.page,
            per_page: output.page.per_page,
            total_pages: output.page.total_pages,
            total_items: output.page.total_items,
            tools: output.page.items,
            total_tools: output.total_tools,
            categories: output.categories,
        }
    }
}

/// Response for GET /api/tools/{slug}
#[derive(Debug, Clone, Serialize)]
pub struct ToolDetailResponse {
    pub tool: Tool,
    pub related_tools: Vec<Tool>,
    pub pricing_label: String,
    pub metadata: ToolMetadata,
}

impl From<ToolDetail> for ToolDetailResponse {
    fn from(detail: ToolDetail) -> Self {
        Self {
            tool: detail.tool,
            related_tools: detail.related_tools,
            pricing_label: detail.pricing_label,
            metadata: detail.metadata,
        }
    }
}

/// Query for GET /api/compare
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareQuery {
    pub slugs: Option<String>,
}

/// Response for POST /api/admin/seed
#[derive(Debug, Clone, Serialize)]
pub struct SeedResponse {
    pub success: bool,
    pub message: String,
    pub categories: usize,
    pub tools: usize,
}

impl From<SeedOutput> for SeedResponse {
    fn from(output: SeedOutput) -> Self {
        Self {
            success: true,
            message: format!(
                "Seeded {} categories and {} tools",
                output.categories, output.tools
            ),
            categories: output.categories,
            tools: output.tools,
        }
    }
}

/// Response for POST /api/admin/tools/{slug}/enrich
#[derive(Debug, Clone, Serialize)]
pub struct EnrichResponse {
    pub success: bool,
    pub slug: String,
    pub updated: bool,
    pub description: String,
    pub logo_url: Option<String>,
    pub pricing_hint: Option<String>,
    pub website: WebsiteInfo,
}

impl From<EnrichOutput> for EnrichResponse {
    fn from(output: EnrichOutput) -> Self {
        Self {
            success: true,
            slug: output.slug,
            updated: output.updated,
            description: output.description,
            logo_url: output.logo_url,
            pricing_hint: output.pricing_hint,
            website: output.website,
        }
    }
}
