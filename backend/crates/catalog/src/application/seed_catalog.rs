//! Seed Catalog Use Case
//!
//! Upserts the built-in dataset. Running it twice leaves the catalogue
//! unchanged apart from `last_updated`.

use crate::domain::entities::{Category, PricingDetails, Tool};
use crate::domain::repository::{CategoryRepository, ToolRepository};
use crate::domain::services::slugify;
use crate::error::CatalogResult;
use serde::Deserialize;
use std::sync::Arc;

/// Built-in dataset
pub const SEED_CATALOG_JSON: &str = include_str!("../../seed/catalog.json");

#[derive(Debug, Deserialize)]
pub struct SeedData {
    pub categories: Vec<SeedCategory>,
    pub tools: Vec<SeedTool>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedTool {
    pub name: String,
    /// Derived from the name when absent
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub pricing_free: bool,
    #[serde(default)]
    pub pricing_tier: Option<String>,
    #[serde(default)]
    pub pricing_details: Option<PricingDetails>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub popularity_score: i32,
}

impl SeedData {
    pub fn parse(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn builtin() -> CatalogResult<Self> {
        Self::parse(SEED_CATALOG_JSON)
    }
}

impl From<SeedCategory> for Category {
    fn from(seed: SeedCategory) -> Self {
        let slug = slugify(&seed.name);
        Category::new(seed.name, slug, seed.description)
    }
}

impl From<SeedTool> for Tool {
    fn from(seed: SeedTool) -> Self {
        let slug = seed
            .slug
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&seed.name));
        let mut tool = Tool::new(seed.name, slug);
        tool.description = seed.description;
        tool.category = seed.category;
        tool.website_url = seed.website_url;
        tool.logo_url = seed.logo_url;
        tool.pricing_free = seed.pricing_free;
        tool.pricing_tier = seed.pricing_tier;
        tool.pricing_details = seed.pricing_details;
        tool.features = seed.features;
        tool.use_cases = seed.use_cases;
        tool.tags = seed.tags;
        tool.popularity_score = seed.popularity_score;
        tool
    }
}

/// Output of seeding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOutput {
    pub categories: usize,
    pub tools: usize,
}

/// Seed Catalog Use Case
pub struct SeedCatalogUseCase<R>
where
    R: ToolRepository + CategoryRepository,
{
    repo: Arc<R>,
}

impl<R> SeedCatalogUseCase<R>
where
    R: ToolRepository + CategoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, data: SeedData) -> CatalogResult<SeedOutput> {
        let mut output = SeedOutput {
            categories: 0,
            tools: 0,
        };

        for seed in data.categories {
            let category = Category::from(seed);
            self.repo.upsert_category(&category).await?;
            output.categories += 1;
        }

        for seed in data.tools {
            let tool = Tool::from(seed);
            self.repo.upsert(&tool).await?;
            output.tools += 1;
        }

        tracing::info!(
            categories = output.categories,
            tools = output.tools,
            "Seeded catalog"
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_seed_parses() {
        let data = SeedData::builtin().unwrap();
        assert!(!data.categories.is_empty());
        assert!(!data.tools.is_empty());

        // Every tool is filed under a seeded category
        for tool in &data.tools {
            let category = tool.category.as_deref().unwrap();
            assert!(
                data.categories.iter().any(|c| c.name == category),
                "{} has unknown category {}",
                tool.name,
                category
            );
        }
    }

    #[test]
    fn test_seed_tool_slug_defaults_to_name() {
        let seed: SeedTool = serde_json::from_str(r#"{"name": "Stable Diffusion XL"}"#).unwrap();
        let tool = Tool::from(seed);
        assert_eq!(tool.slug, "stable-diffusion-xl");
        assert!(tool.tags.is_empty());
    }

    #[test]
    fn test_invalid_seed_is_error() {
        assert!(SeedData::parse("{\"categories\": 3}").is_err());
    }
}
