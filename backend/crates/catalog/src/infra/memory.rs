//! In-memory repository
//!
//! Same ordering and matching rules as the Postgres repository, without a
//! database. Used by tests and for running the API against fixture data.

use crate::domain::entities::{Category, Tool};
use crate::domain::repository::{CategoryRepository, ToolRepository};
use crate::domain::services::{matches_search, sort_tools};
use crate::domain::value_objects::ToolSort;
use crate::error::CatalogResult;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryCatalogRepository {
    tools: Arc<RwLock<Vec<Tool>>>,
    categories: Arc<RwLock<Vec<Category>>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(tools: Vec<Tool>, categories: Vec<Category>) -> Self {
        Self {
            tools: Arc::new(RwLock::new(tools)),
            categories: Arc::new(RwLock::new(categories)),
        }
    }

    fn by_popularity(mut tools: Vec<Tool>) -> Vec<Tool> {
        sort_tools(&mut tools, ToolSort::Popularity);
        tools
    }
}

impl ToolRepository for InMemoryCatalogRepository {
    async fn list_all(&self) -> CatalogResult<Vec<Tool>> {
        Ok(Self::by_popularity(self.tools.read().await.clone()))
    }

    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<Tool>> {
        Ok(self.tools.read().await.iter().find(|t| t.slug == slug).cloned())
    }

    async fn find_by_slugs(&self, slugs: &[String]) -> CatalogResult<Vec<Tool>> {
        Ok(self
            .tools
            .read()
            .await
            .iter()
            .filter(|t| slugs.contains(&t.slug))
            .cloned()
            .collect())
    }

    async fn search(&self, query: &str) -> CatalogResult<Vec<Tool>> {
        let found = self
            .tools
            .read()
            .await
            .iter()
            .filter(|t| matches_search(t, query))
            .cloned()
            .collect();
        Ok(Self::by_popularity(found))
    }

    async fn list_by_category(&self, category: &str) -> CatalogResult<Vec<Tool>> {
        let found = self
            .tools
            .read()
            .await
            .iter()
            .filter(|t| t.in_category(category))
            .cloned()
            .collect();
        Ok(Self::by_popularity(found))
    }

    async fn upsert(&self, tool: &Tool) -> CatalogResult<()> {
        let mut tools = self.tools.write().await;
        match tools.iter_mut().find(|t| t.slug == tool.slug) {
            Some(existing) => {
                let (id, created_at) = (existing.id, existing.created_at);
                *existing = tool.clone();
                existing.id = id;
                existing.created_at = created_at;
            }
            None => tools.push(tool.clone()),
        }
        Ok(())
    }

    async fn update_enrichment(
        &self,
        slug: &str,
        description: &str,
        logo_url: Option<&str>,
    ) -> CatalogResult<bool> {
        let mut tools = self.tools.write().await;
        let Some(tool) = tools.iter_mut().find(|t| t.slug == slug) else {
            return Ok(false);
        };

        tool.description = Some(description.to_string());
        if let Some(logo) = logo_url {
            tool.logo_url = Some(logo.to_string());
        }
        tool.last_updated = Utc::now();
        Ok(true)
    }
}

impl CategoryRepository for InMemoryCatalogRepository {
    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let mut categories = self.categories.read().await.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn upsert_category(&self, category: &Category) -> CatalogResult<()> {
        let mut categories = self.categories.write().await;
        match categories.iter_mut().find(|c| c.slug == category.slug) {
            Some(existing) => {
                existing.name = category.name.clone();
                existing.description = category.description.clone();
            }
            None => categories.push(category.clone()),
        }
        Ok(())
    }
}
