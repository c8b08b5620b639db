//! Compare Tools Use Case

use crate::application::config::CatalogConfig;
use crate::domain::repository::ToolRepository;
use crate::domain::services::{ToolComparison, parse_slug_list};
use crate::error::{CatalogError, CatalogResult};
use std::sync::Arc;

/// Compare Tools Use Case
pub struct CompareToolsUseCase<R>
where
    R: ToolRepository,
{
    repo: Arc<R>,
    config: Arc<CatalogConfig>,
}

impl<R> CompareToolsUseCase<R>
where
    R: ToolRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CatalogConfig>) -> Self {
        Self { repo, config }
    }

    /// `raw_slugs` is the comma separated `slugs` query value
    pub async fn execute(&self, raw_slugs: &str) -> CatalogResult<ToolComparison> {
        let slugs = parse_slug_list(raw_slugs);
        let max = self.config.max_compare_tools;

        if slugs.is_empty() {
            return Err(CatalogError::NoToolsSelected);
        }
        if slugs.len() > max {
            return Err(CatalogError::TooManyTools {
                max,
                requested: slugs.len(),
            });
        }

        let mut found = self.repo.find_by_slugs(&slugs).await?;

        // Requested order, every slug must resolve
        let mut ordered = Vec::with_capacity(slugs.len());
        for slug in &slugs {
            let idx = found
                .iter()
                .position(|t| &t.slug == slug)
                .ok_or_else(|| CatalogError::ToolNotFound(slug.clone()))?;
            ordered.push(found.swap_remove(idx));
        }

        ToolComparison::build(&ordered, max)
    }
}
