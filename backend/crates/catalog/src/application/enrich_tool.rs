//! Enrich Tool Use Case
//!
//! Pulls the tool's landing page and folds its metadata into the listing:
//! a better description and, when the tool has none, a logo from `og:image`.

use crate::domain::repository::{ToolRepository, WebsiteFetcher};
use crate::domain::website::{
    WebsiteInfo, enhanced_description, extract_pricing_from_text, parse_website_info,
};
use crate::error::{CatalogError, CatalogResult};
use std::sync::Arc;

/// Output of enrichment
#[derive(Debug, Clone)]
pub struct EnrichOutput {
    pub slug: String,
    pub description: String,
    pub logo_url: Option<String>,
    /// Whether description or logo changed
    pub updated: bool,
    /// Price hint found on the page, informational only
    pub pricing_hint: Option<String>,
    pub website: WebsiteInfo,
}

/// Enrich Tool Use Case
pub struct EnrichToolUseCase<R, F>
where
    R: ToolRepository,
    F: WebsiteFetcher,
{
    repo: Arc<R>,
    fetcher: Arc<F>,
}

impl<R, F> EnrichToolUseCase<R, F>
where
    R: ToolRepository,
    F: WebsiteFetcher,
{
    pub fn new(repo: Arc<R>, fetcher: Arc<F>) -> Self {
        Self { repo, fetcher }
    }

    pub async fn execute(&self, slug: &str) -> CatalogResult<EnrichOutput> {
        let tool = self
            .repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| CatalogError::ToolNotFound(slug.to_string()))?;

        let url = tool
            .website_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| CatalogError::MissingWebsite(slug.to_string()))?;

        let html = self.fetcher.fetch_html(url).await?;
        let info = parse_website_info(&html);

        let original = tool.description.as_deref().unwrap_or_default();
        let description = enhanced_description(original, Some(&info));
        let logo_url = tool.logo_url.clone().or_else(|| info.og_image.clone());

        let updated = description != original || logo_url != tool.logo_url;
        if updated {
            let stored = self
                .repo
                .update_enrichment(slug, &description, logo_url.as_deref())
                .await?;
            if !stored {
                return Err(CatalogError::ToolNotFound(slug.to_string()));
            }
        }

        let pricing_hint = info
            .description
            .as_deref()
            .and_then(extract_pricing_from_text)
            .or_else(|| extract_pricing_from_text(&html));

        tracing::info!(
            slug = %slug,
            url = %url,
            updated = updated,
            "Enriched tool from website"
        );

        Ok(EnrichOutput {
            slug: slug.to_string(),
            description,
            logo_url,
            updated,
            pricing_hint,
            website: info,
        })
    }
}
