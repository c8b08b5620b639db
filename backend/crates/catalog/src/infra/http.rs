//! Website fetcher backed by `reqwest`

use crate::application::config::CatalogConfig;
use crate::domain::repository::WebsiteFetcher;
use crate::error::{CatalogError, CatalogResult};
use reqwest::header::ACCEPT;

/// Fetches landing pages over HTTPS
#[derive(Clone)]
pub struct HttpWebsiteFetcher {
    client: reqwest::Client,
}

impl HttpWebsiteFetcher {
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.website_fetch_timeout)
            .user_agent(config.website_user_agent.clone())
            .build()
            .map_err(|e| CatalogError::Internal(format!("HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl WebsiteFetcher for HttpWebsiteFetcher {
    async fn fetch_html(&self, url: &str) -> CatalogResult<String> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| CatalogError::Upstream(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Upstream(format!("{} returned {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| CatalogError::Upstream(format!("{}: {}", url, e)))
    }
}
