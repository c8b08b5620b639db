//! Application Configuration
//!
//! Configuration for the catalog application layer.

use platform::cache::CachePolicy;
use std::time::Duration;

/// Catalog application configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Site name used in page titles
    pub site_name: String,
    /// Tools per listing page
    pub tools_per_page: usize,
    /// Related tools shown next to a tool
    pub related_tools_limit: usize,
    /// Most tools one comparison may hold
    pub max_compare_tools: usize,
    /// Timeout for fetching a tool's website
    pub website_fetch_timeout: Duration,
    /// User agent sent when fetching a tool's website
    pub website_user_agent: String,
    /// Cache policy of the public endpoints
    pub cache_policy: CachePolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            site_name: "aItoolfinder".to_string(),
            tools_per_page: 24,
            related_tools_limit: 4,
            max_compare_tools: 4,
            website_fetch_timeout: Duration::from_secs(10),
            website_user_agent: "Mozilla/5.0 (compatible; aItoolfinder/1.0)".to_string(),
            cache_policy: CachePolicy::default(),
        }
    }
}

impl CatalogConfig {
    pub fn with_site_name(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            ..Default::default()
        }
    }
}
