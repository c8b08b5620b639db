//! Application Configuration

use crate::domain::value_objects::ScheduleRules;
use platform::cache::CachePolicy;

/// Blog application configuration
#[derive(Debug, Clone)]
pub struct BlogConfig {
    /// Site name used in page titles
    pub site_name: String,
    /// Auto-scheduling of new posts
    pub schedule: ScheduleRules,
    /// Cache policy of the public endpoints
    pub cache_policy: CachePolicy,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            site_name: "aItoolfinder".to_string(),
            schedule: ScheduleRules::default(),
            cache_policy: CachePolicy::default(),
        }
    }
}

impl BlogConfig {
    pub fn with_site_name(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            ..Default::default()
        }
    }
}
