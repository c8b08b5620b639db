//! Domain Entities
//!
//! Tools and the categories they are filed under.

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, ToolId};
use serde::{Deserialize, Serialize};

/// Price points as advertised by the vendor, kept verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_tier: Option<String>,
}

/// Tool entity - one AI product listed in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Category name, not id
    pub category: Option<String>,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    pub pricing_free: bool,
    /// `free`, `freemium` or `paid`
    pub pricing_tier: Option<String>,
    pub pricing_details: Option<PricingDetails>,
    pub features: Vec<String>,
    pub use_cases: Vec<String>,
    pub tags: Vec<String>,
    pub popularity_score: i32,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Tool {
    /// Create a tool with empty optional data
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ToolId::new(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            category: None,
            website_url: None,
            logo_url: None,
            pricing_free: false,
            pricing_tier: None,
            pricing_details: None,
            features: Vec::new(),
            use_cases: Vec::new(),
            tags: Vec::new(),
            popularity_score: 0,
            last_updated: now,
            created_at: now,
        }
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, slug: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            slug: slug.into(),
            description,
        }
    }
}
