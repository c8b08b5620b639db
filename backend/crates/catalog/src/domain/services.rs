//! Domain Services
//!
//! Pure catalog logic: slugs, pricing labels, filtering, sorting,
//! pagination, related tools and comparisons.

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::entities::{Category, PricingDetails, Tool};
use crate::domain::value_objects::{Page, PageNumber, PricingFilter, ToolSort};
use crate::error::{CatalogError, CatalogResult};

/// URL slug from free text
///
/// Lowercases, drops everything except ASCII word characters, whitespace and
/// `-`, collapses runs of whitespace, `_` and `-` into one `-`, and trims
/// dashes from both ends.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.to_lowercase().trim().chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_dash = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        }
    }

    slug
}

/// Human-readable price label
pub fn format_pricing(details: Option<&PricingDetails>) -> String {
    let Some(details) = details else {
        return "Contact for pricing".to_string();
    };

    let non_empty = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);

    if let Some(monthly) = non_empty(&details.monthly) {
        format!("${}/month", monthly)
    } else if let Some(annual) = non_empty(&details.annual) {
        format!("${}/year", annual)
    } else if non_empty(&details.free_tier).is_some() {
        "Free tier available".to_string()
    } else {
        "Contact for pricing".to_string()
    }
}

/// Escape `ILIKE` wildcards so user input matches literally
pub fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Whether a tool matches a free-text search
///
/// Name or description contains the query (case-insensitive), or a tag
/// equals it exactly.
pub fn matches_search(tool: &Tool, query: &str) -> bool {
    let needle = query.to_lowercase();
    tool.name.to_lowercase().contains(&needle)
        || tool
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
        || tool.has_tag(query)
}

pub fn apply_pricing_filter(tools: Vec<Tool>, filter: Option<PricingFilter>) -> Vec<Tool> {
    let Some(filter) = filter else {
        return tools;
    };

    tools
        .into_iter()
        .filter(|t| match filter {
            PricingFilter::Free => t.pricing_free,
            PricingFilter::Paid | PricingFilter::Freemium => {
                t.pricing_tier.as_deref() == Some(filter.as_str())
            }
        })
        .collect()
}

/// Stable in-place sort
pub fn sort_tools(tools: &mut [Tool], sort: ToolSort) {
    match sort {
        ToolSort::Name => tools.sort_by_cached_key(|t| t.name.to_lowercase()),
        ToolSort::Newest => tools.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ToolSort::Oldest => tools.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        ToolSort::Popularity => tools.sort_by(|a, b| {
            b.popularity_score
                .cmp(&a.popularity_score)
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
    }
}

/// Cut one page out of `items`
///
/// A page past the end is empty but still reports the totals.
pub fn paginate<T: Clone>(items: &[T], page: PageNumber, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let start = (page.get() as usize - 1).saturating_mul(per_page);

    let items = items
        .iter()
        .skip(start)
        .take(per_page)
        .cloned()
        .collect();

    Page {
        items,
        page: page.get(),
        per_page,
        total_items,
        total_pages,
    }
}

/// Other tools sharing the category or at least one tag, in input order
pub fn related_tools(current: &Tool, all: &[Tool], limit: usize) -> Vec<Tool> {
    all.iter()
        .filter(|t| t.id != current.id && t.slug != current.slug)
        .filter(|t| {
            let same_category = current.category.is_some() && t.category == current.category;
            same_category || t.tags.iter().any(|tag| current.has_tag(tag))
        })
        .take(limit)
        .cloned()
        .collect()
}

/// Tool count of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// Tool count per category, in category order
pub fn category_counts(categories: &[Category], tools: &[Tool]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for category in tools.iter().filter_map(|t| t.category.as_deref()) {
        *counts.entry(category).or_default() += 1;
    }

    categories
        .iter()
        .map(|c| CategoryCount {
            name: c.name.clone(),
            slug: c.slug.clone(),
            count: counts.get(c.name.as_str()).copied().unwrap_or(0),
        })
        .collect()
}

/// Split a `a,b,c` slug list, trimming and dropping blanks and repeats
pub fn parse_slug_list(raw: &str) -> Vec<String> {
    let mut slugs: Vec<String> = Vec::new();
    for slug in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !slugs.iter().any(|s| s == slug) {
            slugs.push(slug.to_string());
        }
    }
    slugs
}

/// One column of a side-by-side comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub slug: String,
    pub name: String,
    pub category: Option<String>,
    pub pricing: String,
    pub pricing_free: bool,
    pub pricing_tier: Option<String>,
    pub features: Vec<String>,
    pub use_cases: Vec<String>,
    pub tags: Vec<String>,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    pub popularity_score: i32,
}

impl From<&Tool> for ComparisonEntry {
    fn from(tool: &Tool) -> Self {
        Self {
            slug: tool.slug.clone(),
            name: tool.name.clone(),
            category: tool.category.clone(),
            pricing: format_pricing(tool.pricing_details.as_ref()),
            pricing_free: tool.pricing_free,
            pricing_tier: tool.pricing_tier.clone(),
            features: tool.features.clone(),
            use_cases: tool.use_cases.clone(),
            tags: tool.tags.clone(),
            website_url: tool.website_url.clone(),
            logo_url: tool.logo_url.clone(),
            popularity_score: tool.popularity_score,
        }
    }
}

/// Side-by-side comparison of up to `max` tools
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolComparison {
    pub tools: Vec<ComparisonEntry>,
    /// Tags every compared tool carries
    pub shared_tags: Vec<String>,
}

impl ToolComparison {
    /// Build from tools in display order; repeats are dropped first
    pub fn build(tools: &[Tool], max: usize) -> CatalogResult<Self> {
        let mut unique: Vec<&Tool> = Vec::with_capacity(tools.len());
        for tool in tools {
            if !unique.iter().any(|t| t.slug == tool.slug) {
                unique.push(tool);
            }
        }

        if unique.is_empty() {
            return Err(CatalogError::NoToolsSelected);
        }
        if unique.len() > max {
            return Err(CatalogError::TooManyTools {
                max,
                requested: unique.len(),
            });
        }

        let shared_tags = unique[0]
            .tags
            .iter()
            .filter(|tag| unique[1..].iter().all(|t| t.has_tag(tag)))
            .cloned()
            .collect();

        Ok(Self {
            tools: unique.into_iter().map(ComparisonEntry::from).collect(),
            shared_tags,
        })
    }
}

/// SEO metadata for a tool page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolMetadata {
    pub title: String,
    pub description: String,
}

pub fn tool_metadata(tool: Option<&Tool>, site_name: &str) -> ToolMetadata {
    match tool {
        None => ToolMetadata {
            title: format!("Tool Not Found - {}", site_name),
            description: String::new(),
        },
        Some(tool) => ToolMetadata {
            title: format!("{} - {}", tool.name, site_name),
            description: tool
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| {
                    format!(
                        "Discover {}, a {} tool.",
                        tool.name,
                        tool.category.as_deref().unwrap_or("AI")
                    )
                }),
        },
    }
}
