//! Domain Value Objects
//!
//! Listing parameters parsed from query strings. Unknown values never fail;
//! they fall back to "no filter", the default sort or the first page.

use serde::Serialize;

/// Pricing filter for tool listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingFilter {
    /// `pricing_free == true`
    Free,
    /// `pricing_tier == "paid"`
    Paid,
    /// `pricing_tier == "freemium"`
    Freemium,
}

impl PricingFilter {
    /// `None` for absent or unrecognised values
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw? {
            "free" => Some(Self::Free),
            "paid" => Some(Self::Paid),
            "freemium" => Some(Self::Freemium),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid => "paid",
            Self::Freemium => "freemium",
        }
    }
}

/// Sort order for tool listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolSort {
    /// Name, case-insensitive
    Name,
    Newest,
    Oldest,
    /// Popularity score descending, newest first on ties
    #[default]
    Popularity,
}

impl ToolSort {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("name") => Self::Name,
            Some("newest") => Self::Newest,
            Some("oldest") => Self::Oldest,
            _ => Self::Popularity,
        }
    }
}

/// 1-based page number
///
/// Missing, unparsable or non-positive input is page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumber(u32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|&n| n >= 1)
            .map(|n| Self(u32::try_from(n).unwrap_or(u32::MAX)))
            .unwrap_or(Self::FIRST)
    }

    pub fn new(page: u32) -> Self {
        Self(page.max(1))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// One page of a larger result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_filter_parse() {
        assert_eq!(PricingFilter::parse(Some("free")), Some(PricingFilter::Free));
        assert_eq!(PricingFilter::parse(Some("paid")), Some(PricingFilter::Paid));
        assert_eq!(
            PricingFilter::parse(Some("freemium")),
            Some(PricingFilter::Freemium)
        );
        assert_eq!(PricingFilter::parse(Some("cheap")), None);
        assert_eq!(PricingFilter::parse(None), None);
    }

    #[test]
    fn test_tool_sort_parse_defaults_to_popularity() {
        assert_eq!(ToolSort::parse(Some("name")), ToolSort::Name);
        assert_eq!(ToolSort::parse(Some("newest")), ToolSort::Newest);
        assert_eq!(ToolSort::parse(Some("oldest")), ToolSort::Oldest);
        assert_eq!(ToolSort::parse(Some("rating")), ToolSort::Popularity);
        assert_eq!(ToolSort::parse(None), ToolSort::Popularity);
    }

    #[test]
    fn test_page_number_parse() {
        assert_eq!(PageNumber::parse(Some("3")).get(), 3);
        assert_eq!(PageNumber::parse(Some("0")).get(), 1);
        assert_eq!(PageNumber::parse(Some("-2")).get(), 1);
        assert_eq!(PageNumber::parse(Some("two")).get(), 1);
        assert_eq!(PageNumber::parse(None).get(), 1);
        assert_eq!(PageNumber::new(0).get(), 1);
    }
}
