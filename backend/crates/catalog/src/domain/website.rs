//! Website Metadata
//!
//! Extracts what a tool's landing page says about itself: `<title>`, the
//! meta description, keywords and the Open Graph image.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").expect("valid regex"));
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*name=["']description["'][^>]*content=["']([^"']+)["']"#)
        .expect("valid regex")
});
static OG_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*property=["']og:image["'][^>]*content=["']([^"']+)["']"#)
        .expect("valid regex")
});
static KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*name=["']keywords["'][^>]*content=["']([^"']+)["']"#)
        .expect("valid regex")
});

/// Price patterns, most specific first
static PRICE_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"(?i)\$(\d+)/month",
        r"(?i)\$(\d+)/mo",
        r"(?i)\$(\d+)\s*per\s*month",
        r"(?i)(\d+)\s*USD\s*/\s*month",
    ]
    .map(|p| Regex::new(p).expect("valid regex"))
});
static FREE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)free").expect("valid regex"));

/// Longest website description kept
pub const MAX_DESCRIPTION_CHARS: usize = 500;
/// Website descriptions this short are ignored
pub const MIN_WEBSITE_DESCRIPTION_CHARS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebsiteInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub og_image: Option<String>,
}

fn capture(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn parse_website_info(html: &str) -> WebsiteInfo {
    let keywords = capture(&KEYWORDS, html)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    WebsiteInfo {
        title: capture(&TITLE, html),
        description: capture(&DESCRIPTION, html),
        keywords,
        og_image: capture(&OG_IMAGE, html),
    }
}

/// `$N/month` from the first price pattern found, else `Free` if the text
/// mentions it
pub fn extract_pricing_from_text(text: &str) -> Option<String> {
    PRICE_PATTERNS
        .iter()
        .find_map(|re| re.captures(text).and_then(|c| c.get(1)))
        .map(|amount| format!("${}/month", amount.as_str()))
        .or_else(|| FREE.is_match(text).then(|| "Free".to_string()))
}

/// Prefer the website's description when it is substantial and longer
pub fn enhanced_description(original: &str, info: Option<&WebsiteInfo>) -> String {
    let website = info
        .and_then(|i| i.description.as_deref())
        .filter(|d| d.chars().count() > MIN_WEBSITE_DESCRIPTION_CHARS)
        .filter(|d| d.chars().count() > original.chars().count());

    match website {
        Some(d) => d.chars().take(MAX_DESCRIPTION_CHARS).collect(),
        None => original.to_string(),
    }
}
