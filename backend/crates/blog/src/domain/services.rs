//! Domain Services
//!
//! Pure blog logic: slugs, scheduling, tool matching, authoring prompts and
//! the messages shown after a post is created.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

use catalog::Tool;
use catalog::domain::services::{format_pricing, slugify};

use crate::domain::entities::Post;
use crate::domain::value_objects::ScheduleRules;

/// Longest generated post slug
pub const MAX_POST_SLUG_CHARS: usize = 80;

const FALLBACK_SLUG: &str = "post";

/// Slug for a post title, at most 80 characters and never cut mid-word
pub fn generate_post_slug(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        return FALLBACK_SLUG.to_string();
    }
    if slug.len() <= MAX_POST_SLUG_CHARS {
        return slug;
    }

    // slugify only emits ASCII, so byte offsets are char offsets
    let head = &slug[..MAX_POST_SLUG_CHARS];
    let cut = if slug.as_bytes()[MAX_POST_SLUG_CHARS] == b'-' {
        head
    } else {
        head.rfind('-').map_or(head, |i| &head[..i])
    };

    let cut = cut.trim_end_matches('-');
    if cut.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        cut.to_string()
    }
}

/// `n`th candidate for a slug: `base`, `base-1`, `base-2`, ...
pub fn slug_candidate(base: &str, n: usize) -> String {
    if n == 0 {
        base.to_string()
    } else {
        format!("{base}-{n}")
    }
}

/// First candidate of `base` not in `taken`
pub fn unique_slug(base: &str, taken: &[String]) -> String {
    (0..)
        .map(|n| slug_candidate(base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

fn publish_slot(day: NaiveDate, rules: &ScheduleRules) -> DateTime<Utc> {
    day.and_hms_opt(rules.publish_hour_utc.min(23), 0, 0)
        .unwrap_or_default()
        .and_utc()
}

/// Next publishing slot after today with room left
///
/// `taken` holds the publish dates of already scheduled or published posts.
/// If every day within the horizon is full, the day after the horizon is
/// used regardless.
pub fn next_available_publish_date(
    taken: &[DateTime<Utc>],
    now: DateTime<Utc>,
    rules: &ScheduleRules,
) -> DateTime<Utc> {
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for at in taken {
        *per_day.entry(at.date_naive()).or_default() += 1;
    }

    let today = now.date_naive();
    let free_day = (1..=u64::from(rules.horizon_days))
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .find(|day| per_day.get(day).copied().unwrap_or(0) < rules.max_posts_per_day);

    let day = free_day
        .or_else(|| today.checked_add_days(Days::new(u64::from(rules.horizon_days) + 1)))
        .unwrap_or(today);

    publish_slot(day, rules)
}

/// Long US date, e.g. `March 5, 2026`
pub fn format_publish_date(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

/// Confirmation shown after creating a post, plus the formatted date when
/// it is scheduled for later
pub fn publish_message(
    published_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (String, Option<String>) {
    match published_at {
        None => ("Post created successfully! Saved as draft.".to_string(), None),
        Some(at) if at <= now => ("Post published successfully!".to_string(), None),
        Some(at) => {
            let date = format_publish_date(at);
            (
                format!("Post created successfully! Scheduled for {date}"),
                Some(date),
            )
        }
    }
}

fn names_match(wanted: &str, tool_name: &str) -> bool {
    let tool_name = tool_name.to_lowercase();
    tool_name == wanted || tool_name.contains(wanted) || wanted.contains(&tool_name)
}

/// Tools for loosely written names
///
/// Each name picks one tool: an exact (case-insensitive) name match wins,
/// otherwise the first tool whose name contains it or is contained in it.
/// Blank names are skipped and each tool appears at most once.
pub fn match_related_tools(names: &[String], tools: &[Tool]) -> Vec<Tool> {
    let mut matched: Vec<Tool> = Vec::new();

    for name in names {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            continue;
        }

        let found = tools
            .iter()
            .find(|t| t.name.to_lowercase() == wanted)
            .or_else(|| tools.iter().find(|t| names_match(&wanted, &t.name)));

        let Some(tool) = found else { continue };
        if !matched.iter().any(|m| m.id == tool.id) {
            matched.push(tool.clone());
        }
    }

    matched
}

fn post_mentions(post: &Post, tool_name: &str) -> bool {
    let name = tool_name.to_lowercase();
    post.title.to_lowercase().contains(&name)
        || post.tags.iter().any(|t| t.to_lowercase() == name)
        || post
            .related_tools
            .iter()
            .flatten()
            .any(|t| t.trim().to_lowercase() == name)
}

/// Tools no post talks about yet, in input order
pub fn tools_needing_posts(tools: &[Tool], posts: &[Post]) -> Vec<Tool> {
    tools
        .iter()
        .filter(|tool| !posts.iter().any(|post| post_mentions(post, &tool.name)))
        .cloned()
        .collect()
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        "Not listed".to_string()
    } else {
        items.join(", ")
    }
}

/// Prompt for drafting a post about `tool` with an AI writing assistant
///
/// Asks for the trailing metadata lines that `autofill_post_data` reads back.
pub fn blog_template(tool: &Tool) -> String {
    let category = tool.category.as_deref().unwrap_or("AI");
    let website = tool.website_url.as_deref().unwrap_or("Not listed");
    let description = tool
        .description
        .as_deref()
        .unwrap_or("No description available");
    let pricing = format_pricing(tool.pricing_details.as_ref());

    format!(
        "Write a comprehensive, SEO-friendly blog post about {name}, a {category} tool.

Tool details:
- Name: {name}
- Category: {category}
- Website: {website}
- Description: {description}
- Key features: {features}
- Use cases: {use_cases}
- Pricing: {pricing}

Requirements:
- Write the post as HTML: one <h1> title, <h2> section headings, <p> paragraphs and <ul> lists
- Open with a short introduction paragraph that works as a summary
- Cover what {name} is, its key features, who it is for, pricing, pros and cons, and alternatives
- Aim for 1200-1800 words in a helpful, neutral tone
- Do not include <html>, <head> or <body> tags

After the post, add exactly these three lines:
Tags: comma-separated tags (up to 8)
Related Tools: comma-separated names of similar AI tools
Hero Image Prompt: one sentence describing a hero image for the post",
        name = tool.name,
        features = bullet_list(&tool.features),
        use_cases = bullet_list(&tool.use_cases),
    )
}

/// Page metadata for a blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMetadata {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

pub fn post_metadata(post: Option<&Post>, site_name: &str) -> PostMetadata {
    let Some(post) = post else {
        return PostMetadata {
            title: format!("Post Not Found - {site_name}"),
            description: String::new(),
            image: None,
        };
    };

    PostMetadata {
        title: format!("{} - {site_name} Blog", post.title),
        description: post
            .excerpt
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| post.title.clone()),
        image: post.hero_image_url.clone(),
    }
}
