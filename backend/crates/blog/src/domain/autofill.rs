//! Post Autofill
//!
//! Pulls post fields out of a drafted article pasted into the admin editor.
//! The draft is usually HTML produced from `blog_template`, sometimes wrapped
//! in code fences or a full document, and ends with `Tags:`,
//! `Related Tools:` and `Hero Image Prompt:` lines.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Longest generated excerpt, before the trailing `...`
pub const EXCERPT_MAX_CHARS: usize = 160;
/// Most tags kept on a post
pub const MAX_TAGS: usize = 8;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*```[\w-]*[ \t]*$\n?").expect("valid regex"));
static HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<head(?:\s[^>]*)?>.*?</head>").expect("valid regex")
});
static DOCUMENT_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<!doctype[^>]*>|</?(?:html|body)(?:\s[^>]*)?>").expect("valid regex")
});
static METADATA_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:<p(?:\s[^>]*)?>)?[ \t]*(?:\*\*|<strong>|<b>)?[ \t]*(tags|related tools|hero image prompt)[ \t]*(?:\*\*|</strong>|</b>)?[ \t]*:[ \t]*(?:\*\*|</strong>|</b>)?[ \t]*(.*?)[ \t]*(?:</p>)?[ \t]*$",
    )
    .expect("valid regex")
});
static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1(?:\s[^>]*)?>(.*?)</h1>").expect("valid regex"));
static MARKDOWN_H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]*$").expect("valid regex"));
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p>").expect("valid regex"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("valid regex"));

/// Fields recovered from a draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutofillResult {
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub related_tools: Vec<String>,
    pub hero_image_prompt: String,
    /// Draft body with the title and metadata lines removed
    pub cleaned_content: String,
}

pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Visible text of an HTML fragment on one line
pub fn plain_text(html: &str) -> String {
    let stripped = HTML_TAG.replace_all(html, " ");
    decode_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shorten to `max` characters at a word boundary, marking the cut with `...`
pub fn truncate_on_word(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let head: String = text.chars().take(max).collect();
    let cut = match head.rfind(' ') {
        Some(i) if i > 0 => &head[..i],
        _ => head.as_str(),
    };
    format!("{}...", cut.trim_end_matches([' ', ',', ';', ':', '.']))
}

/// Case-insensitive de-duplication keeping the first spelling, blanks dropped
fn dedupe(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for item in items {
        let item = item.trim().to_string();
        let key = item.to_lowercase();
        if item.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(item);
    }
    out
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('#').trim().to_string())
        .collect()
}

#[derive(Default)]
struct Metadata {
    tags: Option<String>,
    related_tools: Option<String>,
    hero_image_prompt: Option<String>,
}

/// Read the metadata lines (first of each kind wins) and drop them all
fn take_metadata(content: &str) -> (Metadata, String) {
    let mut meta = Metadata::default();

    for caps in METADATA_LINE.captures_iter(content) {
        let value = plain_text(&caps[2]);
        if value.is_empty() {
            continue;
        }
        let slot = match caps[1].to_lowercase().as_str() {
            "tags" => &mut meta.tags,
            "related tools" => &mut meta.related_tools,
            _ => &mut meta.hero_image_prompt,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    let remaining = METADATA_LINE.replace_all(content, "").into_owned();
    (meta, remaining)
}

/// First `<h1>`, else the first markdown `# ` heading, removed from content
fn take_title(content: &str) -> (Option<String>, String) {
    for re in [&*H1, &*MARKDOWN_H1] {
        if let Some(caps) = re.captures(content) {
            let title = plain_text(&caps[1]);
            if title.is_empty() {
                continue;
            }
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let mut remaining = content.to_string();
            remaining.replace_range(whole, "");
            return (Some(title), remaining);
        }
    }
    (None, content.to_string())
}

fn first_paragraph(content: &str) -> Option<String> {
    PARAGRAPH
        .captures_iter(content)
        .map(|caps| plain_text(&caps[1]))
        .find(|text| !text.is_empty())
        .or_else(|| {
            // No <p> markup: first non-empty line of plain text
            HTML_TAG
                .replace_all(content, "\n")
                .lines()
                .map(plain_text)
                .find(|line| !line.is_empty() && !line.starts_with('#'))
        })
}

fn default_hero_prompt(tool_name: &str, category: Option<&str>) -> String {
    let kind = match category {
        Some(c) => format!("a {c} tool"),
        None => "an AI tool".to_string(),
    };
    format!(
        "A modern, minimalist hero illustration for a blog post about {tool_name}, {kind}, with abstract technology shapes and soft gradients"
    )
}

/// Recover title, excerpt, tags, related tools and hero prompt from a draft
pub fn autofill_post_data(
    content: &str,
    tool_name: &str,
    category: Option<&str>,
    tool_tags: &[String],
) -> AutofillResult {
    let content = content.replace("\r\n", "\n");
    let content = CODE_FENCE.replace_all(&content, "");
    let content = HEAD.replace_all(&content, "");
    let content = DOCUMENT_TAGS.replace_all(&content, "");

    let (meta, content) = take_metadata(&content);
    let (title, content) = take_title(&content);

    let excerpt = first_paragraph(&content)
        .map(|p| truncate_on_word(&p, EXCERPT_MAX_CHARS))
        .unwrap_or_default();

    let tags = match meta.tags {
        Some(raw) => split_list(&raw),
        None => category
            .map(str::to_string)
            .into_iter()
            .chain(std::iter::once(tool_name.to_string()))
            .chain(tool_tags.iter().cloned())
            .collect(),
    };
    let mut tags = dedupe(tags);
    tags.truncate(MAX_TAGS);

    let related_tools = meta
        .related_tools
        .map(|raw| dedupe(split_list(&raw)))
        .unwrap_or_default();

    let cleaned_content = BLANK_LINES.replace_all(&content, "\n\n").trim().to_string();

    AutofillResult {
        title: title.unwrap_or_else(|| format!("Complete Guide to {tool_name}")),
        excerpt,
        tags,
        related_tools,
        hero_image_prompt: meta
            .hero_image_prompt
            .unwrap_or_else(|| default_hero_prompt(tool_name, category)),
        cleaned_content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAFT: &str = "```html
<!DOCTYPE html>
<html>
<head><title>ignored</title></head>
<body>
<h1>Claude: A Complete Guide</h1>
<p>Claude is an AI assistant from Anthropic &amp; friends that helps with writing, analysis and coding.</p>
<h2>Features</h2>
<p>Long context.</p>
<p><strong>Tags:</strong> AI Assistant, Writing, ai assistant, Claude</p>
Related Tools: ChatGPT, Jasper
Hero Image Prompt: A friendly robot writing at a desk
</body>
</html>
```";

    #[test]
    fn test_full_draft() {
        let result = autofill_post_data(DRAFT, "Claude", Some("Text AI"), &[]);

        assert_eq!(result.title, "Claude: A Complete Guide");
        assert_eq!(
            result.excerpt,
            "Claude is an AI assistant from Anthropic & friends that helps with writing, analysis and coding."
        );
        assert_eq!(result.tags, vec!["AI Assistant", "Writing", "Claude"]);
        assert_eq!(result.related_tools, vec!["ChatGPT", "Jasper"]);
        assert_eq!(result.hero_image_prompt, "A friendly robot writing at a desk");

        let cleaned = &result.cleaned_content;
        assert!(cleaned.starts_with("<p>Claude is an AI assistant"));
        assert!(!cleaned.contains("<h1>"));
        assert!(!cleaned.contains("```"));
        assert!(!cleaned.contains("<head>"));
        assert!(!cleaned.contains("<body>"));
        assert!(!cleaned.contains("Tags:"));
        assert!(!cleaned.contains("Related Tools:"));
        assert!(cleaned.contains("<h2>Features</h2>"));
    }

    #[test]
    fn test_defaults_without_metadata() {
        let tool_tags = vec!["writing".to_string(), "Text AI".to_string()];
        let result = autofill_post_data("<p>Short intro.</p>", "Jasper", Some("Text AI"), &tool_tags);

        assert_eq!(result.title, "Complete Guide to Jasper");
        assert_eq!(result.excerpt, "Short intro.");
        assert_eq!(result.tags, vec!["Text AI", "Jasper", "writing"]);
        assert!(result.related_tools.is_empty());
        assert!(result.hero_image_prompt.contains("Jasper, a Text AI tool"));
    }

    #[test]
    fn test_markdown_title() {
        let result = autofill_post_data("# Suno Review\n\nMake songs from text.\n", "Suno", None, &[]);
        assert_eq!(result.title, "Suno Review");
        assert_eq!(result.excerpt, "Make songs from text.");
        assert_eq!(result.cleaned_content, "Make songs from text.");
        assert!(result.hero_image_prompt.contains("an AI tool"));
    }

    #[test]
    fn test_tags_are_capped() {
        let draft = "<p>x</p>\nTags: a, b, c, d, e, f, g, h, i, j";
        let result = autofill_post_data(draft, "Tool", None, &[]);
        assert_eq!(result.tags.len(), MAX_TAGS);
        assert_eq!(result.tags[0], "a");
    }

    #[test]
    fn test_truncate_on_word() {
        assert_eq!(truncate_on_word("short", 160), "short");
        assert_eq!(truncate_on_word("one two three", 9), "one two...");
        let long = "word ".repeat(50);
        let excerpt = truncate_on_word(long.trim(), EXCERPT_MAX_CHARS);
        assert!(excerpt.ends_with("word..."));
        assert!(excerpt.chars().count() <= EXCERPT_MAX_CHARS + 3);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("<b>Hi</b>&nbsp;&lt;there&gt;\n  you"), "Hi <there> you");
    }
}
