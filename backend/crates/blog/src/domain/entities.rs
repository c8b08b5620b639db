//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::PostId;
use serde::Serialize;

/// Where a post sits relative to `now`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
}

/// Post entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content_html: String,
    pub tags: Vec<String>,
    pub hero_image_url: Option<String>,
    /// Tool names as written by the author, matched loosely on read
    pub related_tools: Option<Vec<String>>,
    /// `None` for drafts
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create an unpublished post
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        content_html: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(),
            title: title.into(),
            slug: slug.into(),
            excerpt: None,
            content_html: content_html.into(),
            tags: Vec::new(),
            hero_image_url: None,
            related_tools: None,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status(&self, now: DateTime<Utc>) -> PostStatus {
        match self.published_at {
            None => PostStatus::Draft,
            Some(at) if at <= now => PostStatus::Published,
            Some(_) => PostStatus::Scheduled,
        }
    }

    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.status(now) == PostStatus::Published
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Listing view of a post, without the body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    pub hero_image_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            tags: post.tags.clone(),
            hero_image_url: post.hero_image_url.clone(),
            published_at: post.published_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_follows_published_at() {
        let now = Utc::now();
        let mut post = Post::new("Title", "title", "<p>x</p>");
        assert_eq!(post.status(now), PostStatus::Draft);

        post.published_at = Some(now + Duration::days(1));
        assert_eq!(post.status(now), PostStatus::Scheduled);
        assert!(!post.is_published(now));

        post.published_at = Some(now);
        assert!(post.is_published(now));
    }

    #[test]
    fn test_has_tag_ignores_case() {
        let mut post = Post::new("Title", "title", "");
        post.tags = vec!["ChatGPT".into()];
        assert!(post.has_tag("chatgpt"));
        assert!(!post.has_tag("claude"));
    }
}
