//! Create Post Use Case
//!
//! Stores an authored post under a free slug. The publish date comes from
//! the request: now, a given instant, no date (draft), or the next free
//! scheduling slot.

use crate::application::config::BlogConfig;
use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::domain::services::{
    generate_post_slug, next_available_publish_date, publish_message, unique_slug,
};
use crate::domain::value_objects::PublishRequest;
use crate::error::{BlogError, BlogResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Input for creating a post
#[derive(Debug, Clone, Default)]
pub struct CreatePostInput {
    pub title: String,
    pub excerpt: Option<String>,
    pub content_html: String,
    pub tags: Vec<String>,
    pub hero_image_url: Option<String>,
    pub related_tools: Option<Vec<String>>,
    /// Raw `published_at` field; see [`PublishRequest::parse`]
    pub published_at: Option<String>,
}

/// Output of creating a post
#[derive(Debug, Clone)]
pub struct CreatePostOutput {
    pub post: Post,
    pub message: String,
    /// Long date when the post goes out later
    pub scheduled_for: Option<String>,
}

/// Create Post Use Case
pub struct CreatePostUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
    config: Arc<BlogConfig>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl<P> CreatePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>, config: Arc<BlogConfig>) -> Self {
        Self { posts, config }
    }

    pub async fn execute(&self, input: CreatePostInput) -> BlogResult<CreatePostOutput> {
        self.execute_at(input, Utc::now()).await
    }

    /// Same as `execute`, with the clock supplied by the caller
    pub async fn execute_at(
        &self,
        input: CreatePostInput,
        now: DateTime<Utc>,
    ) -> BlogResult<CreatePostOutput> {
        let title = input.title.trim();
        if title.is_empty() || input.content_html.trim().is_empty() {
            return Err(BlogError::Validation(
                "Title and content_html are required".to_string(),
            ));
        }

        // Reject a bad date before touching storage
        let request = PublishRequest::parse(input.published_at.as_deref())?;

        let slug = self.free_slug(&generate_post_slug(title)).await?;
        let published_at = self.resolve_publish_date(request, now).await?;

        let mut post = Post::new(title, slug, input.content_html);
        post.excerpt = non_blank(input.excerpt);
        post.tags = clean_list(input.tags);
        post.hero_image_url = non_blank(input.hero_image_url);
        post.related_tools = input
            .related_tools
            .map(clean_list)
            .filter(|names| !names.is_empty());
        post.published_at = published_at;
        post.created_at = now;
        post.updated_at = now;

        self.posts.create(&post).await?;

        let (message, scheduled_for) = publish_message(post.published_at, now);
        tracing::info!(
            slug = %post.slug,
            status = ?post.status(now),
            published_at = ?post.published_at,
            "Post created"
        );

        Ok(CreatePostOutput {
            post,
            message,
            scheduled_for,
        })
    }

    async fn free_slug(&self, base: &str) -> BlogResult<String> {
        let taken = self.posts.slugs_with_prefix(base).await?;
        Ok(unique_slug(base, &taken))
    }

    async fn resolve_publish_date(
        &self,
        request: PublishRequest,
        now: DateTime<Utc>,
    ) -> BlogResult<Option<DateTime<Utc>>> {
        match request {
            PublishRequest::Now => Ok(Some(now)),
            PublishRequest::Draft => Ok(None),
            PublishRequest::At(at) => Ok(Some(at)),
            PublishRequest::AutoSchedule => {
                let start_of_today = now
                    .date_naive()
                    .and_hms_opt(0, 0, 0)
                    .map_or(now, |midnight| midnight.and_utc());
                let taken = self.posts.publish_dates_from(start_of_today).await?;
                Ok(Some(next_available_publish_date(
                    &taken,
                    now,
                    &self.config.schedule,
                )))
            }
        }
    }
}
