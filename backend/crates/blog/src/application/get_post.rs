//! Get Post Use Case

use crate::application::config::BlogConfig;
use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::domain::services::{
    PostMetadata, format_publish_date, match_related_tools, post_metadata,
};
use crate::error::{BlogError, BlogResult};
use catalog::{Tool, ToolRepository};
use chrono::Utc;
use std::sync::Arc;

/// Output DTO for a post page
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub related_tools: Vec<Tool>,
    /// e.g. `March 5, 2026`
    pub published_date: Option<String>,
    pub metadata: PostMetadata,
}

/// Get Post Use Case
pub struct GetPostUseCase<P, T>
where
    P: PostRepository,
    T: ToolRepository,
{
    posts: Arc<P>,
    tools: Arc<T>,
    config: Arc<BlogConfig>,
}

impl<P, T> GetPostUseCase<P, T>
where
    P: PostRepository,
    T: ToolRepository,
{
    pub fn new(posts: Arc<P>, tools: Arc<T>, config: Arc<BlogConfig>) -> Self {
        Self {
            posts,
            tools,
            config,
        }
    }

    pub async fn execute(&self, slug: &str) -> BlogResult<PostDetail> {
        let post = self
            .posts
            .find_published_by_slug(slug, Utc::now())
            .await?
            .ok_or_else(|| BlogError::PostNotFound(slug.to_string()))?;

        let related_tools = self.related_tools(&post).await;

        Ok(PostDetail {
            published_date: post.published_at.map(format_publish_date),
            metadata: post_metadata(Some(&post), &self.config.site_name),
            related_tools,
            post,
        })
    }

    async fn related_tools(&self, post: &Post) -> Vec<Tool> {
        let names = match post.related_tools.as_deref() {
            Some(names) if !names.is_empty() => names,
            _ => return Vec::new(),
        };

        // Related tools are decoration; a catalog failure leaves the list empty.
        match self.tools.list_all().await {
            Ok(all) => match_related_tools(names, &all),
            Err(e) => {
                tracing::warn!(error = %e, slug = %post.slug, "Failed to load related tools");
                Vec::new()
            }
        }
    }
}
