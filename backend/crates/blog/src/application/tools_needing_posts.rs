//! Tools Needing Posts Use Case

use crate::domain::repository::PostRepository;
use crate::domain::services::tools_needing_posts;
use crate::error::BlogResult;
use catalog::{Tool, ToolRepository};
use std::sync::Arc;

/// Tools without coverage plus the totals for the admin dashboard
#[derive(Debug, Clone)]
pub struct ToolsNeedingPostsOutput {
    pub tools: Vec<Tool>,
    pub total_tools: usize,
    pub total_posts: usize,
}

/// Tools Needing Posts Use Case
pub struct ToolsNeedingPostsUseCase<P, T>
where
    P: PostRepository,
    T: ToolRepository,
{
    posts: Arc<P>,
    tools: Arc<T>,
}

impl<P, T> ToolsNeedingPostsUseCase<P, T>
where
    P: PostRepository,
    T: ToolRepository,
{
    pub fn new(posts: Arc<P>, tools: Arc<T>) -> Self {
        Self { posts, tools }
    }

    /// Drafts and scheduled posts count as coverage
    pub async fn execute(&self) -> BlogResult<ToolsNeedingPostsOutput> {
        let tools = self.tools.list_all().await?;
        let posts = self.posts.list_all().await?;

        Ok(ToolsNeedingPostsOutput {
            tools: tools_needing_posts(&tools, &posts),
            total_tools: tools.len(),
            total_posts: posts.len(),
        })
    }
}
