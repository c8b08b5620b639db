//! Blog Template Use Case

use crate::domain::services::blog_template;
use crate::error::{BlogError, BlogResult};
use catalog::ToolRepository;
use std::sync::Arc;

/// Blog Template Use Case
pub struct BlogTemplateUseCase<T>
where
    T: ToolRepository,
{
    tools: Arc<T>,
}

impl<T> BlogTemplateUseCase<T>
where
    T: ToolRepository,
{
    pub fn new(tools: Arc<T>) -> Self {
        Self { tools }
    }

    pub async fn execute(&self, slug: &str) -> BlogResult<String> {
        let tool = self
            .tools
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| BlogError::ToolNotFound(slug.to_string()))?;

        Ok(blog_template(&tool))
    }
}
