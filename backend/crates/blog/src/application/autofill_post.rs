//! Autofill Post Use Case

use crate::domain::autofill::{AutofillResult, autofill_post_data};
use crate::error::{BlogError, BlogResult};
use catalog::ToolRepository;
use std::sync::Arc;

/// Input for autofill: the draft and the tool it is about
#[derive(Debug, Clone, Default)]
pub struct AutofillInput {
    pub content: String,
    /// Catalog tool; its name, category and tags feed the defaults
    pub tool_slug: Option<String>,
    /// Used when the tool is not in the catalog
    pub tool_name: Option<String>,
}

/// Autofill Post Use Case
pub struct AutofillPostUseCase<T>
where
    T: ToolRepository,
{
    tools: Arc<T>,
}

impl<T> AutofillPostUseCase<T>
where
    T: ToolRepository,
{
    pub fn new(tools: Arc<T>) -> Self {
        Self { tools }
    }

    pub async fn execute(&self, input: AutofillInput) -> BlogResult<AutofillResult> {
        if input.content.trim().is_empty() {
            return Err(BlogError::Validation("content is required".to_string()));
        }

        let slug = input.tool_slug.as_deref().map(str::trim).filter(|s| !s.is_empty());
        if let Some(slug) = slug {
            let tool = self
                .tools
                .find_by_slug(slug)
                .await?
                .ok_or_else(|| BlogError::ToolNotFound(slug.to_string()))?;

            return Ok(autofill_post_data(
                &input.content,
                &tool.name,
                tool.category.as_deref(),
                &tool.tags,
            ));
        }

        match input.tool_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                Ok(autofill_post_data(&input.content, name, None, &[]))
            }
            _ => Err(BlogError::Validation(
                "tool_slug or tool_name is required".to_string(),
            )),
        }
    }
}
