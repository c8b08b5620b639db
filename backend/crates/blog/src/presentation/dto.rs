//! API DTOs (Data Transfer Objects)

use crate::application::autofill_post::AutofillInput;
use crate::application::create_post::{CreatePostInput, CreatePostOutput};
use crate::application::get_post::PostDetail;
use crate::application::tools_needing_posts::ToolsNeedingPostsOutput;
use crate::domain::autofill::AutofillResult;
use crate::domain::entities::Post;
use crate::domain::services::PostMetadata;
use catalog::Tool;
use chrono::{DateTime, Utc};
use kernel::id::PostId;
use serde::{Deserialize, Serialize};

/// Query for GET /api/posts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostListQuery {
    pub tag: Option<String>,
}

/// Response for GET /api/posts/{slug}
#[derive(Debug, Clone, Serialize)]
pub struct PostDetailResponse {
    pub post: Post,
    pub related_tools: Vec<Tool>,
    pub published_date: Option<String>,
    pub metadata: PostMetadata,
}

impl From<PostDetail> for PostDetailResponse {
    fn from(detail: PostDetail) -> Self {
        Self {
            post: detail.post,
            related_tools: detail.related_tools,
            published_date: detail.published_date,
            metadata: detail.metadata,
        }
    }
}

/// Request for POST /api/admin/create-post
///
/// Missing `title`/`content_html` are read as empty so they get the
/// validation message rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content_html: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub hero_image_url: Option<String>,
    pub related_tools: Option<Vec<String>>,
    /// `"now"`, `"schedule"`, `"draft"`, a date, or null/absent
    pub published_at: Option<String>,
}

impl From<CreatePostRequest> for CreatePostInput {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            excerpt: req.excerpt,
            content_html: req.content_html,
            tags: req.tags,
            hero_image_url: req.hero_image_url,
            related_tools: req.related_tools,
            published_at: req.published_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedPost {
    pub id: PostId,
    pub slug: String,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// Response for POST /api/admin/create-post
#[derive(Debug, Clone, Serialize)]
pub struct CreatePostResponse {
    pub success: bool,
    pub post: CreatedPost,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<String>,
}

impl From<CreatePostOutput> for CreatePostResponse {
    fn from(output: CreatePostOutput) -> Self {
        Self {
            success: true,
            post: CreatedPost {
                id: output.post.id,
                slug: output.post.slug,
                title: output.post.title,
                published_at: output.post.published_at,
            },
            message: output.message,
            scheduled_for: output.scheduled_for,
        }
    }
}

/// Request for POST /api/admin/autofill
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutofillRequest {
    #[serde(default)]
    pub content: String,
    pub tool_slug: Option<String>,
    pub tool_name: Option<String>,
}

impl From<AutofillRequest> for AutofillInput {
    fn from(req: AutofillRequest) -> Self {
        Self {
            content: req.content,
            tool_slug: req.tool_slug,
            tool_name: req.tool_name,
        }
    }
}

/// Response for POST /api/admin/autofill
#[derive(Debug, Clone, Serialize)]
pub struct AutofillResponse {
    pub success: bool,
    #[serde(flatten)]
    pub data: AutofillResult,
}

impl From<AutofillResult> for AutofillResponse {
    fn from(data: AutofillResult) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Response for GET /api/admin/tools-needing-posts
///
/// Totals go out as `totalTools` / `totalPosts` for the admin page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsNeedingPostsResponse {
    pub success: bool,
    pub count: usize,
    pub tools: Vec<Tool>,
    pub total_tools: usize,
    pub total_posts: usize,
}

impl From<ToolsNeedingPostsOutput> for ToolsNeedingPostsResponse {
    fn from(output: ToolsNeedingPostsOutput) -> Self {
        Self {
            success: true,
            count: output.tools.len(),
            tools: output.tools,
            total_tools: output.total_tools,
            total_posts: output.total_posts,
        }
    }
}

/// Response for GET /api/admin/blog-template/{slug}
#[derive(Debug, Clone, Serialize)]
pub struct BlogTemplateResponse {
    pub success: bool,
    pub template: String,
}
