//! HTTP Handlers

use crate::application::autofill_post::AutofillPostUseCase;
use crate::application::blog_template::BlogTemplateUseCase;
use crate::application::config::BlogConfig;
use crate::application::create_post::CreatePostUseCase;
use crate::application::get_post::GetPostUseCase;
use crate::application::list_posts::ListPostsUseCase;
use crate::application::tools_needing_posts::ToolsNeedingPostsUseCase;
use crate::domain::repository::PostRepository;
use crate::error::BlogResult;
use crate::presentation::dto::{
    AutofillRequest, AutofillResponse, BlogTemplateResponse, CreatePostRequest,
    CreatePostResponse, PostDetailResponse, PostListQuery, ToolsNeedingPostsResponse,
};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use catalog::ToolRepository;
use platform::cache::{cached_json, empty_list_no_cache};
use std::sync::Arc;

/// Shared state for blog handlers
pub struct BlogAppState<P, T>
where
    P: PostRepository + Send + Sync + 'static,
    T: ToolRepository + Send + Sync + 'static,
{
    pub posts: Arc<P>,
    pub tools: Arc<T>,
    pub config: Arc<BlogConfig>,
}

impl<P, T> Clone for BlogAppState<P, T>
where
    P: PostRepository + Send + Sync + 'static,
    T: ToolRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            posts: self.posts.clone(),
            tools: self.tools.clone(),
            config: self.config.clone(),
        }
    }
}

/// GET /api/posts?tag=
///
/// Never fails: a storage error yields `[]` marked `no-cache`.
pub async fn list_posts<P, T>(
    State(state): State<BlogAppState<P, T>>,
    headers: HeaderMap,
    Query(query): Query<PostListQuery>,
) -> Response
where
    P: PostRepository + Send + Sync + 'static,
    T: ToolRepository + Send + Sync + 'static,
{
    let use_case = ListPostsUseCase::new(state.posts.clone());

    match use_case.execute(query.tag.as_deref()).await {
        Ok(posts) => cached_json(&headers, posts, state.config.cache_policy),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching posts");
            empty_list_no_cache()
        }
    }
}

/// GET /api/posts/{slug}
pub async fn get_post<P, T>(
    State(state): State<BlogAppState<P, T>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> BlogResult<Response>
where
    P: PostRepository + Send + Sync + 'static,
    T: ToolRepository + Send + Sync + 'static,
{
    let use_case = GetPostUseCase::new(
        state.posts.clone(),
        state.tools.clone(),
        state.config.clone(),
    );
    let detail = use_case.execute(&slug).await?;

    Ok(cached_json(
        &headers,
        PostDetailResponse::from(detail),
        state.config.cache_policy,
    ))
}

/// POST /api/admin/create-post
pub async fn create_post<P, T>(
    State(state): State<BlogAppState<P, T>>,
    Json(req): Json<CreatePostRequest>,
) -> BlogResult<Json<CreatePostResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    T: ToolRepository + Send + Sync + 'static,
{
    let use_case = CreatePostUseCase::new(state.posts.clone(), state.config.clone());
    let output = use_case.execute(req.into()).await?;

    Ok(Json(CreatePostResponse::from(output)))
}

/// POST /api/admin/autofill
pub async fn autofill_post<P, T>(
    State(state): State<BlogAppState<P, T>>,
    Json(req): Json<AutofillRequest>,
) -> BlogResult<Json<AutofillResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    T: ToolRepository + Send + Sync + 'static,
{
    let use_case = AutofillPostUseCase::new(state.tools.clone());
    let result = use_case.execute(req.into()).await?;

    Ok(Json(AutofillResponse::from(result)))
}

/// GET /api/admin/tools-needing-posts
pub async fn tools_needing_posts<P, T>(
    State(state): State<BlogAppState<P, T>>,
) -> BlogResult<Json<ToolsNeedingPostsResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    T: ToolRepository + Send + Sync + 'static,
{
    let use_case = ToolsNeedingPostsUseCase::new(state.posts.clone(), state.tools.clone());
    let output = use_case.execute().await?;

    Ok(Json(ToolsNeedingPostsResponse::from(output)))
}

/// GET /api/admin/blog-template/{slug}
pub async fn blog_template<P, T>(
    State(state): State<BlogAppState<P, T>>,
    Path(slug): Path<String>,
) -> BlogResult<Json<BlogTemplateResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    T: ToolRepository + Send + Sync + 'static,
{
    let use_case = BlogTemplateUseCase::new(state.tools.clone());
    let template = use_case.execute(&slug).await?;

    Ok(Json(BlogTemplateResponse {
        success: true,
        template,
    }))
}
