//! Blog Router

use crate::application::config::BlogConfig;
use crate::domain::repository::PostRepository;
use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, BlogAppState};
use axum::{
    Router,
    routing::{get, post},
};
use catalog::{PgCatalogRepository, ToolRepository};
use std::sync::Arc;

/// Blog routes, unguarded
pub struct BlogRouters {
    /// `/posts`, `/posts/{slug}`
    pub public: Router,
    /// `/create-post`, `/autofill`, `/tools-needing-posts`, `/blog-template/{slug}`
    pub admin: Router,
}

/// Create the blog routers with PostgreSQL repositories
pub fn blog_router(
    posts: PgBlogRepository,
    tools: PgCatalogRepository,
    config: BlogConfig,
) -> BlogRouters {
    blog_router_generic(posts, tools, config)
}

/// Create blog routers for any post and tool repository implementation
pub fn blog_router_generic<P, T>(posts: P, tools: T, config: BlogConfig) -> BlogRouters
where
    P: PostRepository + Send + Sync + 'static,
    T: ToolRepository + Send + Sync + 'static,
{
    let state = BlogAppState {
        posts: Arc::new(posts),
        tools: Arc::new(tools),
        config: Arc::new(config),
    };

    let public = Router::new()
        .route("/posts", get(handlers::list_posts::<P, T>))
        .route("/posts/{slug}", get(handlers::get_post::<P, T>))
        .with_state(state.clone());

    let admin = Router::new()
        .route("/create-post", post(handlers::create_post::<P, T>))
        .route("/autofill", post(handlers::autofill_post::<P, T>))
        .route("/tools-needing-posts", get(handlers::tools_needing_posts::<P, T>))
        .route("/blog-template/{slug}", get(handlers::blog_template::<P, T>))
        .with_state(state);

    BlogRouters { public, admin }
}
