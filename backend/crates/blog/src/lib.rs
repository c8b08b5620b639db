//! Blog Backend Module
//!
//! Blog posts for the tool directory plus the admin authoring flow:
//! drafting prompts, autofill of pasted drafts, scheduling and coverage of
//! catalog tools.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, scheduling, autofill, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers and routers

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::BlogConfig;
pub use domain::entities::{Post, PostStatus, PostSummary};
pub use domain::repository::PostRepository;
pub use error::{BlogError, BlogResult};
pub use infra::memory::InMemoryBlogRepository;
pub use infra::postgres::PgBlogRepository;
pub use presentation::router::{BlogRouters, blog_router, blog_router_generic};
