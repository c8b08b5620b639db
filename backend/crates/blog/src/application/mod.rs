//! Application Layer
//!
//! Use cases for reading and authoring blog posts.

pub mod autofill_post;
pub mod blog_template;
pub mod config;
pub mod create_post;
pub mod get_post;
pub mod list_posts;
pub mod tools_needing_posts;
