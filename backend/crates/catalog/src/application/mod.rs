//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod compare_tools;
pub mod config;
pub mod enrich_tool;
pub mod get_tool;
pub mod list_categories;
pub mod list_tools;
pub mod seed_catalog;
