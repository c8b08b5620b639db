//! Catalog Backend Module
//!
//! The AI tool directory: tools, categories, search, comparison and admin
//! maintenance (seeding, website enrichment).
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, listing rules, website parsing, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL, HTTP and in-memory implementations
//! - `presentation/` - HTTP handlers and routers

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CatalogConfig;
pub use domain::entities::{Category, PricingDetails, Tool};
pub use domain::repository::{CatalogRepository, ToolRepository};
pub use error::{CatalogError, CatalogResult};
pub use infra::memory::InMemoryCatalogRepository;
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{CatalogRouters, catalog_router, catalog_router_generic};

#[cfg(test)]
mod tests;
