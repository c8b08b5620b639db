//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Tool, Category)
//! - Domain value objects (PricingFilter, ToolSort, PageNumber)
//! - Domain services (slugs, pricing labels, listing, comparison)
//! - Website metadata parsing
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
pub mod website;
