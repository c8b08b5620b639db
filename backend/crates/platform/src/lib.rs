//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the HTTP layer:
//! - In-memory fixed-window rate limiting
//! - ETag / Cache-Control helpers for conditional responses
//! - Client identification from proxy headers
//! - Admin shared-secret guard
//! - Axum middleware wiring the above into routers

pub mod admin;
pub mod cache;
pub mod client;
pub mod middleware;
pub mod rate_limit;
