//! Infrastructure Layer - Database, HTTP and in-memory implementations

pub mod http;
pub mod memory;
pub mod postgres;
