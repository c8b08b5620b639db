//! Presentation Layer - HTTP handlers, DTOs and routers

pub mod dto;
pub mod handlers;
pub mod router;
