//! Shared Kernel - vocabulary every backend crate agrees on
//!
//! - The unified [`error::app_error::AppError`] and its [`error::kind::ErrorKind`]
//! - Typed entity identifiers ([`id::Id`])
//!
//! Anything that only one domain needs belongs in that domain's crate.

pub mod error {
    pub mod app_error;
    #[cfg(feature = "sqlx")]
    pub mod database;
    pub mod kind;
    #[cfg(feature = "axum")]
    pub mod problem;
}
pub mod id;
