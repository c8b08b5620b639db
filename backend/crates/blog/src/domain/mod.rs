//! Domain Layer
//!
//! Posts, publish scheduling and the content heuristics used by the admin
//! authoring flow.

pub mod autofill;
pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
