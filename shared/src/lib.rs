//! Shared types for the pizza order store
//!
//! Domain models used by the persistence layer and its callers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
