//! Data models
//!
//! Shared between the order store and its callers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, assigned on first insert).

pub mod customer;
pub mod order;

// Re-exports
pub use customer::*;
pub use order::*;
