//! Pizza order persistence
//!
//! SQLite-backed storage for orders and their customers: upsert with
//! store-assigned ids, joined reads, and status-filtered queries, plus the
//! order lifecycle workflow (create / deliver / cancel) on top.

pub mod db;
pub mod orders;
pub mod store;

// Re-exports
pub use db::DbService;
pub use db::repository::{RepoError, RepoResult};
pub use orders::OrderService;
pub use store::OrderStore;
