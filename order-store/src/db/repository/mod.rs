//! Repository Module
//!
//! Parameterized SQL for the order and customer tables. Writers branch on
//! the record variant (insert vs update); readers share one joined SELECT
//! and one row-mapping function.

pub mod customer;
pub mod order;

use shared::models::UnknownTag;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    /// A stored enum tag decoded to no known variant. The store only ever
    /// writes known tags, so this means schema drift — not recoverable.
    #[error("Malformed row: {0}")]
    MalformedRow(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<UnknownTag> for RepoError {
    fn from(err: UnknownTag) -> Self {
        RepoError::MalformedRow(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
