//! Repository Module
//!
//! Function-style CRUD over the SQLite tables. Every function takes a
//! `SqliteExecutor` so the same query runs against the pool or inside an
//! open transaction; the domain engines compose these into atomic
//! read-modify-write units.

pub mod customer;
pub mod dining_table;
pub mod ingredient;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod recipe;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(err.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
