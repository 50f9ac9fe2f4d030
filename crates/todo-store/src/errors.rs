//! Error types for the task store.
//!
//! [`StoreError`] is the primary error type returned by all store
//! operations. Storage failures propagate to the caller, which surfaces
//! them as a transient failure notice — the requested mutation is aborted
//! with no side effects.

use thiserror::Error;

/// Errors that can occur during task store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `SQLite` database error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Schema migration failed.
    #[error("migration error: {message}")]
    Migration {
        /// Describes which migration failed and why.
        message: String,
    },

    /// Internal error (e.g. closed change channel).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for task store results.
pub type Result<T> = std::result::Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
