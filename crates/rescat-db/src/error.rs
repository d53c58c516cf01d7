//! Database error types for rescat-db.

use rescat_core::errors::{TransferError, ValidationErrors};
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned an unreadable value.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// No record has this id.
    #[error("Couldn't find ResearchDatum with 'id'={id}")]
    NotFound { id: i64 },

    /// The payload violated one or more field rules.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The CSV document could not be read or written.
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
