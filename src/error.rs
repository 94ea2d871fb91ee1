//! Unified error taxonomy for celldb.
//!
//! Two families of failures are kept apart so callers can tell them apart:
//! structural errors (a table, row, or column does not exist, or a name is
//! invalid) and value errors (cell data that failed validation). A transport
//! layer maps each variant to a client-facing status via [`DbError::status_code`]
//! without matching variants itself.

use thiserror::Error;

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    /// Referenced database, table, row, or column is absent
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate name on create
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Structural failure independent of cell content (bad name, columnless
    /// table, mismatched schemas)
    #[error("{0}")]
    Structural(String),

    /// Every supplied field normalized to null; distinguished from validation
    /// failure so the caller can prompt for input
    #[error("all fields are empty; at least one value is required")]
    AllFieldsEmpty,

    /// One or more cells failed type validation; carries every offending
    /// column, not just the first
    #[error("invalid value for columns: {}", .columns.join(", "))]
    Validation {
        /// Names of all columns whose values failed validation
        columns: Vec<String>,
    },

    /// Snapshot could not be serialized or parsed
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Underlying file I/O failure during save or load
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl DbError {
    /// Create a not found error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create an already exists error
    pub fn already_exists(what: impl Into<String>) -> Self {
        Self::AlreadyExists(what.into())
    }

    /// Create a structural error
    pub fn structural(msg: impl Into<String>) -> Self {
        Self::Structural(msg.into())
    }

    /// Create a validation error from the offending column names
    pub fn validation(columns: Vec<String>) -> Self {
        Self::Validation { columns }
    }

    /// Get error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Structural(_) => "STRUCTURAL_ERROR",
            Self::AllFieldsEmpty => "ALL_FIELDS_EMPTY",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Snapshot(_) => "SNAPSHOT_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Get HTTP status code equivalent
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::AlreadyExists(_) => 400,
            Self::Structural(_) => 400,
            Self::AllFieldsEmpty => 400,
            Self::Validation { .. } => 400,
            Self::Snapshot(_) => 500,
            Self::Io(_) => 500,
        }
    }
}
