//! Shared primitives for the Newscoop upgrade crates.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across Newscoop crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid runtime configuration or configuration resource.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Reading legacy or ACL rows from the store failed.
    #[error("store read failure: {0}")]
    StoreRead(String),

    /// Stamping a role id or inserting ACL rows failed.
    #[error("store write failure: {0}")]
    StoreWrite(String),

    /// A legacy right name has no entry in the right-name mapping.
    #[error("unknown right name '{right_name}' held by {principal}")]
    UnknownRightName {
        /// Principal holding the right, formatted as `kind:id`.
        principal: String,
        /// Legacy right name that could not be translated.
        right_name: String,
    },

    /// A failed run whose rollback failed as well.
    #[error("{error}; rollback also failed: {rollback_error}")]
    RollbackFailed {
        /// Error that aborted the run.
        error: Box<AppError>,
        /// Error returned by the rollback.
        rollback_error: Box<AppError>,
    },

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
