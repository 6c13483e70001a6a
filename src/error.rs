//! Errors raised while resolving configuration or touching the filesystem
//!
//! Each variant carries a message naming the failed action and path. A missing
//! source database is not an error; the run just reports it and stops.

use thiserror::Error;

/// Failure of a backup run
#[derive(Error, Debug)]
pub enum BackupError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid input, e.g. a retention count of zero
    #[error("Validation error: {0}")]
    Validation(String),
}

impl BackupError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Result type alias for backup operations
pub type BackupResult<T> = Result<T, BackupError>;
