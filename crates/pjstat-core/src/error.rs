//! Error types for pjstat
//!
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use pjstat_core::error::{PjstatError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // io::Error converts automatically
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for pjstat operations
#[derive(Error, Debug)]
pub enum PjstatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// No practice journal data directories found
    #[error("No practice journal directories found")]
    NoJournalDirectory,

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in pjstat
pub type Result<T> = std::result::Result<T, PjstatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = PjstatError::NoJournalDirectory;
        assert_eq!(error.to_string(), "No practice journal directories found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: PjstatError = io_error.into();
        assert!(matches!(error, PjstatError::Io(_)));
    }
}
