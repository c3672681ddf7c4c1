//! Error types for the gridder library.
//!
//! One enum covers every failure a grid operation can report. Callers can
//! tell "you asked to stop" (`UserInterrupt`) apart from "something broke"
//! (`ComputationFailure`) and from bad input detected before any cell was
//! computed (`InvalidArgument`).

use thiserror::Error;

/// The main error type for gridder operations.
#[derive(Error, Debug)]
pub enum GridError {
    /// Illegal or inconsistent arguments, detected before the main loop
    #[error("Invalid argument: {param} - {message}")]
    InvalidArgument { param: String, message: String },

    /// A kernel failed for one output cell
    #[error("Gridding failed at column {column}, row {row}: {message}")]
    ComputationFailure {
        row: usize,
        column: usize,
        message: String,
    },

    /// The progress reporter asked to stop
    #[error("User terminated")]
    UserInterrupt,

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GridError {
    /// Shorthand for an `InvalidArgument` error.
    pub fn invalid(param: impl Into<String>, message: impl Into<String>) -> Self {
        GridError::InvalidArgument {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Whether this error was caused by the progress reporter.
    pub fn is_user_interrupt(&self) -> bool {
        matches!(self, GridError::UserInterrupt)
    }
}

/// Convenience type alias for Results with GridError
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GridError::invalid("algorithm", "Unsupported gridding method 42");
        assert_eq!(
            err.to_string(),
            "Invalid argument: algorithm - Unsupported gridding method 42"
        );

        let err = GridError::ComputationFailure {
            row: 3,
            column: 7,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Gridding failed at column 7, row 3: boom");
        assert!(!err.is_user_interrupt());
        assert!(GridError::UserInterrupt.is_user_interrupt());
    }
}
