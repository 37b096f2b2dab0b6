//! Error handling module for the hlot CLI.
//!
//! This module provides custom error types using `thiserror` for structured
//! error handling throughout the application.

use hloc_util::BufferError;
use thiserror::Error;

/// Main error type for the hlot CLI application.
#[derive(Error, Debug)]
pub enum HlotError {
    /// Error when the configuration cannot be found or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when command-line input validation fails.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The input contains text that cannot be lexed.
    #[error("Lexing failed at {line}:{column}")]
    Lex {
        /// 1-based line of the offending token
        line: usize,
        /// Column of the offending token as reported by the lexer
        column: usize,
    },

    /// Error when a location does not fit the input buffer.
    #[error("Location error: {0}")]
    Buffer(#[from] BufferError),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using HlotError.
pub type Result<T> = std::result::Result<T, HlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = HlotError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_validation_error_display() {
        let err = HlotError::Validation("invalid format".to_string());
        assert_eq!(err.to_string(), "Validation error: invalid format");
    }

    #[test]
    fn test_lex_error_display() {
        let err = HlotError::Lex { line: 3, column: 7 };
        assert_eq!(err.to_string(), "Lexing failed at 3:7");
    }

    #[test]
    fn test_buffer_error_conversion() {
        let err: HlotError = BufferError::OutOfRange { offset: 9, len: 3 }.into();
        assert!(matches!(err, HlotError::Buffer(_)));
        assert_eq!(
            err.to_string(),
            "Location error: Offset 9 out of range for buffer of 3 bytes"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let hlot_err: HlotError = io_err.into();
        assert!(matches!(hlot_err, HlotError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let hlot_err: HlotError = json_err.into();
        assert!(matches!(hlot_err, HlotError::Json(_)));
    }
}
