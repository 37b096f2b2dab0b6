//! Core error types for hloc-util crate
//!
//! This module defines error types used throughout the util crate and by the
//! lexer for its fallible helper operations.

use thiserror::Error;

/// Error type for buffer position operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Two positions referencing different buffers were combined
    #[error("Positions reference different buffers")]
    CrossBuffer,

    /// Position does not point at a byte of its buffer
    #[error("Offset {offset} out of range for buffer of {len} bytes")]
    OutOfRange { offset: usize, len: usize },

    /// Subtraction would move the position before the buffer start
    #[error("Cannot move offset {offset} back by {delta}")]
    Underflow { offset: usize, delta: usize },

    /// Span end lies before its start
    #[error("Span end {end} precedes start {start}")]
    InvertedSpan { start: usize, end: usize },

    /// Span does not fall on UTF-8 character boundaries
    #[error("Span {start}..{end} is not on a character boundary")]
    NotCharBoundary { start: usize, end: usize },
}

/// Error type for primitive type resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveTypeError {
    /// Name is not a registered primitive type
    #[error("Unknown primitive type name: {0}")]
    UnknownName(String),

    /// Numeric code does not correspond to a primitive type
    #[error("Unknown primitive type code: {0}")]
    UnknownCode(i32),
}

/// Error type for C-style string unescaping
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnescapeError {
    /// String ends with a lone backslash
    #[error("String cannot end with \\")]
    TrailingBackslash,

    /// Backslash followed by an unsupported character
    #[error("Unknown escape sequence: \\{0}")]
    UnknownEscape(char),

    /// Octal escape larger than one byte
    #[error("Value of \\{0} exceeds 0xff")]
    OctalOutOfRange(String),

    /// `\x` escape without digits, or larger than one byte
    #[error("Invalid hex escape: \\x{0}")]
    InvalidHex(String),

    /// `\u`/`\U` escape that is malformed or not a scalar value
    #[error("Invalid unicode escape: {0}")]
    InvalidUnicode(String),

    /// Decoded bytes are not valid UTF-8
    #[error("Unescaped string is not valid UTF-8")]
    InvalidUtf8,
}

/// Result type alias for buffer operations
pub type BufferResult<T> = std::result::Result<T, BufferError>;

/// Result type alias for primitive type operations
pub type PrimitiveTypeResult<T> = std::result::Result<T, PrimitiveTypeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_error_display() {
        let err = BufferError::OutOfRange { offset: 9, len: 4 };
        assert_eq!(err.to_string(), "Offset 9 out of range for buffer of 4 bytes");
        assert_eq!(
            BufferError::CrossBuffer.to_string(),
            "Positions reference different buffers"
        );
    }

    #[test]
    fn test_primitive_type_error_display() {
        let err = PrimitiveTypeError::UnknownName("f33".to_string());
        assert_eq!(err.to_string(), "Unknown primitive type name: f33");
    }

    #[test]
    fn test_unescape_error_display() {
        assert_eq!(UnescapeError::UnknownEscape('q').to_string(), "Unknown escape sequence: \\q");
        assert_eq!(UnescapeError::TrailingBackslash.to_string(), "String cannot end with \\");
    }
}
