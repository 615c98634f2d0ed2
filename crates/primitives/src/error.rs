//! Error types for primitive parsing and blob encoding.

use thiserror::Error;

/// Errors raised while parsing or encoding primitive values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Input had the wrong shape (length, characters).
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Error message.
        message: String,
    },

    /// Binary blob could not be encoded or decoded.
    #[error("Codec error: {message}")]
    Codec {
        /// Error message.
        message: String,
    },
}

impl PrimitiveError {
    /// Create an invalid format error.
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a codec error.
    pub fn codec<S: Into<String>>(message: S) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }
}

/// Result type for primitive operations.
pub type PrimitiveResult<T> = std::result::Result<T, PrimitiveError>;
