//! Error types and handling infrastructure for encfile.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! The taxonomy is deliberately closed: every failure an operation can surface is
//! either an I/O failure (the storage layer refused the operation) or an encoding
//! failure (bytes and text could not be converted into each other). Callers branch
//! on these two kinds; nothing is collapsed into an empty return value.

use thiserror::Error;

/// The error type for all encfile operations.
#[derive(Error, Debug)]
pub enum EncfileError {
    /// Storage-level failure: file absent, permission denied, device error,
    /// exclusive-create conflict.
    #[error("I/O failure: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Text could not be represented in, or decoded from, a target encoding,
    /// or no encoding could be determined for the input.
    #[error("encoding failure: {message}")]
    Encoding { message: String },
}

/// Standard Result type for encfile operations.
pub type Result<T> = std::result::Result<T, EncfileError>;

impl EncfileError {
    /// Create an Io error from an io::Error with additional context.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an Encoding error with a descriptive message.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// True for storage-level failures.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// True for encode/decode/detection failures.
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding { .. })
    }
}

// Automatic conversion from io::Error for call sites without extra context
impl From<std::io::Error> for EncfileError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "file not found",
            std::io::ErrorKind::PermissionDenied => "permission denied",
            std::io::ErrorKind::AlreadyExists => "file already exists",
            _ => "I/O operation failed",
        };
        Self::Io {
            message: message.to_string(),
            source: err,
        }
    }
}
