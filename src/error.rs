//! Error handling for the upload widgets
//!
//! This module defines the error types used throughout the library.
//! Most of them never reach the caller: the controller logs them and
//! settles its own state, and only returns them from the low-level
//! operations so hosts and tests can observe what happened.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, UploadError>;

/// Error types that can occur while binding or running an upload
#[derive(Error, Debug)]
pub enum UploadError {
    /// The element handed to the controller cannot be bound
    #[error("Invalid upload target: {element}")]
    InvalidTarget { element: String },

    /// The staged file exceeds the configured maximum size
    #[error("File too large: {name} is {size} bytes, maximum is {max} bytes")]
    FileTooLarge { name: String, size: u64, max: u64 },

    /// Invalid parameter
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    /// The asynchronous multipart transfer failed
    #[error("Transfer failed: {message}")]
    Transport { message: String },

    /// A browser API call failed
    #[error("DOM operation failed: {operation} - {message}")]
    Dom { operation: String, message: String },

    /// Operation timed out
    #[error("Operation timed out: {operation}")]
    Timeout { operation: String },

    /// A frame event arrived for a frame the controller is not waiting on
    #[error("No active upload frame named {name}")]
    UnexpectedFrame { name: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UploadError {
    /// Create a new invalid target error
    pub fn invalid_target(element: impl Into<String>) -> Self {
        UploadError::InvalidTarget {
            element: element.into(),
        }
    }

    /// Create a new file too large error
    pub fn file_too_large(name: impl Into<String>, size: u64, max: u64) -> Self {
        UploadError::FileTooLarge {
            name: name.into(),
            size,
            max,
        }
    }

    /// Create a new invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        UploadError::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a new transport error
    pub fn transport(message: impl Into<String>) -> Self {
        UploadError::Transport {
            message: message.into(),
        }
    }

    /// Create a new DOM error
    pub fn dom(operation: impl Into<String>, message: impl Into<String>) -> Self {
        UploadError::Dom {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout(operation: impl Into<String>) -> Self {
        UploadError::Timeout {
            operation: operation.into(),
        }
    }

    /// Create a new unexpected frame error
    pub fn unexpected_frame(name: impl Into<String>) -> Self {
        UploadError::UnexpectedFrame { name: name.into() }
    }

    /// Whether the error is a size-limit violation
    pub fn is_size_violation(&self) -> bool {
        matches!(self, UploadError::FileTooLarge { .. })
    }
}
