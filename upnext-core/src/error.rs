//! Error types for the upnext core.

use thiserror::Error;

/// Errors raised when validating API payloads at the wire boundary.
#[derive(Error, Debug)]
pub enum UpNextError {
    #[error("Invalid event '{id}': {reason}")]
    InvalidEvent { id: String, reason: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Result type alias for upnext core operations.
pub type UpNextResult<T> = Result<T, UpNextError>;
