//! Error types shared across the library.

use thiserror::Error;

/// Library-level error type
#[derive(Debug, Error)]
pub enum OnrampError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Static reference content failed to parse. Fatal at startup, never
    /// produced during guide generation.
    #[error("invalid content: {0}")]
    Content(String),

    #[error("invalid condition '{expr}': {reason}")]
    Condition { expr: String, reason: String },
}

/// Result type alias using OnrampError
pub type Result<T> = std::result::Result<T, OnrampError>;
