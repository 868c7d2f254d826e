//! Error types for the Gaon portal.

use thiserror::Error;

/// Errors that can occur in portal operations.
#[derive(Error, Debug)]
pub enum GaonError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status} for {path}")]
    Api { status: u16, path: String },
}

/// Result type alias for portal operations.
pub type GaonResult<T> = Result<T, GaonError>;
