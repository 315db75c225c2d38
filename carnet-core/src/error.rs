//! Error types for carnet-core

use thiserror::Error;

/// Main error type for the carnet-core library.
///
/// Data-quality problems (missing prices, malformed ratings, dangling
/// restaurant references) never surface here; the analytics engine skips
/// them. `Error` covers contract and environment failures only.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Snapshot error (unreadable or structurally invalid input)
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

/// Result type alias for carnet-core
pub type Result<T> = std::result::Result<T, Error>;
