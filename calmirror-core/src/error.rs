//! Error types for calmirror.

use thiserror::Error;

/// Errors that abort a sync run.
///
/// A missing or unreadable state file is not an error: the state store
/// starts over with an empty map.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authorization error for '{vendor}': {message}")]
    Auth { vendor: String, message: String },

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SyncError {
    pub fn remote(context: &str, err: impl std::fmt::Display) -> Self {
        SyncError::Remote(format!("{}: {}", context, err))
    }
}

/// Result type alias for calmirror operations.
pub type SyncResult<T> = Result<T, SyncError>;
