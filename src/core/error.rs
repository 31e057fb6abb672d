//! Error types for the water surface core

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Grid dimensions below minimum, non-positive sizes or out-of-range tuning values.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operation was requested before the surface finished initializing.
    #[error("Surface not initialized: {0}")]
    NotInitialized(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidConfiguration`] with a formatted message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
