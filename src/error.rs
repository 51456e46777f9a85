//! Error taxonomy shared by the API clients, favorites store and player
//!
//! Every variant is caught at the user action that triggered it and shown
//! inline in the affected region. Nothing here is fatal to a session.

use thiserror::Error;

/// Errors surfaced by cinetui operations
#[derive(Error, Debug)]
pub enum CineError {
    /// The metadata API reported no result or a failed lookup
    #[error("{0}")]
    NotFound(String),

    /// Stream resolution succeeded but carried no usable URL
    #[error("No stream available")]
    NoStreamAvailable,

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// No local player can handle the stream
    #[error("Playback not supported: {0}")]
    UnsupportedPlayback(String),

    /// Response body could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Persisted state could not be written
    #[error("Storage error: {0}")]
    Storage(String),

    /// A required endpoint or key is missing from the config
    #[error("{0} is not configured")]
    NotConfigured(String),
}

/// Result alias for cinetui operations
pub type Result<T> = std::result::Result<T, CineError>;

impl From<std::io::Error> for CineError {
    fn from(err: std::io::Error) -> Self {
        CineError::Storage(err.to_string())
    }
}
