//! Error types for completion calls.

use thiserror::Error;

/// Errors that can occur while requesting a completion.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The backend is missing configuration it needs (API key, URL).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never reached the backend or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with an error or an unreadable payload.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The backend is temporarily unavailable.
    #[error("brain unavailable: {0}")]
    Unavailable(String),

    /// The completion did not finish in time.
    #[error("completion timed out")]
    Timeout,
}
