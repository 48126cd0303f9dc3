//! Credential error types.

use thiserror::Error;

/// Errors that can occur while issuing or checking credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Token is malformed, mis-signed, or expired.
    #[error("invalid or expired token")]
    Invalid,

    /// Token could not be produced.
    #[error("token encoding failed: {0}")]
    Encoding(String),

    /// Password could not be hashed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Result type for credential operations.
pub type Result<T> = std::result::Result<T, CredentialError>;
