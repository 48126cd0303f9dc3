//! Error types for the HTTP API.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use brain_core::BrainError;
use credentials::CredentialError;
use database::DatabaseError;
use thiserror::Error;

/// Errors surfaced by handlers. Each variant maps to exactly one status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing request data.
    #[error("{0}")]
    InvalidInput(String),

    /// Missing, malformed or expired credential, or a subject that no
    /// longer exists.
    #[error("{0}")]
    Unauthenticated(&'static str),

    /// Login identifier already registered.
    #[error("user already exists")]
    Conflict,

    /// Absent, or owned by someone else.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The completion backend failed, timed out or is not configured.
    #[error("AI service unavailable: {0}")]
    AiUnavailable(String),

    /// Storage error.
    #[error("Database error: {0}")]
    Storage(DatabaseError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, .. } => ApiError::NotFound(match entity {
                "Conversation" => "conversation",
                "User" => "user",
                _ => "resource",
            }),
            DatabaseError::AlreadyExists { .. } => ApiError::Conflict,
            DatabaseError::Validation(err) => ApiError::InvalidInput(err.to_string()),
            other => ApiError::Storage(other),
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Invalid => ApiError::Unauthenticated("invalid or expired token"),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<BrainError> for ApiError {
    fn from(err: BrainError) -> Self {
        ApiError::AiUnavailable(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthenticated(reason) => {
                tracing::warn!(reason = *reason, "Rejected unauthenticated request");
                (StatusCode::UNAUTHORIZED, reason.to_string())
            }
            ApiError::Conflict => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::AiUnavailable(msg) => {
                tracing::error!("AI service unavailable: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to get response from AI".to_string(),
                )
            }
            ApiError::Storage(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database error".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
