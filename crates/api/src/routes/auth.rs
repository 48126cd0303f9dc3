//! Account registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use credentials::{hash_password, verify_password};
use database::validation::{validate_age, validate_email, validate_name, validate_password};
use database::{user, DatabaseError, NewUser, User};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ApiError, Result};
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub age: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `POST /signup`
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let email = req.email.trim();
    validate_email(email).map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    validate_password(&req.password).map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    validate_name(&req.name).map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    validate_age(req.age).map_err(|e| ApiError::InvalidInput(e.to_string()))?;

    // Fast path; the unique index still catches a racing signup.
    if user::email_exists(state.db.pool(), email).await? {
        info!(email = %email, "Signup rejected: email already registered");
        return Err(ApiError::Conflict);
    }

    let password = req.password;
    let digest = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(format!("hashing task failed: {e}")))??;

    let created = user::create_user(
        state.db.pool(),
        &NewUser {
            email,
            password_hash: &digest,
            name: req.name.trim(),
            age: req.age,
        },
    )
    .await?;

    info!(user_id = %created.id, "User signed up");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let found = match user::get_user_by_email(state.db.pool(), &req.email).await {
        Ok(found) => found,
        Err(DatabaseError::NotFound { .. }) => {
            warn!("Login failed: unknown email");
            return Err(ApiError::Unauthenticated("invalid credentials"));
        }
        Err(e) => return Err(e.into()),
    };

    let password = req.password;
    let digest = found.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &digest))
        .await
        .map_err(|e| ApiError::Internal(format!("hashing task failed: {e}")))?;

    if !matches {
        warn!(user_id = %found.id, "Login failed: wrong password");
        return Err(ApiError::Unauthenticated("invalid credentials"));
    }

    let token = state.credentials.issue(&found.id)?;
    info!(user_id = %found.id, "User logged in");

    Ok(Json(TokenResponse { token }))
}
