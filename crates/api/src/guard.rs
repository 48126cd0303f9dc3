//! Session guard: turns an `Authorization` header into an authenticated user.
//!
//! [`AuthUser`] is an extractor, so a handler that takes one cannot run
//! unless the guard accepted the request. Nothing is cached between
//! requests; each one is verified from scratch.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller's identity, resolved and checked against the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let user_id = state.credentials.verify(token)?;

        // A deleted account revokes every token issued for it.
        if !database::user::user_exists(state.db.pool(), &user_id).await? {
            return Err(ApiError::Unauthenticated("user not found"));
        }

        debug!(user_id = %user_id, "Request authenticated");
        Ok(AuthUser { user_id })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The header must split into exactly two space-separated parts; the scheme
/// is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(ApiError::Unauthenticated("missing authorization header"))?
        .to_str()
        .map_err(|_| ApiError::Unauthenticated("invalid authorization header format"))?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token)
        }
        _ => Err(ApiError::Unauthenticated(
            "invalid authorization header format",
        )),
    }
}
