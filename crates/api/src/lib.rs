//! Adya chat HTTP API.
//!
//! Accounts, bearer-token sessions, owner-scoped conversations and AI
//! replies, served with axum over the `database`, `credentials` and
//! `brain-core` crates.
//!
//! The binary wires [`Config`], a [`Database`](database::Database), a
//! [`CredentialService`](credentials::CredentialService) and an optional
//! Gemini backend into an [`AppState`] and serves [`app`].

pub mod bridge;
pub mod config;
pub mod error;
pub mod extract;
pub mod guard;
pub mod routes;
pub mod state;

pub use bridge::{CompletionBridge, FALLBACK_REPLY};
pub use config::{Config, ConfigError};
pub use error::{ApiError, Result};
pub use guard::AuthUser;
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the application router with request tracing.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
