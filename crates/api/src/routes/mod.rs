//! HTTP routes.
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | `GET` | `/health` | no |
//! | `POST` | `/signup` | no |
//! | `POST` | `/login` | no |
//! | `POST`, `GET` | `/api/conversations` | yes |
//! | `GET`, `PUT`, `DELETE` | `/api/conversations/:id` | yes |
//! | `POST` | `/chatbot` | yes |

mod auth;
mod chat;
mod conversations;
mod health;

use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use crate::state::AppState;

pub use auth::{LoginRequest, SignupRequest, TokenResponse};
pub use chat::{ChatRequest, ChatResponse};
pub use conversations::{default_heading, CreateConversationRequest, UpdateConversationRequest};

/// Build the route table. State is attached by the caller.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route(
            "/api/conversations",
            post(conversations::create).get(conversations::list),
        )
        .route(
            "/api/conversations/:id",
            get(conversations::get)
                .put(conversations::update)
                .delete(conversations::delete),
        )
        .route("/chatbot", post(chat::chat))
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub message: &'static str,
}
