//! Conversation CRUD. Every handler is scoped to the authenticated owner.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use database::{conversation, Conversation, ConversationHeader, Message};
use serde::Deserialize;
use tracing::{info, warn};

use super::Ack;
use crate::error::Result;
use crate::extract::ApiJson;
use crate::guard::AuthUser;
use crate::state::AppState;

/// Longest heading derived from the first message.
const DEFAULT_HEADING_LEN: usize = 60;

#[derive(Debug, Deserialize)]
pub struct CreateConversationRequest {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateConversationRequest {
    pub heading: String,
    pub messages: Vec<Message>,
}

/// Heading for a conversation created without one.
pub fn default_heading(messages: &[Message]) -> String {
    messages
        .first()
        .map(|m| m.text.trim().chars().take(DEFAULT_HEADING_LEN).collect())
        .unwrap_or_default()
}

/// `POST /api/conversations`
///
/// The conversation is stored before the seed completion runs, so a slow or
/// failing backend never loses the user's message.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateConversationRequest>,
) -> Result<(StatusCode, Json<Conversation>)> {
    let heading = match req.heading {
        Some(heading) if !heading.trim().is_empty() => heading,
        _ => default_heading(&req.messages),
    };

    let mut created = conversation::create_conversation(
        state.db.pool(),
        &auth.user_id,
        &heading,
        &req.messages,
    )
    .await?;
    info!(user_id = %auth.user_id, conversation_id = %created.id, "Conversation created");

    if let Some(reply) = state.bridge.seed_reply(&created.messages).await {
        match conversation::append_ai_reply(state.db.pool(), &auth.user_id, &created.id, &reply)
            .await
        {
            Ok(updated) => created = updated,
            Err(e) => {
                warn!(conversation_id = %created.id, error = %e, "Failed to store seed reply")
            }
        }
    }

    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/conversations`
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ConversationHeader>>> {
    let headers = conversation::list_headers(state.db.pool(), &auth.user_id).await?;
    Ok(Json(headers))
}

/// `GET /api/conversations/:id`
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Conversation>> {
    let found = conversation::get_conversation(state.db.pool(), &auth.user_id, &id).await?;
    Ok(Json(found))
}

/// `PUT /api/conversations/:id`
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateConversationRequest>,
) -> Result<Json<Ack>> {
    conversation::update_conversation(
        state.db.pool(),
        &auth.user_id,
        &id,
        &req.heading,
        &req.messages,
    )
    .await?;

    Ok(Json(Ack {
        message: "conversation updated successfully",
    }))
}

/// `DELETE /api/conversations/:id`
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Ack>> {
    conversation::delete_conversation(state.db.pool(), &auth.user_id, &id).await?;
    info!(user_id = %auth.user_id, conversation_id = %id, "Conversation deleted");

    Ok(Json(Ack {
        message: "conversation deleted successfully",
    }))
}
