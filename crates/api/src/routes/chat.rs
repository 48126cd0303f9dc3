//! Continuation-mode chat.

use axum::extract::State;
use axum::Json;
use database::{conversation, Message};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::extract::ApiJson;
use crate::guard::AuthUser;
use crate::state::AppState;

/// Either a full history or a single legacy `message`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub message: Option<String>,
    /// Owned conversation that should receive the reply.
    #[serde(default)]
    pub conversation_id: Option<String>,
}

impl ChatRequest {
    fn into_history(self) -> Vec<Message> {
        match self.message {
            Some(text) if self.messages.is_empty() => vec![Message::user(text)],
            _ => self.messages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// `POST /chatbot`
pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(mut req): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let conversation_id = req.conversation_id.take();
    let reply = state.bridge.continue_chat(&req.into_history()).await?;

    if let Some(id) = conversation_id {
        if let Err(e) =
            conversation::append_ai_reply(state.db.pool(), &auth.user_id, &id, &reply).await
        {
            warn!(conversation_id = %id, error = %e, "Failed to store chat reply");
        }
    }

    Ok(Json(ChatResponse { reply }))
}
