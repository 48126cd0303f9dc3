//! AI completion bridge.
//!
//! Two interaction patterns share one backend:
//!
//! - **Seed mode** runs right after a conversation is created. It sends only
//!   the first user message and never fails the request: any backend error is
//!   logged and the conversation is returned without a reply.
//! - **Continuation mode** replays the whole transcript and asks for a reply
//!   to the latest turn. Errors surface as [`ApiError::AiUnavailable`].
//!
//! Every backend call is bounded by the configured timeout.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use brain_core::{Brain, BrainError, Turn};
use database::Message;
use tracing::{debug, info, warn};

use crate::error::ApiError;

/// Reply used when the backend answers without any usable text.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a response.";

/// Handle to the optional completion backend.
#[derive(Clone)]
pub struct CompletionBridge {
    brain: Option<Arc<dyn Brain>>,
    timeout: Duration,
}

impl CompletionBridge {
    pub fn new(brain: Option<Arc<dyn Brain>>, timeout: Duration) -> Self {
        Self { brain, timeout }
    }

    /// A bridge with no backend. Seed mode skips, continuation mode fails.
    pub fn disabled() -> Self {
        Self::new(None, Duration::from_secs(30))
    }

    /// Ask for a reply to a freshly created conversation.
    ///
    /// Returns `None` when there is nothing to prompt with, no backend, or the
    /// backend failed. Failures are logged here and go no further.
    pub async fn seed_reply(&self, messages: &[Message]) -> Option<String> {
        let prompt = messages
            .iter()
            .find(|m| m.is_user && !m.loading && !m.text.trim().is_empty())?;

        match self.complete(&[Turn::user(prompt.text.clone())]).await {
            Ok(Some(reply)) => Some(reply),
            Ok(None) => {
                info!("Seed completion returned no text; conversation left without reply");
                None
            }
            Err(e) => {
                warn!(error = %e, "Seed completion failed; conversation left without reply");
                None
            }
        }
    }

    /// Reply to the latest turn of `messages`.
    ///
    /// An empty reply from the backend becomes [`FALLBACK_REPLY`].
    pub async fn continue_chat(&self, messages: &[Message]) -> Result<String, ApiError> {
        let turns = transcript(messages);
        if turns.is_empty() {
            return Err(ApiError::InvalidInput(
                "message history cannot be empty".to_string(),
            ));
        }

        let reply = self.complete(&turns).await?;
        Ok(reply.unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }

    async fn complete(&self, turns: &[Turn]) -> Result<Option<String>, BrainError> {
        let brain = self
            .brain
            .as_ref()
            .ok_or_else(|| BrainError::Configuration("no completion backend configured".into()))?;

        debug!(brain = brain.name(), turns = turns.len(), "Requesting completion");

        let reply = tokio::time::timeout(self.timeout, brain.complete(turns))
            .await
            .map_err(|_| BrainError::Timeout)??;

        Ok(reply.filter(|text| !text.trim().is_empty()))
    }
}

impl fmt::Debug for CompletionBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionBridge")
            .field("brain", &self.brain.as_ref().map(|b| b.name()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Convert stored messages to backend turns.
///
/// Loading placeholders and blank entries are dropped; order is preserved.
pub fn transcript(messages: &[Message]) -> Vec<Turn> {
    messages
        .iter()
        .filter(|m| !m.loading && !m.text.trim().is_empty())
        .map(|m| Turn::from_author(m.is_user, m.text.clone()))
        .collect()
}
