//! The Brain trait definition.

use async_trait::async_trait;

use crate::error::BrainError;
use crate::turn::Turn;

/// A backend that turns a transcript into one reply.
///
/// Implementations can range from canned test doubles to hosted model APIs.
/// This trait is object-safe and can be used with `Arc<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Request one completion for the given transcript.
    ///
    /// The last turn is the one being answered; everything before it is
    /// replayed as context, in order.
    ///
    /// Returns `Ok(None)` when the backend answered but produced no usable
    /// text. Callers decide what to substitute.
    async fn complete(&self, turns: &[Turn]) -> Result<Option<String>, BrainError>;

    /// Get a human-readable name for this backend.
    fn name(&self) -> &str;
}
