//! Brains with fixed outcomes, for exercising failure and fallback paths.

use async_trait::async_trait;
use brain_core::{Brain, BrainError, Turn};

/// A brain that answers but never produces usable text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBrain;

#[async_trait]
impl Brain for SilentBrain {
    async fn complete(&self, _turns: &[Turn]) -> Result<Option<String>, BrainError> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "SilentBrain"
    }
}

/// A brain whose every call fails with `BrainError::Unavailable`.
#[derive(Debug, Clone)]
pub struct FailingBrain {
    reason: String,
}

impl FailingBrain {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for FailingBrain {
    fn default() -> Self {
        Self::new("mock backend is down")
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn complete(&self, _turns: &[Turn]) -> Result<Option<String>, BrainError> {
        Err(BrainError::Unavailable(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }
}
