//! Echo brain implementation - echoes the latest turn back.

use async_trait::async_trait;
use brain_core::{Brain, BrainError, Turn};

/// A simple brain that echoes the last turn of the transcript.
///
/// Useful for testing the request flow without any AI processing.
#[derive(Debug, Clone, Default)]
pub struct EchoBrain {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoBrain {
    /// Create a new EchoBrain with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoBrain with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_brain::EchoBrain;
    ///
    /// let brain = EchoBrain::with_prefix("Echo: ");
    /// // Will respond with "Echo: <latest turn>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl Brain for EchoBrain {
    async fn complete(&self, turns: &[Turn]) -> Result<Option<String>, BrainError> {
        let Some(last) = turns.last() else {
            return Ok(None);
        };

        let reply = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, last.text),
            None => last.text.clone(),
        };

        Ok(Some(reply))
    }

    fn name(&self) -> &str {
        "EchoBrain"
    }
}
