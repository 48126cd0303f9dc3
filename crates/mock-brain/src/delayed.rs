//! Delayed brain implementation - wraps another brain with artificial delay.

use std::time::Duration;

use brain_core::{async_trait, Brain, BrainError, Turn};
use tokio::time::sleep;

/// A brain that wraps another brain and adds artificial delay.
///
/// Useful for testing timeout handling and simulating AI processing latency.
pub struct DelayedBrain<B: Brain> {
    inner: B,
    delay: Duration,
}

impl<B: Brain> DelayedBrain<B> {
    /// Create a new DelayedBrain wrapping the given brain with the specified delay.
    pub fn new(inner: B, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a brain with a delay in milliseconds.
    pub fn with_millis(inner: B, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }
}

#[async_trait]
impl<B: Brain> Brain for DelayedBrain<B> {
    async fn complete(&self, turns: &[Turn]) -> Result<Option<String>, BrainError> {
        sleep(self.delay).await;
        self.inner.complete(turns).await
    }

    fn name(&self) -> &str {
        "DelayedBrain"
    }
}
