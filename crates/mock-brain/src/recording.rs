//! Recording brain - remembers every transcript passed through it.

use brain_core::{async_trait, Brain, BrainError, Turn};
use tokio::sync::Mutex;

/// Wraps another brain and records the transcripts it was asked to complete.
pub struct RecordingBrain<B: Brain> {
    inner: B,
    calls: Mutex<Vec<Vec<Turn>>>,
}

impl<B: Brain> RecordingBrain<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Transcripts seen so far, oldest call first.
    pub async fn calls(&self) -> Vec<Vec<Turn>> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl<B: Brain> Brain for RecordingBrain<B> {
    async fn complete(&self, turns: &[Turn]) -> Result<Option<String>, BrainError> {
        self.calls.lock().await.push(turns.to_vec());
        self.inner.complete(turns).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
