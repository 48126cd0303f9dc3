//! Mock completion backends.
//!
//! This crate provides mock implementations of the `Brain` trait for testing:
//! - `EchoBrain` - Echoes the latest turn back
//! - `SilentBrain` - Answers without any usable text
//! - `FailingBrain` - Always fails
//! - `DelayedBrain` - Wraps another brain with artificial delay
//! - `RecordingBrain` - Wraps another brain and keeps every transcript it saw
//!
//! For production completions, use the `gemini-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, EchoBrain, Turn};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = EchoBrain::with_prefix("Echo: ");
//!
//!     let reply = brain.complete(&[Turn::user("Hello!")]).await?;
//!     assert_eq!(reply.as_deref(), Some("Echo: Hello!"));
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod recording;
mod scripted;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, Role, Turn};

pub use delayed::DelayedBrain;
pub use echo::EchoBrain;
pub use recording::RecordingBrain;
pub use scripted::{FailingBrain, SilentBrain};
