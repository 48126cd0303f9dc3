//! Google Gemini-based completion backend.
//!
//! This crate implements [`brain_core::Brain`] on top of the Gemini
//! `generateContent` REST endpoint. The whole transcript is replayed as
//! conversational context and the model answers its last turn.
//!
//! # Usage
//!
//! ```rust,no_run
//! use gemini_brain::{Brain, GeminiBrain, Turn};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = GeminiBrain::from_env()?;
//!     let reply = brain.complete(&[Turn::user("Hello!")]).await?;
//!     println!("{:?}", reply);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::GeminiBrain;
pub use config::{GeminiBrainConfig, GeminiBrainConfigBuilder};

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, Role, Turn};
