//! Core trait and types for text-completion backends.
//!
//! This crate provides the shared interface between the chat server and
//! whatever generates AI replies. It defines:
//!
//! - [`Brain`] - The trait that all completion backends implement
//! - [`Turn`] / [`Role`] - One entry of the transcript sent to a backend
//! - [`BrainError`] - Error types for completion calls
//!
//! # Example
//!
//! ```rust
//! use brain_core::{Brain, BrainError, Turn};
//! use async_trait::async_trait;
//!
//! struct HelloBrain;
//!
//! #[async_trait]
//! impl Brain for HelloBrain {
//!     async fn complete(&self, _turns: &[Turn]) -> Result<Option<String>, BrainError> {
//!         Ok(Some("Hello!".to_string()))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "HelloBrain"
//!     }
//! }
//! ```

mod error;
mod trait_def;
mod turn;

pub use error::BrainError;
pub use trait_def::Brain;
pub use turn::{Role, Turn};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
