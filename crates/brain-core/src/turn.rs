//! Transcript entries sent to a completion backend.

use serde::{Deserialize, Serialize};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Written by the person chatting.
    User,
    /// Generated by the model.
    Model,
}

/// A single entry of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Create a model turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }

    /// Build a turn from an authorship flag.
    pub fn from_author(is_user: bool, text: impl Into<String>) -> Self {
        if is_user {
            Self::user(text)
        } else {
            Self::model(text)
        }
    }
}
