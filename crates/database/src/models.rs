//! Database models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A registered account.
///
/// `password_hash` is loaded for login checks but is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    /// UUID assigned at signup.
    pub id: String,
    /// Login identifier, unique ignoring case.
    pub email: String,
    /// Argon2 digest of the password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name
    pub name: String,
    pub age: i64,
}

/// Fields needed to register an account.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub age: i64,
}

/// One entry of a conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub text: String,
    /// `true` when written by the user, `false` for AI replies.
    pub is_user: bool,
    /// Client-side placeholder marker; carries no meaning here.
    #[serde(default, skip_serializing_if = "is_false")]
    pub loading: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Message {
    /// Create a user-authored message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            loading: false,
        }
    }

    /// Create an AI-authored message.
    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            loading: false,
        }
    }
}

/// A conversation with its full transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    /// Owning user; never changes after creation.
    pub user_id: String,
    pub heading: String,
    /// Transcript in insertion order.
    pub messages: Vec<Message>,
    pub updated_at: DateTime<Utc>,
}

/// Summary projection of a conversation, without its messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationHeader {
    pub id: String,
    pub user_id: String,
    pub heading: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub(crate) struct ConversationRow {
    pub id: String,
    pub user_id: String,
    pub heading: String,
    pub messages: Json<Vec<Message>>,
    pub updated_at: i64,
}

impl From<ConversationRow> for Conversation {
    fn from(row: ConversationRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            heading: row.heading,
            messages: row.messages.0,
            updated_at: from_micros(row.updated_at),
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ConversationHeaderRow {
    pub id: String,
    pub user_id: String,
    pub heading: String,
    pub updated_at: i64,
}

impl From<ConversationHeaderRow> for ConversationHeader {
    fn from(row: ConversationHeaderRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            heading: row.heading,
            updated_at: from_micros(row.updated_at),
        }
    }
}

pub(crate) fn from_micros(micros: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(micros).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_never_serializes_digest() {
        let user = User {
            id: "u1".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            name: "Ada".to_string(),
            age: 36,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("argon2"));
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn test_message_wire_shape() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"text":"hi","isUser":true}"#);

        let loading: Message =
            serde_json::from_str(r#"{"text":"","isUser":false,"loading":true}"#).unwrap();
        assert!(loading.loading);
        assert!(serde_json::to_string(&loading).unwrap().contains("\"loading\":true"));
    }

    #[test]
    fn test_header_has_no_messages_field() {
        let header = ConversationHeader {
            id: "c1".to_string(),
            user_id: "u1".to_string(),
            heading: "hello".to_string(),
            updated_at: from_micros(1_700_000_000_000_000),
        };

        let json = serde_json::to_value(&header).unwrap();
        assert!(json.get("messages").is_none());
        assert_eq!(json["userId"], "u1");
        assert!(json["updatedAt"].as_str().unwrap().starts_with("2023-11-14T"));
    }
}
