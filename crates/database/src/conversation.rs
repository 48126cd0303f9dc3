//! Ownership-scoped conversation storage.
//!
//! Every statement that touches an existing conversation filters on both
//! `id` and `user_id` in a single predicate. A conversation that exists but
//! belongs to someone else is reported exactly like one that does not exist.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{
    Conversation, ConversationHeader, ConversationHeaderRow, ConversationRow, Message,
};
use crate::validation::ValidationError;

fn not_found(id: &str) -> DatabaseError {
    DatabaseError::NotFound {
        entity: "Conversation",
        id: id.to_string(),
    }
}

/// Create a conversation owned by `owner_id`.
///
/// Fails with a validation error when `messages` is empty.
pub async fn create_conversation(
    pool: &SqlitePool,
    owner_id: &str,
    heading: &str,
    messages: &[Message],
) -> Result<Conversation> {
    if messages.is_empty() {
        return Err(ValidationError::Empty("messages".to_string()).into());
    }

    let now = Utc::now();
    let id = Uuid::new_v4().to_string();

    let row = sqlx::query_as::<_, ConversationRow>(
        r#"
        INSERT INTO conversations (id, user_id, heading, messages, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, user_id, heading, messages, updated_at
        "#,
    )
    .bind(&id)
    .bind(owner_id)
    .bind(heading)
    .bind(Json(messages))
    .bind(now.timestamp_micros())
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// List the owner's conversations without their messages, most recently
/// updated first.
pub async fn list_headers(pool: &SqlitePool, owner_id: &str) -> Result<Vec<ConversationHeader>> {
    let rows = sqlx::query_as::<_, ConversationHeaderRow>(
        r#"
        SELECT id, user_id, heading, updated_at
        FROM conversations
        WHERE user_id = ?
        ORDER BY updated_at DESC, rowid DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Get one of the owner's conversations with its full transcript.
pub async fn get_conversation(
    pool: &SqlitePool,
    owner_id: &str,
    id: &str,
) -> Result<Conversation> {
    sqlx::query_as::<_, ConversationRow>(
        r#"
        SELECT id, user_id, heading, messages, updated_at
        FROM conversations
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .map(Into::into)
    .ok_or_else(|| not_found(id))
}

/// Replace heading and transcript of one of the owner's conversations.
pub async fn update_conversation(
    pool: &SqlitePool,
    owner_id: &str,
    id: &str,
    heading: &str,
    messages: &[Message],
) -> Result<Conversation> {
    sqlx::query_as::<_, ConversationRow>(
        r#"
        UPDATE conversations
        SET heading = ?, messages = ?, updated_at = ?
        WHERE id = ? AND user_id = ?
        RETURNING id, user_id, heading, messages, updated_at
        "#,
    )
    .bind(heading)
    .bind(Json(messages))
    .bind(Utc::now().timestamp_micros())
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .map(Into::into)
    .ok_or_else(|| not_found(id))
}

/// Append one AI-authored message to the end of the transcript.
///
/// The append happens inside a single statement, so a concurrent update or
/// delete either sees the reply or does not; it never sees half of it.
pub async fn append_ai_reply(
    pool: &SqlitePool,
    owner_id: &str,
    id: &str,
    reply: &str,
) -> Result<Conversation> {
    sqlx::query_as::<_, ConversationRow>(
        r#"
        UPDATE conversations
        SET messages = json_insert(messages, '$[#]', json(?)), updated_at = ?
        WHERE id = ? AND user_id = ?
        RETURNING id, user_id, heading, messages, updated_at
        "#,
    )
    .bind(Json(Message::ai(reply)))
    .bind(Utc::now().timestamp_micros())
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .map(Into::into)
    .ok_or_else(|| not_found(id))
}

/// Delete one of the owner's conversations.
pub async fn delete_conversation(pool: &SqlitePool, owner_id: &str, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM conversations
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::NewUser;
    use crate::{user, Database};

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    async fn make_user(db: &Database, email: &str) -> String {
        let new_user = NewUser {
            email,
            password_hash: "$argon2id$v=19$fake",
            name: "Test",
            age: 30,
        };
        user::create_user(db.pool(), &new_user).await.unwrap().id
    }

    fn transcript() -> Vec<Message> {
        vec![Message::user("hi"), Message::ai("hello"), Message::user("how are you?")]
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let db = test_db().await;
        let alice = make_user(&db, "alice@x.com").await;

        let created = create_conversation(db.pool(), &alice, "Greetings", &transcript())
            .await
            .unwrap();
        assert_eq!(created.user_id, alice);

        let fetched = get_conversation(db.pool(), &alice, &created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.heading, "Greetings");
        assert_eq!(fetched.messages, transcript());
    }

    #[tokio::test]
    async fn test_create_rejects_empty_messages() {
        let db = test_db().await;
        let alice = make_user(&db, "alice@x.com").await;

        let result = create_conversation(db.pool(), &alice, "Empty", &[]).await;
        assert!(matches!(
            result,
            Err(DatabaseError::Validation(ValidationError::Empty(_)))
        ));
        assert!(list_headers(db.pool(), &alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_owner_sees_not_found() {
        let db = test_db().await;
        let pool = db.pool();
        let alice = make_user(&db, "alice@x.com").await;
        let bob = make_user(&db, "bob@x.com").await;

        let conv = create_conversation(pool, &alice, "Private", &transcript())
            .await
            .unwrap();

        assert!(matches!(
            get_conversation(pool, &bob, &conv.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            update_conversation(pool, &bob, &conv.id, "Hijacked", &[]).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            append_ai_reply(pool, &bob, &conv.id, "injected").await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            delete_conversation(pool, &bob, &conv.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(list_headers(pool, &bob).await.unwrap().is_empty());

        // Alice's copy is untouched.
        let fetched = get_conversation(pool, &alice, &conv.id).await.unwrap();
        assert_eq!(fetched, conv);
    }

    #[tokio::test]
    async fn test_list_headers_sorted_by_recency() {
        let db = test_db().await;
        let pool = db.pool();
        let alice = make_user(&db, "alice@x.com").await;

        let first = create_conversation(pool, &alice, "first", &transcript())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = create_conversation(pool, &alice, "second", &transcript())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let third = create_conversation(pool, &alice, "third", &transcript())
            .await
            .unwrap();

        let ids: Vec<_> = list_headers(pool, &alice)
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(ids, vec![third.id.clone(), second.id.clone(), first.id.clone()]);

        // Touching the oldest moves it to the front.
        tokio::time::sleep(Duration::from_millis(5)).await;
        append_ai_reply(pool, &alice, &first.id, "bump").await.unwrap();

        let headers = list_headers(pool, &alice).await.unwrap();
        assert_eq!(headers[0].id, first.id);
        assert!(headers.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    }

    #[tokio::test]
    async fn test_update_replaces_whole_document() {
        let db = test_db().await;
        let pool = db.pool();
        let alice = make_user(&db, "alice@x.com").await;

        let conv = create_conversation(pool, &alice, "Old", &transcript())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;

        let replacement = vec![Message::user("only this")];
        let updated = update_conversation(pool, &alice, &conv.id, "New", &replacement)
            .await
            .unwrap();

        assert_eq!(updated.heading, "New");
        assert_eq!(updated.messages, replacement);
        assert_eq!(updated.user_id, alice);
        assert!(updated.updated_at > conv.updated_at);
        assert_eq!(get_conversation(pool, &alice, &conv.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_append_ai_reply_keeps_order() {
        let db = test_db().await;
        let pool = db.pool();
        let alice = make_user(&db, "alice@x.com").await;

        let conv = create_conversation(pool, &alice, "Chat", &transcript())
            .await
            .unwrap();
        append_ai_reply(pool, &alice, &conv.id, "I'm fine").await.unwrap();
        let appended = append_ai_reply(pool, &alice, &conv.id, "And you?").await.unwrap();

        let mut expected = transcript();
        expected.push(Message::ai("I'm fine"));
        expected.push(Message::ai("And you?"));
        assert_eq!(appended.messages, expected);
        assert_eq!(
            get_conversation(pool, &alice, &conv.id).await.unwrap().messages,
            expected
        );
    }

    #[tokio::test]
    async fn test_append_reply_with_quotes_and_unicode() {
        let db = test_db().await;
        let pool = db.pool();
        let alice = make_user(&db, "alice@x.com").await;

        let conv = create_conversation(pool, &alice, "Chat", &[Message::user("hi")])
            .await
            .unwrap();
        let reply = "He said \"ok\" \u{2014} then left.\n";
        let appended = append_ai_reply(pool, &alice, &conv.id, reply).await.unwrap();
        assert_eq!(appended.messages.last(), Some(&Message::ai(reply)));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let db = test_db().await;
        let pool = db.pool();
        let alice = make_user(&db, "alice@x.com").await;

        let conv = create_conversation(pool, &alice, "Bye", &transcript())
            .await
            .unwrap();

        delete_conversation(pool, &alice, &conv.id).await.unwrap();
        assert!(matches!(
            delete_conversation(pool, &alice, &conv.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            get_conversation(pool, &alice, &conv.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_deleting_user_removes_conversations() {
        let db = test_db().await;
        let pool = db.pool();
        let alice = make_user(&db, "alice@x.com").await;

        create_conversation(pool, &alice, "Gone", &transcript())
            .await
            .unwrap();
        user::delete_user(pool, &alice).await.unwrap();

        assert!(list_headers(pool, &alice).await.unwrap().is_empty());
    }
}
