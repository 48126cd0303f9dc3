//! User directory operations.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{NewUser, User};

/// Create a new user with a fresh id.
///
/// Uniqueness of the email is enforced by the table constraint, so two
/// concurrent signups for the same address cannot both succeed; the loser
/// gets `AlreadyExists`.
pub async fn create_user(pool: &SqlitePool, new_user: &NewUser<'_>) -> Result<User> {
    let user = User {
        id: Uuid::new_v4().to_string(),
        email: new_user.email.trim().to_string(),
        password_hash: new_user.password_hash.to_string(),
        name: new_user.name.trim().to_string(),
        age: new_user.age,
    };

    sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, name, age)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.name)
    .bind(user.age)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "User",
                    id: user.email.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(user)
}

/// Check whether an email is already registered.
pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)
        "#,
    )
    .bind(email.trim())
    .fetch_one(pool)
    .await?;

    Ok(exists != 0)
}

/// Check whether a user id refers to a live account.
pub async fn user_exists(pool: &SqlitePool, id: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(exists != 0)
}

/// Get a user by email.
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, name, age
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: email.to_string(),
    })
}

/// Delete a user by ID.
///
/// Their conversations go with them, and outstanding tokens stop
/// resolving.
pub async fn delete_user(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        });
    }

    Ok(())
}
