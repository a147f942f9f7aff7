/// User model and database operations
///
/// Users are created on registration and read on login and self-lookup.
/// They are never updated or deleted by the service.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     email TEXT NOT NULL UNIQUE,
///     hashed_password TEXT NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT 1
/// );
/// ```

use serde::Serialize;
use sqlx::sqlite::SqliteExecutor;

/// User model representing a registered account
///
/// Passwords are stored as Argon2id hashes, never in plaintext. The hash is
/// skipped during serialization so a `User` can never leak it into a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash (PHC string)
    #[serde(skip_serializing)]
    pub hashed_password: String,

    /// Inactive users can hold a valid token but are refused by protected endpoints
    pub is_active: bool,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub hashed_password: String,
}

impl User {
    /// Inserts a new user row and returns it
    ///
    /// # Errors
    ///
    /// Returns a database error if the email is already registered (unique
    /// constraint violation) or the query fails.
    pub async fn create<'e, E>(executor: E, data: CreateUser) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        // RETURNING must be stepped to completion or SQLite leaves the
        // autocommit write open on this connection
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hashed_password)
            VALUES (?, ?)
            RETURNING id, email, hashed_password, is_active
            "#,
        )
        .bind(data.email)
        .bind(data.hashed_password)
        .fetch_all(executor)
        .await?
        .pop()
        .ok_or(sqlx::Error::RowNotFound)?;

        tracing::debug!(user_id = user.id, "Created user");
        Ok(user)
    }

    /// Finds a user by ID, `None` if absent
    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hashed_password, is_active
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Finds a user by exact email address, `None` if absent
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hashed_password, is_active
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_omits_password_hash() {
        let user = User {
            id: 7,
            email: "user@example.com".to_string(),
            hashed_password: "$argon2id$v=19$secret".to_string(),
            is_active: true,
        };

        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "user@example.com");
        assert_eq!(json["is_active"], true);
        assert!(json.get("hashed_password").is_none());
        assert!(!json.to_string().contains("argon2id"));
    }
}
