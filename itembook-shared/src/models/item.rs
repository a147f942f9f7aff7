/// Item model and database operations
///
/// Items are owned by exactly one user. They are created through the
/// per-user creation endpoint and read back through listings; the service
/// never updates or deletes them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE items (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     title TEXT NOT NULL,
///     description TEXT,
///     owner_id INTEGER NOT NULL REFERENCES users (id)
/// );
/// ```

use serde::Serialize;
use sqlx::sqlite::SqliteExecutor;

/// Item owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Item {
    /// Unique item ID, increasing in insertion order
    pub id: i64,

    /// Item title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// ID of the owning user
    pub owner_id: i64,
}

/// Input for creating a new item
///
/// The owner is passed separately so it can only come from the
/// authenticated caller.
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub title: String,
    pub description: Option<String>,
}

impl Item {
    /// Inserts a new item owned by `owner_id`
    ///
    /// # Errors
    ///
    /// Returns a foreign key violation if `owner_id` does not reference an
    /// existing user.
    pub async fn create<'e, E>(
        executor: E,
        data: CreateItem,
        owner_id: i64,
    ) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        // RETURNING must be stepped to completion or SQLite leaves the
        // autocommit write open on this connection
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (title, description, owner_id)
            VALUES (?, ?, ?)
            RETURNING id, title, description, owner_id
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(owner_id)
        .fetch_all(executor)
        .await?
        .pop()
        .ok_or(sqlx::Error::RowNotFound)?;

        tracing::debug!(item_id = item.id, owner_id, "Created item");
        Ok(item)
    }

    /// Lists one page of the owner's items in insertion order
    ///
    /// `skip` past the end yields an empty page.
    pub async fn list_by_owner<'e, E>(
        executor: E,
        owner_id: i64,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT id, title, description, owner_id
            FROM items
            WHERE owner_id = ?
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(owner_id)
        .bind(i64::from(limit))
        .bind(i64::from(skip))
        .fetch_all(executor)
        .await
    }

    /// Lists every item of the owner in insertion order
    pub async fn all_by_owner<'e, E>(executor: E, owner_id: i64) -> Result<Vec<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT id, title, description, owner_id
            FROM items
            WHERE owner_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(executor)
        .await
    }
}
