/// Database models for Itembook
///
/// This module contains the database models and their data-access operations.
/// Every operation takes any SQLite executor, so callers can pass either the
/// pool or a request-scoped connection (`&mut *conn`).
///
/// # Models
///
/// - `user`: Registered accounts and credential lookup
/// - `item`: Records owned by a user
///
/// # Example
///
/// ```no_run
/// use itembook_shared::models::item::{CreateItem, Item};
/// use itembook_shared::models::user::{CreateUser, User};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let mut conn = pool.acquire().await?;
///
/// let user = User::create(
///     &mut *conn,
///     CreateUser {
///         email: "user@example.com".to_string(),
///         hashed_password: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
///
/// Item::create(
///     &mut *conn,
///     CreateItem { title: "First".to_string(), description: None },
///     user.id,
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod item;
pub mod user;
