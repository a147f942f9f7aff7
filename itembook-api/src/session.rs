/// Request-scoped database session
///
/// `DbSession` is an extractor that checks one connection out of the pool for
/// the lifetime of a handler. The connection goes back to the pool when the
/// extractor is dropped, whether the handler returned a response or an error.
///
/// # Example
///
/// ```no_run
/// use itembook_api::{error::ApiResult, session::DbSession};
/// use itembook_shared::models::user::User;
/// use axum::Json;
///
/// async fn handler(mut session: DbSession) -> ApiResult<Json<Option<i64>>> {
///     let user = User::find_by_email(&mut *session, "alice@example.com").await?;
///     Ok(Json(user.map(|u| u.id)))
/// }
/// ```

use crate::{app::AppState, error::ApiError};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::{pool::PoolConnection, Sqlite, SqliteConnection};
use std::ops::{Deref, DerefMut};

/// Pooled connection bound to one request
pub struct DbSession(PoolConnection<Sqlite>);

#[async_trait]
impl FromRequestParts<AppState> for DbSession {
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let conn = state.db.acquire().await?;
        Ok(Self(conn))
    }
}

impl Deref for DbSession {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        &self.0
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        &mut self.0
    }
}
