/// User endpoints
///
/// - `GET /users/me` - The authenticated caller's record and items

use crate::{
    error::{ApiError, ApiResult},
    session::DbSession,
};
use axum::{Extension, Json};
use itembook_shared::{
    auth::identity::CurrentUser,
    models::{item::Item, user::User},
};
use serde::Serialize;

/// Public view of a user
///
/// Built from [`User`] without its password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
    pub items: Vec<Item>,
}

impl UserResponse {
    pub fn new(user: User, items: Vec<Item>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            items,
        }
    }
}

/// Returns the caller's own record
///
/// The user is looked up again on the request session; if the row vanished
/// after the token was resolved the response is `404 Not Found`.
pub async fn read_current_user(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    mut session: DbSession,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&mut *session, current.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let items = Item::all_by_owner(&mut *session, user.id).await?;

    Ok(Json(UserResponse::new(user, items)))
}
