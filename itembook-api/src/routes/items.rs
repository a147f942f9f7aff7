/// Item endpoints
///
/// - `POST /users/:user_id/items` - Create an item owned by the caller
/// - `GET /items` - List the caller's items
///
/// Ownership always comes from the bearer token. The `user_id` path segment
/// is accepted for compatibility but never decides who owns the new item.

use crate::{error::ApiResult, session::DbSession};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    Extension, Json,
};
use itembook_shared::{
    auth::identity::CurrentUser,
    models::item::{CreateItem, Item},
};
use serde::Deserialize;
use validator::Validate;

const DEFAULT_LIMIT: i64 = 100;

/// Create item request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    pub description: Option<String>,
}

/// Offset pagination for item listings
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListItemsParams {
    /// Items to skip (default 0)
    #[validate(range(min = 0, message = "skip must not be negative"))]
    pub skip: Option<i64>,

    /// Maximum items to return (default 100)
    #[validate(range(min = 0, message = "limit must not be negative"))]
    pub limit: Option<i64>,
}

impl ListItemsParams {
    /// Resolved `(skip, limit)`; call after validation
    fn window(&self) -> (u32, u32) {
        let clamp = |value: i64| u32::try_from(value.max(0)).unwrap_or(u32::MAX);
        (
            clamp(self.skip.unwrap_or(0)),
            clamp(self.limit.unwrap_or(DEFAULT_LIMIT)),
        )
    }
}

/// Creates an item owned by the authenticated caller
///
/// # Endpoint
///
/// ```text
/// POST /users/1/items
/// Authorization: Bearer eyJ...
/// Content-Type: application/json
///
/// { "title": "x", "description": "optional" }
/// ```
///
/// # Response
///
/// ```json
/// { "id": 1, "title": "x", "description": "optional", "owner_id": 1 }
/// ```
pub async fn create_item_for_user(
    path: Result<Path<i64>, PathRejection>,
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    mut session: DbSession,
    body: Result<Json<CreateItemRequest>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Path(path_user_id) = path?;
    let Json(req) = body?;
    req.validate()?;

    if path_user_id != current.id {
        tracing::debug!(
            path_user_id,
            user_id = current.id,
            "Path user differs from caller, item goes to caller"
        );
    }

    let item = Item::create(
        &mut *session,
        CreateItem {
            title: req.title,
            description: req.description,
        },
        current.id,
    )
    .await?;

    Ok(Json(item))
}

/// Lists the caller's items in insertion order
///
/// # Endpoint
///
/// ```text
/// GET /items?skip=0&limit=100
/// Authorization: Bearer eyJ...
/// ```
///
/// A `skip` past the last item returns `[]`. Negative or non-numeric
/// values are a 422.
pub async fn list_items(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    mut session: DbSession,
    query: Result<Query<ListItemsParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Item>>> {
    let Query(params) = query?;
    params.validate()?;
    let (skip, limit) = params.window();

    let items = Item::list_by_owner(&mut *session, current.id, skip, limit).await?;

    Ok(Json(items))
}
