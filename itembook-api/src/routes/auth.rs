/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /login` - Exchange username/password for a bearer token
/// - `POST /register` - Create a new account

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    routes::users::UserResponse,
    session::DbSession,
};
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    Form, Json,
};
use itembook_shared::{
    auth::{identity, jwt, password},
    models::user::{CreateUser, User},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// OAuth2 password-flow login form
///
/// Sent as `application/x-www-form-urlencoded`. The username is the
/// account's email address.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,

    pub password: String,

    /// Optional; when present it must be `password`
    pub grant_type: Option<String>,
}

/// Issued bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    /// Always `bearer`
    pub token_type: String,
}

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address, used as the login username
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/x-www-form-urlencoded
///
/// username=alice%40example.com&password=pw123
/// ```
///
/// # Response
///
/// ```json
/// { "access_token": "eyJ...", "token_type": "bearer" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown user or wrong password (with `WWW-Authenticate: Bearer`)
/// - `422 Unprocessable Entity`: Missing or malformed form fields, unsupported `grant_type`
pub async fn login(
    State(state): State<AppState>,
    mut session: DbSession,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Form(form) = form?;

    if let Some(grant_type) = form.grant_type.as_deref() {
        if grant_type != "password" {
            return Err(ApiError::ValidationError(vec![ValidationErrorDetail::new(
                "grant_type",
                "grant_type must be \"password\"",
            )]));
        }
    }

    let user = identity::authenticate(&mut *session, &form.username, &form.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Incorrect username or password".to_string()))?;

    let access_token = jwt::issue_token(user.id, state.token_ttl(), state.jwt_secret())?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// { "email": "alice@example.com", "password": "pw123" }
/// ```
///
/// # Response
///
/// ```json
/// { "id": 1, "email": "alice@example.com", "is_active": true, "items": [] }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Email already registered
/// - `422 Unprocessable Entity`: Malformed body, invalid email or empty password
pub async fn register(
    mut session: DbSession,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(req) = body?;
    req.validate()?;

    if User::find_by_email(&mut *session, &req.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_string()));
    }

    let hashed_password = password::hash_password(&req.password)?;

    // A concurrent registration can still win the race; the unique index
    // turns that into the same 400 via From<sqlx::Error>
    let user = User::create(
        &mut *session,
        CreateUser {
            email: req.email,
            hashed_password,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Registered user");

    Ok(Json(UserResponse::new(user, Vec::new())))
}
