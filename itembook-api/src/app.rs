/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use itembook_api::{app::AppState, config::Config};
/// use sqlx::SqlitePool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = SqlitePool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = itembook_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use chrono::Duration;
use itembook_shared::auth::identity::{self, CurrentUser};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Lifetime of newly issued access tokens
    pub fn token_ttl(&self) -> Duration {
        self.config.jwt.access_token_ttl()
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health                     # Health check (public)
/// ├── POST /login                      # Form login, returns bearer token (public)
/// ├── POST /register                   # Create account (public)
/// ├── GET  /users/me                   # Caller's record (bearer)
/// ├── POST /users/:user_id/items       # Create item owned by caller (bearer)
/// └── GET  /items                      # Caller's items, paginated (bearer)
/// ```
///
/// The item routes are also served with a trailing slash.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Bearer authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/login", post(routes::auth::login))
        .route("/register", post(routes::auth::register));

    let protected_routes = Router::new()
        .route("/users/me", get(routes::users::read_current_user))
        .route("/users/:user_id/items", post(routes::items::create_item_for_user))
        .route("/users/:user_id/items/", post(routes::items::create_item_for_user))
        .route("/items", get(routes::items::list_items))
        .route("/items/", get(routes::items::list_items))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    let cors = if state.config.api.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(allowed_origins(&state.config.api.cors_origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer authentication middleware layer
///
/// Resolves the `Authorization: Bearer <token>` header to a user and injects
/// [`CurrentUser`] into request extensions. Any token problem is a 401 with a
/// `WWW-Authenticate: Bearer` challenge; a valid token for an inactive user
/// is a 400.
async fn bearer_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req)
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    let user = identity::resolve_token(&state.db, &token, state.jwt_secret()).await?;

    if !user.is_active {
        tracing::debug!(user_id = user.id, "Rejected inactive user");
        return Err(ApiError::BadRequest("Inactive user".to_string()));
    }

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Parses configured CORS origins, skipping entries that are not valid header values
fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    origin = %origin.escape_debug(),
                    error = %e,
                    "Ignoring invalid CORS origin"
                );
                None
            }
        })
        .collect()
}

/// Extracts the token from an `Authorization: Bearer` header
///
/// The scheme is matched case-insensitively.
fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(header_value: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/items");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&request_with(Some("Bearer abc.def.ghi"))), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&request_with(Some("bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&request_with(Some("Basic dXNlcjpwdw=="))), None);
        assert_eq!(bearer_token(&request_with(Some("Bearer "))), None);
        assert_eq!(bearer_token(&request_with(Some("Bearer"))), None);
        assert_eq!(bearer_token(&request_with(None)), None);
    }

    #[test]
    fn test_invalid_cors_origins_are_skipped() {
        let origins = vec![
            "https://app.example".to_string(),
            "https://bad\norigin".to_string(),
            "http://localhost:3000".to_string(),
        ];

        assert_eq!(
            allowed_origins(&origins),
            vec![
                HeaderValue::from_static("https://app.example"),
                HeaderValue::from_static("http://localhost:3000"),
            ]
        );
    }
}
