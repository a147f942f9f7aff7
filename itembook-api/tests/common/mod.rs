//! Common test utilities for integration tests
//!
//! Each `TestContext` owns a throwaway SQLite file with migrations applied
//! and a router built on top of it.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use itembook_api::app::{build_router, AppState};
use itembook_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use itembook_shared::db::migrations::run_migrations;
use itembook_shared::db::pool::{self, create_pool};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::Service as _;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
    pub config: Config,
    _dir: TempDir,
}

impl TestContext {
    /// Creates a new test context with a fresh, migrated database
    pub async fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let url = format!("sqlite://{}", dir.path().join("api.db").display());

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: url.clone(),
                max_connections: 4,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
                access_token_expire_minutes: 30,
            },
        };

        let db = create_pool(pool::DatabaseConfig {
            url,
            max_connections: config.database.max_connections,
            acquire_timeout_seconds: 5,
            ..Default::default()
        })
        .await?;
        run_migrations(&db).await?;

        let app = build_router(AppState::new(db.clone(), config.clone()));

        Ok(Self {
            db,
            app,
            config,
            _dir: dir,
        })
    }

    /// Sends a request through the router and returns status, headers and JSON body
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().call(request).await.unwrap();
        TestResponse::read(response).await
    }

    pub async fn register(&self, email: &str, password: &str) -> TestResponse {
        let body = serde_json::json!({ "email": email, "password": password });
        self.send(json_request("POST", "/register", None, &body)).await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        let form =
            serde_urlencoded::to_string(vec![("username", username), ("password", password)])
                .unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();
        self.send(request).await
    }

    /// Registers and logs in, returning `(user_id, token)`
    pub async fn signup(&self, email: &str, password: &str) -> (i64, String) {
        let registered = self.register(email, password).await;
        assert_eq!(registered.status, StatusCode::OK, "register failed: {}", registered.body);

        let logged_in = self.login(email, password).await;
        assert_eq!(logged_in.status, StatusCode::OK, "login failed: {}", logged_in.body);

        (
            registered.body["id"].as_i64().unwrap(),
            logged_in.body["access_token"].as_str().unwrap().to_string(),
        )
    }

    pub async fn create_item(&self, token: &str, path_user_id: i64, body: Value) -> TestResponse {
        let uri = format!("/users/{}/items", path_user_id);
        self.send(json_request("POST", &uri, Some(token), &body)).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }
}

/// Buffered response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestResponse {
    async fn read(response: Response<Body>) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        Self {
            status,
            headers,
            body,
        }
    }

    pub fn challenge(&self) -> Option<&str> {
        self.headers
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
