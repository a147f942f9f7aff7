/// Integration tests for credential checks against the user table

use chrono::Duration;
use itembook_shared::auth::identity::{authenticate, resolve_token, IdentityError};
use itembook_shared::auth::jwt::{self, Claims, JwtError};
use itembook_shared::auth::password::hash_password;
use itembook_shared::db::migrations::run_migrations;
use itembook_shared::db::pool::{create_pool, DatabaseConfig};
use itembook_shared::models::user::{CreateUser, User};
use sqlx::SqlitePool;
use tempfile::TempDir;

const SECRET: &str = "identity-test-secret-at-least-32-bytes";

async fn pool_with_alice() -> (TempDir, SqlitePool, User) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pool = create_pool(DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("identity.db").display()),
        max_connections: 2,
        ..Default::default()
    })
    .await
    .expect("Failed to create pool");
    run_migrations(&pool).await.unwrap();

    let alice = User::create(
        &pool,
        CreateUser {
            email: "alice@example.com".to_string(),
            hashed_password: hash_password("pw123").unwrap(),
        },
    )
    .await
    .unwrap();

    (dir, pool, alice)
}

#[tokio::test]
async fn test_authenticate_success() {
    let (_dir, pool, alice) = pool_with_alice().await;

    let user = authenticate(&pool, "alice@example.com", "pw123").await.unwrap();
    assert_eq!(user.map(|u| u.id), Some(alice.id));
}

#[tokio::test]
async fn test_authenticate_wrong_password() {
    let (_dir, pool, _alice) = pool_with_alice().await;

    let user = authenticate(&pool, "alice@example.com", "nope").await.unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn test_authenticate_unknown_user() {
    let (_dir, pool, _alice) = pool_with_alice().await;

    let user = authenticate(&pool, "mallory@example.com", "pw123").await.unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn test_authenticate_fails_closed_on_corrupt_hash() {
    let (_dir, pool, _alice) = pool_with_alice().await;
    User::create(
        &pool,
        CreateUser {
            email: "broken@example.com".to_string(),
            hashed_password: "not-a-phc-string".to_string(),
        },
    )
    .await
    .unwrap();

    let user = authenticate(&pool, "broken@example.com", "anything").await.unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn test_resolve_token_roundtrip() {
    let (_dir, pool, alice) = pool_with_alice().await;

    let token = jwt::issue_token(alice.id, Duration::minutes(30), SECRET).unwrap();
    let resolved = resolve_token(&pool, &token, SECRET).await.unwrap();

    assert_eq!(resolved.id, alice.id);
    assert_eq!(resolved.email, "alice@example.com");
}

#[tokio::test]
async fn test_resolve_expired_token() {
    let (_dir, pool, alice) = pool_with_alice().await;

    let token = jwt::issue_token(alice.id, Duration::seconds(-60), SECRET).unwrap();
    let result = resolve_token(&pool, &token, SECRET).await;

    assert!(matches!(result, Err(IdentityError::InvalidToken(JwtError::Expired))));
}

#[tokio::test]
async fn test_resolve_token_with_wrong_signature() {
    let (_dir, pool, alice) = pool_with_alice().await;

    let token = jwt::issue_token(alice.id, Duration::minutes(30), "a-completely-different-secret-value").unwrap();
    let result = resolve_token(&pool, &token, SECRET).await;

    assert!(matches!(result, Err(IdentityError::InvalidToken(_))));
}

#[tokio::test]
async fn test_resolve_token_for_missing_user() {
    let (_dir, pool, _alice) = pool_with_alice().await;

    let token = jwt::issue_token(999, Duration::minutes(30), SECRET).unwrap();
    let result = resolve_token(&pool, &token, SECRET).await;

    assert!(matches!(result, Err(IdentityError::UnknownSubject(999))));
}

#[tokio::test]
async fn test_resolve_token_with_non_numeric_subject() {
    let (_dir, pool, _alice) = pool_with_alice().await;

    let mut claims = Claims::new(1, Duration::minutes(30)).unwrap();
    claims.sub = "alice@example.com".to_string();
    let token = jwt::create_token(&claims, SECRET).unwrap();

    let result = resolve_token(&pool, &token, SECRET).await;
    assert!(matches!(
        result,
        Err(IdentityError::InvalidToken(JwtError::InvalidSubject(_)))
    ));
}
