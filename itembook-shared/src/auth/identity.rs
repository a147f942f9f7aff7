/// Credential checks that need the user table
///
/// [`authenticate`] turns a username/password pair into a [`User`], and
/// [`resolve_token`] turns a bearer token back into one. Both accept any
/// SQLite executor so they can run on the pool or a request session.
///
/// # Example
///
/// ```no_run
/// use chrono::Duration;
/// use itembook_shared::auth::{identity, jwt};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool, secret: &str) -> Result<(), Box<dyn std::error::Error>> {
/// if let Some(user) = identity::authenticate(&pool, "alice@example.com", "pw123").await? {
///     let token = jwt::issue_token(user.id, Duration::minutes(30), secret)?;
///     let same = identity::resolve_token(&pool, &token, secret).await?;
///     assert_eq!(same.id, user.id);
/// }
/// # Ok(())
/// # }
/// ```

use sqlx::sqlite::SqliteExecutor;
use tracing::{debug, warn};

use super::jwt::{self, JwtError};
use super::password;
use crate::models::user::User;

/// Error type for identity resolution
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Token failed signature, expiry, issuer or subject checks
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] JwtError),

    /// Token is well-formed but its subject no longer exists
    #[error("Token subject {0} does not exist")]
    UnknownSubject(i64),

    /// Lookup failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Authenticated caller, inserted into request extensions by the bearer layer
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Checks a username (email) and password against the stored hash
///
/// Fails closed: an unknown user, a wrong password or an unreadable stored
/// hash all return `Ok(None)`. Only database failures are errors.
pub async fn authenticate<'e, E>(
    executor: E,
    username: &str,
    plain_password: &str,
) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let Some(user) = User::find_by_email(executor, username).await? else {
        debug!("Login attempt for unknown user");
        return Ok(None);
    };

    match password::verify_password(plain_password, &user.hashed_password) {
        Ok(true) => Ok(Some(user)),
        Ok(false) => {
            debug!(user_id = user.id, "Login attempt with wrong password");
            Ok(None)
        }
        Err(e) => {
            warn!(user_id = user.id, error = %e, "Stored password hash is unusable");
            Ok(None)
        }
    }
}

/// Resolves a bearer token to the user it was issued for
///
/// # Errors
///
/// - `IdentityError::InvalidToken` for bad signatures, expired tokens,
///   foreign issuers or non-numeric subjects
/// - `IdentityError::UnknownSubject` if the user no longer exists
pub async fn resolve_token<'e, E>(executor: E, token: &str, secret: &str) -> Result<User, IdentityError>
where
    E: SqliteExecutor<'e>,
{
    let claims = jwt::validate_token(token, secret)?;
    let user_id = claims.user_id()?;

    User::find_by_id(executor, user_id)
        .await?
        .ok_or(IdentityError::UnknownSubject(user_id))
}
