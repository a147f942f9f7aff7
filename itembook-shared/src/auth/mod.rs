/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Signed, time-limited bearer tokens
/// - [`identity`]: Username/password authentication and token resolution
///   against the user table
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use itembook_shared::auth::jwt::{issue_token, validate_token};
/// use itembook_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let token = issue_token(1, Duration::minutes(30), "secret-key-at-least-32-bytes-long")?;
/// assert_eq!(validate_token(&token, "secret-key-at-least-32-bytes-long")?.sub, "1");
/// # Ok(())
/// # }
/// ```

pub mod identity;
pub mod jwt;
pub mod password;
