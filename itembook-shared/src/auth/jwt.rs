/// Bearer token issuance and validation
///
/// Access tokens are JWTs signed with HS256. The subject claim carries the
/// user ID as a decimal string; the token is only valid until `exp`.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Validation**: Signature, expiration, not-before and issuer checks
/// - **Secret Management**: Secrets should be at least 32 bytes (256 bits)
///
/// There is no refresh or revocation: a token stays valid until it expires.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use itembook_shared::auth::jwt::{issue_token, validate_token};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "your-secret-key-at-least-32-bytes";
/// let token = issue_token(1, Duration::minutes(30), secret)?;
///
/// let claims = validate_token(&token, secret)?;
/// assert_eq!(claims.user_id()?, 1);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer written into and required from every token
pub const ISSUER: &str = "itembook";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature, format or claim validation failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token was issued by someone else
    #[error("Invalid issuer")]
    InvalidIssuer,

    /// Subject claim is not a user ID
    #[error("Invalid subject: {0}")]
    InvalidSubject(String),
}

/// JWT claims structure
///
/// - `sub`: Subject (user ID as a string)
/// - `iss`: Issuer (always "itembook")
/// - `iat`: Issued at timestamp
/// - `nbf`: Not before timestamp
/// - `exp`: Expiration timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl Claims {
    /// Creates claims for `user_id` that expire after `ttl`
    ///
    /// A negative `ttl` produces claims that are already expired.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::CreateError` if `now + ttl` is not a representable time
    pub fn new(user_id: i64, ttl: Duration) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::CreateError("Token lifetime out of range".to_string()))?;

        Ok(Self {
            sub: user_id.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    /// Parses the subject back into a user ID
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| JwtError::InvalidSubject(self.sub.clone()))
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets time until expiration
    pub fn time_until_expiration(&self) -> Option<Duration> {
        let now = Utc::now().timestamp();
        if self.exp > now {
            Some(Duration::seconds(self.exp - now))
        } else {
            None
        }
    }
}

/// Signs claims into a compact JWT string
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Issues a bearer token for `user_id` valid for `ttl`
pub fn issue_token(user_id: i64, ttl: Duration, secret: &str) -> Result<String, JwtError> {
    create_token(&Claims::new(user_id, ttl)?, secret)
}

/// Validates a JWT token and extracts claims
///
/// Verifies the signature, `exp`, `nbf` and `iss`. No leeway is applied to
/// expiry.
///
/// # Errors
///
/// - `JwtError::Expired` if the token is past `exp`
/// - `JwtError::InvalidIssuer` if `iss` is not "itembook"
/// - `JwtError::ValidationError` for bad signatures or malformed tokens
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "sub", "iss"]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => JwtError::Expired,
        ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(42, Duration::minutes(30)).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.user_id().unwrap(), 42);
        assert!(!claims.is_expired());

        let time_left = claims.time_until_expiration().unwrap();
        assert!(time_left.num_seconds() > 1790);
        assert!(time_left.num_seconds() <= 1800);
    }

    #[test]
    fn test_unrepresentable_lifetime_is_an_error() {
        let result = issue_token(1, Duration::days(200_000_000), SECRET);
        assert!(matches!(result, Err(JwtError::CreateError(_))));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let token = issue_token(1, Duration::minutes(30), SECRET).expect("Should create token");

        let validated = validate_token(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.user_id().unwrap(), 1);
        assert_eq!(validated.iss, ISSUER);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let token = issue_token(1, Duration::minutes(30), SECRET).unwrap();

        let result = validate_token(&token, "another-secret-key-at-least-32-bytes");
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_validate_expired_token() {
        let claims = Claims::new(1, Duration::seconds(-3600)).unwrap();
        assert!(claims.is_expired());
        assert!(claims.time_until_expiration().is_none());

        let token = create_token(&claims, SECRET).unwrap();
        assert!(matches!(validate_token(&token, SECRET), Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_foreign_issuer() {
        let mut claims = Claims::new(1, Duration::minutes(5)).unwrap();
        claims.iss = "someone-else".to_string();
        let token = create_token(&claims, SECRET).unwrap();

        assert!(matches!(validate_token(&token, SECRET), Err(JwtError::InvalidIssuer)));
    }

    #[test]
    fn test_validate_garbage_token() {
        assert!(validate_token("not.a.jwt", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
    }

    #[test]
    fn test_non_numeric_subject() {
        let mut claims = Claims::new(1, Duration::minutes(5)).unwrap();
        claims.sub = "alice".to_string();
        let token = create_token(&claims, SECRET).unwrap();

        let validated = validate_token(&token, SECRET).unwrap();
        assert!(matches!(validated.user_id(), Err(JwtError::InvalidSubject(_))));
    }
}
