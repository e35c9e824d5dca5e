//! JWT session token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::{Role, User};
use crate::domain::DomainError;

/// Uniform message for every token validation failure. A caller must not
/// be able to tell a bad signature from an expired or malformed token.
const INVALID_TOKEN_MESSAGE: &str = "Could not validate credentials";

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (username)
    pub sub: String,
    /// Role granted to the account at login time
    pub role: Role,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a user
    pub fn new(user: &User, ttl_minutes: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(ttl_minutes as i64);

        Self {
            sub: user.username().to_string(),
            role: user.role(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get the username from claims
    pub fn username(&self) -> &str {
        &self.sub
    }
}

/// Configuration for the JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token time-to-live in minutes
    pub ttl_minutes: u64,
}

impl JwtConfig {
    /// Create new JWT configuration
    pub fn new(secret: impl Into<String>, ttl_minutes: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_minutes,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            ttl_minutes: 30,
        }
    }
}

/// Trait for session token operations
pub trait TokenIssuer: Send + Sync + Debug {
    /// Mint a signed token for a user
    fn generate(&self, user: &User) -> Result<String, DomainError>;

    /// Validate a token and return its claims. Pure computation: no I/O,
    /// and all failure modes collapse into one Credential error.
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;

    /// Token time-to-live in minutes
    fn ttl_minutes(&self) -> u64;
}

/// HS256 token service backed by a shared secret
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("ttl_minutes", &self.config.ttl_minutes)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create a JWT service with default configuration
    pub fn with_default_config() -> Self {
        Self::new(JwtConfig::default())
    }
}

impl TokenIssuer for JwtService {
    fn generate(&self, user: &User) -> Result<String, DomainError> {
        let claims = JwtClaims::new(user, self.config.ttl_minutes);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let validation = Validation::default();

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| DomainError::credential(INVALID_TOKEN_MESSAGE))?;

        if token_data.claims.sub.is_empty() {
            return Err(DomainError::credential(INVALID_TOKEN_MESSAGE));
        }

        Ok(token_data.claims)
    }

    fn ttl_minutes(&self) -> u64 {
        self.config.ttl_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    fn create_test_user(role: Role) -> User {
        User::new(UserId::generate(), "testuser", None, "hashed_password", role)
    }

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-12345", 30))
    }

    #[test]
    fn test_generate_and_validate() {
        let service = create_service();
        let user = create_test_user(Role::Standard);

        let token = service.generate(&user).unwrap();
        assert!(!token.is_empty());

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.username(), "testuser");
        assert_eq!(claims.role, Role::Standard);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_role_preserved_in_claims() {
        let service = create_service();
        let admin = create_test_user(Role::Admin);

        let token = service.generate(&admin).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.role, Role::Admin);
        assert!(claims.role.is_admin());
    }

    #[test]
    fn test_invalid_token() {
        let service = create_service();

        let result = service.validate("invalid-token");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new(JwtConfig::new("secret-1", 30));
        let service2 = JwtService::new(JwtConfig::new("secret-2", 30));

        let user = create_test_user(Role::Standard);
        let token = service1.generate(&user).unwrap();

        // Token signed with a different secret must fail validation
        let result = service2.validate(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_corrupted_token() {
        let service = create_service();
        let user = create_test_user(Role::Standard);

        let mut token = service.generate(&user).unwrap();
        token.truncate(token.len() - 4);
        token.push_str("XXXX");

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let service = create_service();
        let user = create_test_user(Role::Standard);

        // Craft claims that expired an hour ago
        let past_time = Utc::now() - Duration::hours(1);
        let claims = JwtClaims {
            sub: user.username().to_string(),
            role: user.role(),
            iat: (past_time - Duration::hours(2)).timestamp(),
            exp: past_time.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-12345"),
        )
        .unwrap();

        let result = service.validate(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_failures_are_indistinguishable() {
        let service = create_service();
        let other = JwtService::new(JwtConfig::new("another-secret", 30));
        let user = create_test_user(Role::Standard);
        let foreign_token = other.generate(&user).unwrap();

        let garbage_err = service.validate("not-a-jwt").unwrap_err().to_string();
        let signature_err = service.validate(&foreign_token).unwrap_err().to_string();

        assert_eq!(garbage_err, signature_err);
    }

    #[test]
    fn test_claims_expiration() {
        let user = create_test_user(Role::Standard);
        let claims = JwtClaims::new(&user, 30);

        assert!(!claims.is_expired());
        assert_eq!(claims.username(), "testuser");
    }

    #[test]
    fn test_default_config() {
        let service = JwtService::with_default_config();
        assert_eq!(service.ttl_minutes(), 30);
    }
}
