//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_user_id, UserValidationError};

/// User identifier - uuid shaped, alphanumeric + hyphens
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role granted to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular customer: may browse and purchase
    #[default]
    Standard,
    /// May additionally add inventory
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Admin => "admin",
        }
    }
}

/// User entity for authentication
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Username for login
    username: String,
    /// Optional contact email, unique when present
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Role granted to this account
    role: Role,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last login timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: Option<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email,
            password_hash: password_hash.into(),
            role,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    /// Rebuild a user from stored fields, bypassing the creation timestamp
    pub fn restore(
        id: UserId,
        username: impl Into<String>,
        email: Option<String>,
        password_hash: impl Into<String>,
        role: Role,
        created_at: DateTime<Utc>,
        last_login_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email,
            password_hash: password_hash.into(),
            role,
            created_at,
            last_login_at,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Check if the user holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    // Mutators

    /// Record a login
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(username: &str, role: Role) -> User {
        User::new(
            UserId::generate(),
            username,
            Some(format!("{username}@sweetshop.com")),
            "hashed_password",
            role,
        )
    }

    #[test]
    fn test_user_id_valid() {
        let id = UserId::new("admin").unwrap();
        assert_eq!(id.as_str(), "admin");
    }

    #[test]
    fn test_user_id_generate() {
        let a = UserId::generate();
        let b = UserId::generate();
        assert_ne!(a, b);
        assert!(UserId::new(a.as_str()).is_ok());
    }

    #[test]
    fn test_user_id_invalid() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("bad id").is_err());
    }

    #[test]
    fn test_role_checks() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Standard.is_admin());
        assert_eq!(Role::default(), Role::Standard);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Standard).unwrap(),
            "\"standard\""
        );
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user("alice", Role::Standard);

        assert_eq!(user.username(), "alice");
        assert_eq!(user.email(), Some("alice@sweetshop.com"));
        assert_eq!(user.password_hash(), "hashed_password");
        assert!(!user.is_admin());
        assert!(user.last_login_at().is_none());
    }

    #[test]
    fn test_user_record_login() {
        let mut user = create_test_user("alice", Role::Standard);

        assert!(user.last_login_at().is_none());

        user.record_login();
        assert!(user.last_login_at().is_some());
    }

    #[test]
    fn test_user_restore_keeps_timestamps() {
        let created = Utc::now() - chrono::Duration::days(7);
        let user = User::restore(
            UserId::generate(),
            "bob",
            None,
            "hash",
            Role::Admin,
            created,
            None,
        );

        assert_eq!(user.created_at(), created);
        assert!(user.is_admin());
        assert!(user.email().is_none());
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = create_test_user("alice", Role::Standard);

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
    }
}
