//! User service for registration and authentication

use std::sync::Arc;

use crate::domain::user::{
    validation::{validate_email, validate_password, validate_username},
    Role, User, UserId, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub role: Role,
}

/// User service for registration and authentication
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user. The plaintext password is hashed and dropped;
    /// it is never stored or logged.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;

        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(email) = &request.email {
            validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::conflict("Username already registered"));
        }

        if let Some(email) = &request.email {
            if self.repository.email_exists(email).await? {
                return Err(DomainError::conflict("Email already registered"));
            }
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let user = User::new(
            UserId::generate(),
            &request.username,
            request.email,
            password_hash,
            request.role,
        );

        self.repository.create(user).await
    }

    /// Authenticate a user with username and password
    ///
    /// Returns None for both an unknown username and a wrong password, so
    /// a caller cannot probe which usernames exist.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let user = match self.repository.get_by_username(username).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        self.repository.record_login(user.id()).await?;

        // Re-fetch to get the updated last_login_at
        self.repository.get(user.id()).await
    }

    /// Get a user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.repository.get_by_username(username).await
    }

    /// Count registered users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::user::password::Argon2Hasher;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn create_service() -> UserService<InMemoryUserRepository, Argon2Hasher> {
        let repository = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(Argon2Hasher::new());
        UserService::new(repository, hasher)
    }

    fn make_request(username: &str, password: &str, email: Option<&str>) -> RegisterUserRequest {
        RegisterUserRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.map(String::from),
            role: Role::Standard,
        }
    }

    #[tokio::test]
    async fn test_register_user() {
        let service = create_service();

        let user = service
            .register(make_request("testuser", "secure_password123", None))
            .await
            .unwrap();

        assert_eq!(user.username(), "testuser");
        assert_eq!(user.role(), Role::Standard);
        // Plaintext never stored
        assert_ne!(user.password_hash(), "secure_password123");
    }

    #[tokio::test]
    async fn test_register_admin() {
        let service = create_service();

        let user = service
            .register(RegisterUserRequest {
                username: "admin".to_string(),
                password: "adminpass".to_string(),
                email: Some("admin@sweetshop.com".to_string()),
                role: Role::Admin,
            })
            .await
            .unwrap();

        assert!(user.is_admin());
        assert_eq!(user.email(), Some("admin@sweetshop.com"));
    }

    #[tokio::test]
    async fn test_register_invalid_username() {
        let service = create_service();

        let result = service
            .register(make_request("ab", "secure_password123", None))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_weak_password() {
        let service = create_service();

        let result = service.register(make_request("testuser", "12345", None)).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_invalid_email() {
        let service = create_service();

        let result = service
            .register(make_request("testuser", "secure_password123", Some("not-an-email")))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let service = create_service();

        service
            .register(make_request("testuser", "secure_password123", None))
            .await
            .unwrap();

        let result = service
            .register(make_request("testuser", "other_password456", None))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = create_service();

        service
            .register(make_request("user1", "secure_password123", Some("same@sweetshop.com")))
            .await
            .unwrap();

        let result = service
            .register(make_request("user2", "secure_password123", Some("same@sweetshop.com")))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let service = create_service();

        service
            .register(make_request("testuser", "secure_password123", None))
            .await
            .unwrap();

        let user = service
            .authenticate("testuser", "secure_password123")
            .await
            .unwrap();

        assert!(user.is_some());
        assert!(user.unwrap().last_login_at().is_some());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = create_service();

        service
            .register(make_request("testuser", "secure_password123", None))
            .await
            .unwrap();

        let user = service
            .authenticate("testuser", "wrong_password")
            .await
            .unwrap();

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_nonexistent_user() {
        let service = create_service();

        let user = service
            .authenticate("nonexistent", "password123")
            .await
            .unwrap();

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_count() {
        let service = create_service();

        assert_eq!(service.count().await.unwrap(), 0);

        service
            .register(make_request("user1", "password123", None))
            .await
            .unwrap();

        assert_eq!(service.count().await.unwrap(), 1);
    }
}
