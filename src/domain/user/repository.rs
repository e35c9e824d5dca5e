//! User repository trait

use async_trait::async_trait;

use super::entity::{User, UserId};
use crate::domain::error::DomainError;

/// Storage abstraction for user accounts
///
/// Implementations must enforce username and email uniqueness at creation.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Fetch a user by identifier
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Fetch a user by username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Fetch a user by email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user. Fails with Conflict when the username or email
    /// is already taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Number of stored users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Stamp the user's last login time
    async fn record_login(&self, id: &UserId) -> Result<(), DomainError>;

    /// Whether a user with this username already exists
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }

    /// Whether a user with this email already exists
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }
}
