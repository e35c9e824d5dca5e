//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
    /// Index for username -> user ID lookup
    username_index: Arc<RwLock<HashMap<String, String>>>,
    /// Index for email -> user ID lookup
    email_index: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id.as_str()).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let username_index = self.username_index.read().await;

        if let Some(user_id) = username_index.get(username) {
            let users = self.users.read().await;
            return Ok(users.get(user_id).cloned());
        }

        Ok(None)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email_index = self.email_index.read().await;

        if let Some(user_id) = email_index.get(email) {
            let users = self.users.read().await;
            return Ok(users.get(user_id).cloned());
        }

        Ok(None)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut username_index = self.username_index.write().await;
        let mut email_index = self.email_index.write().await;

        let id = user.id().as_str().to_string();
        let username = user.username().to_string();

        if users.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                id
            )));
        }

        if username_index.contains_key(&username) {
            return Err(DomainError::conflict("Username already registered"));
        }

        if let Some(email) = user.email() {
            if email_index.contains_key(email) {
                return Err(DomainError::conflict("Email already registered"));
            }
            email_index.insert(email.to_string(), id.clone());
        }

        username_index.insert(username, id.clone());
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let users = self.users.read().await;
        Ok(users.len())
    }

    async fn record_login(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        if let Some(user) = users.get_mut(id.as_str()) {
            user.record_login();
            Ok(())
        } else {
            Err(DomainError::not_found(format!("User '{}' not found", id)))
        }
    }
}
