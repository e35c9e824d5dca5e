//! Application state for shared services

use std::sync::Arc;

use crate::domain::item::ItemRepository;
use crate::domain::user::UserRepository;
use crate::domain::{DomainError, Item, ItemId, User};
use crate::infrastructure::auth::TokenIssuer;
use crate::infrastructure::item::{CreateItemRequest, ItemService};
use crate::infrastructure::user::{PasswordHasher, RegisterUserRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub item_service: Arc<dyn ItemServiceTrait>,
    pub token_issuer: Arc<dyn TokenIssuer>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError>;
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError>;
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for item service operations
#[async_trait::async_trait]
pub trait ItemServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Item>, DomainError>;
    async fn create(&self, request: CreateItemRequest) -> Result<Item, DomainError>;
    async fn purchase(
        &self,
        id: &ItemId,
        quantity: i64,
    ) -> Result<crate::domain::PurchaseReceipt, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

// Implement the traits for the actual services

#[async_trait::async_trait]
impl<R: UserRepository + 'static, H: PasswordHasher + 'static> UserServiceTrait
    for UserService<R, H>
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        UserService::register(self, request).await
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        UserService::authenticate(self, username, password).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        UserService::get_by_username(self, username).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R: ItemRepository + 'static> ItemServiceTrait for ItemService<R> {
    async fn list(&self) -> Result<Vec<Item>, DomainError> {
        ItemService::list(self).await
    }

    async fn create(&self, request: CreateItemRequest) -> Result<Item, DomainError> {
        ItemService::create(self, request).await
    }

    async fn purchase(
        &self,
        id: &ItemId,
        quantity: i64,
    ) -> Result<crate::domain::PurchaseReceipt, DomainError> {
        ItemService::purchase(self, id, quantity).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        ItemService::count(self).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        item_service: Arc<dyn ItemServiceTrait>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_service,
            item_service,
            token_issuer,
        }
    }
}
