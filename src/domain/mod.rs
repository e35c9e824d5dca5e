//! Domain layer: entities, validation rules and repository traits

pub mod error;
pub mod item;
pub mod user;

pub use error::DomainError;
pub use item::{Item, ItemId, ItemRepository, PurchaseReceipt};
pub use user::{Role, User, UserId, UserRepository};
