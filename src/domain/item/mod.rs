//! Item domain: entity, validation and repository trait

pub mod entity;
pub mod repository;
pub mod validation;

pub use entity::{Item, ItemId, PurchaseReceipt};
pub use repository::ItemRepository;
pub use validation::ItemValidationError;
