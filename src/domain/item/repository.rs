//! Item repository trait

use async_trait::async_trait;

use super::entity::{Item, ItemId};
use crate::domain::error::DomainError;

/// Storage abstraction for the stock ledger
///
/// `decrement_stock` is the one mutation purchases are allowed to use. It
/// must check availability and subtract in a single atomic step so that
/// concurrent purchases can never drive stock negative.
#[async_trait]
pub trait ItemRepository: Send + Sync + std::fmt::Debug {
    /// Fetch an item by identifier
    async fn get(&self, id: &ItemId) -> Result<Option<Item>, DomainError>;

    /// Fetch an item by its unique name
    async fn get_by_name(&self, name: &str) -> Result<Option<Item>, DomainError>;

    /// Persist a new item. Fails with Conflict when the name is taken.
    async fn create(&self, item: Item) -> Result<Item, DomainError>;

    /// All items in insertion order
    async fn list(&self) -> Result<Vec<Item>, DomainError>;

    /// Number of stored items
    async fn count(&self) -> Result<usize, DomainError>;

    /// Atomically subtract `quantity` from the item's stock if and only if
    /// enough is on hand. Returns the stock level after the decrement.
    ///
    /// Errors: `NotFound` for an unknown id, `InsufficientStock` when the
    /// ledger holds fewer than `quantity` units. A failed decrement leaves
    /// the stock untouched.
    async fn decrement_stock(&self, id: &ItemId, quantity: i64) -> Result<i64, DomainError>;
}
