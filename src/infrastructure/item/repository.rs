//! In-memory stock ledger implementation
//!
//! Items live behind a single RwLock, but the stock counter of each item is
//! an AtomicI64 inside an Arc'd record. Purchases only take the read lock,
//! so purchases of distinct items never block each other; the availability
//! check and the subtraction happen in one compare_exchange step, so
//! concurrent purchases of the same item can never drive stock negative.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::item::{Item, ItemId, ItemRepository};
use crate::domain::DomainError;

#[derive(Debug)]
struct ItemRecord {
    /// Static metadata; the stock field inside is the value at creation
    /// time and is never read back directly.
    item: Item,
    /// Live stock counter
    stock: AtomicI64,
}

impl ItemRecord {
    fn new(item: Item) -> Self {
        let stock = AtomicI64::new(item.stock());
        Self { item, stock }
    }

    fn snapshot(&self) -> Item {
        self.item.with_stock(self.stock.load(Ordering::Acquire))
    }
}

#[derive(Debug, Default)]
struct Ledger {
    records: HashMap<String, Arc<ItemRecord>>,
    /// Index for name -> item ID lookup
    name_index: HashMap<String, String>,
    /// Item IDs in insertion order
    insertion_order: Vec<String>,
}

/// In-memory implementation of ItemRepository
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryItemRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn get(&self, id: &ItemId) -> Result<Option<Item>, DomainError> {
        let ledger = self.ledger.read().await;
        Ok(ledger.records.get(id.as_str()).map(|r| r.snapshot()))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Item>, DomainError> {
        let ledger = self.ledger.read().await;

        if let Some(id) = ledger.name_index.get(name) {
            return Ok(ledger.records.get(id).map(|r| r.snapshot()));
        }

        Ok(None)
    }

    async fn create(&self, item: Item) -> Result<Item, DomainError> {
        let mut ledger = self.ledger.write().await;

        let id = item.id().as_str().to_string();
        let name = item.name().to_string();

        if ledger.records.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "Item with ID '{}' already exists",
                id
            )));
        }

        if ledger.name_index.contains_key(&name) {
            return Err(DomainError::conflict(
                "A sweet with this name already exists.",
            ));
        }

        ledger.name_index.insert(name, id.clone());
        ledger.insertion_order.push(id.clone());
        ledger
            .records
            .insert(id, Arc::new(ItemRecord::new(item.clone())));

        Ok(item)
    }

    async fn list(&self) -> Result<Vec<Item>, DomainError> {
        let ledger = self.ledger.read().await;

        let items = ledger
            .insertion_order
            .iter()
            .filter_map(|id| ledger.records.get(id))
            .map(|r| r.snapshot())
            .collect();

        Ok(items)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let ledger = self.ledger.read().await;
        Ok(ledger.records.len())
    }

    async fn decrement_stock(&self, id: &ItemId, quantity: i64) -> Result<i64, DomainError> {
        // Read lock only: the decrement itself is lock-free, so purchases
        // of other items proceed in parallel.
        let record = {
            let ledger = self.ledger.read().await;
            ledger
                .records
                .get(id.as_str())
                .cloned()
                .ok_or_else(|| DomainError::not_found("Sweet not found"))?
        };

        let mut current = record.stock.load(Ordering::Acquire);
        loop {
            if current < quantity {
                return Err(DomainError::insufficient_stock(format!(
                    "Insufficient stock. Only {} available.",
                    current
                )));
            }

            match record.stock.compare_exchange(
                current,
                current - quantity,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(current - quantity),
                // Lost the race; re-check against the fresh value.
                Err(observed) => current = observed,
            }
        }
    }
}
