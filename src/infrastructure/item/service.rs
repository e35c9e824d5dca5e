//! Item service: catalog management and purchases

use std::sync::Arc;

use tracing::debug;

use crate::domain::item::{
    validation::{
        validate_category, validate_item_name, validate_price, validate_quantity, validate_stock,
    },
    Item, ItemId, ItemRepository, PurchaseReceipt,
};
use crate::domain::DomainError;

/// How many times a purchase is retried when storage reports transient
/// contention. InsufficientStock and NotFound are never retried.
const MAX_DECREMENT_ATTEMPTS: u32 = 3;

/// Request for adding an item to the catalog
#[derive(Debug, Clone)]
pub struct CreateItemRequest {
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// Item service for catalog management and purchases
#[derive(Debug)]
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new item service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// All items in insertion order
    pub async fn list(&self) -> Result<Vec<Item>, DomainError> {
        self.repository.list().await
    }

    /// Get an item by identifier
    pub async fn get(&self, id: &ItemId) -> Result<Option<Item>, DomainError> {
        self.repository.get(id).await
    }

    /// Add a new item to the catalog
    pub async fn create(&self, request: CreateItemRequest) -> Result<Item, DomainError> {
        validate_item_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_category(&request.category).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_price(request.price_cents).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_stock(request.stock).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.get_by_name(&request.name).await?.is_some() {
            return Err(DomainError::conflict(
                "A sweet with this name already exists.",
            ));
        }

        let item = Item::new(
            ItemId::generate(),
            &request.name,
            &request.category,
            request.price_cents,
            request.stock,
        );

        self.repository.create(item).await
    }

    /// Purchase `quantity` units of an item
    ///
    /// The decrement is all-or-nothing: on any error the ledger is
    /// untouched. The total is computed from the unit price read before
    /// the decrement, with checked arithmetic.
    pub async fn purchase(
        &self,
        id: &ItemId,
        quantity: i64,
    ) -> Result<PurchaseReceipt, DomainError> {
        validate_quantity(quantity).map_err(|e| DomainError::validation(e.to_string()))?;

        let item = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Sweet not found"))?;

        let total_price_cents = item.price_cents().checked_mul(quantity).ok_or_else(|| {
            DomainError::validation("Purchase total exceeds the representable amount")
        })?;

        let new_stock = self.decrement_with_retry(id, quantity).await?;

        debug!(
            item_id = %id,
            quantity,
            new_stock,
            total_price_cents,
            "purchase completed"
        );

        Ok(PurchaseReceipt {
            item_id: id.clone(),
            quantity,
            new_stock,
            total_price_cents,
        })
    }

    async fn decrement_with_retry(
        &self,
        id: &ItemId,
        quantity: i64,
    ) -> Result<i64, DomainError> {
        let mut attempt = 1;
        loop {
            match self.repository.decrement_stock(id, quantity).await {
                Err(e) if e.is_transient() && attempt < MAX_DECREMENT_ATTEMPTS => {
                    debug!(item_id = %id, attempt, "transient storage conflict, retrying");
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Count catalog items
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
