//! Item entity and purchase receipt

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_item_id, ItemValidationError};

/// Item identifier - uuid shaped, alphanumeric + hyphens
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Create a new ItemId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, ItemValidationError> {
        let id = id.into();
        validate_item_id(&id)?;
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

impl TryFrom<String> for ItemId {
    type Error = ItemValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sweet in the shared stock ledger
///
/// Prices are integer cents end to end; no floating point ever touches
/// money. Stock is mutated only through the repository's atomic decrement.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    /// Unique identifier for the item
    id: ItemId,
    /// Display name, unique across the catalog
    name: String,
    /// Free-text category
    category: String,
    /// Unit price in cents, always positive
    price_cents: i64,
    /// Units currently on hand, never negative
    stock: i64,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Item {
    /// Create a new item
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        price_cents: i64,
        stock: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price_cents,
            stock,
            created_at: Utc::now(),
        }
    }

    /// Rebuild an item from stored fields
    pub fn restore(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        price_cents: i64,
        stock: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price_cents,
            stock,
            created_at,
        }
    }

    // Getters

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy of this item with a different stock level. Repositories use
    /// this when reading the live counter alongside the static metadata.
    pub fn with_stock(&self, stock: i64) -> Self {
        Self {
            stock,
            ..self.clone()
        }
    }
}

/// Result of a successful purchase. Transient, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseReceipt {
    pub item_id: ItemId,
    pub quantity: i64,
    pub new_stock: i64,
    pub total_price_cents: i64,
}
