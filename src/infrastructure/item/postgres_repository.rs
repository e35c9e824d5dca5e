//! PostgreSQL stock ledger implementation
//!
//! The decrement is a single conditional UPDATE, so the availability check
//! and the subtraction are one atomic row operation regardless of how many
//! connections race on the same item.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::item::{Item, ItemId, ItemRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of ItemRepository
#[derive(Debug, Clone)]
pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the items table if it does not exist
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY,
                seq BIGSERIAL,
                name TEXT NOT NULL UNIQUE,
                category TEXT NOT NULL,
                price_cents BIGINT NOT NULL CHECK (price_cents > 0),
                stock BIGINT NOT NULL CHECK (stock >= 0),
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create items table: {}", e)))?;

        Ok(())
    }

    fn row_to_item(row: &PgRow) -> Result<Item, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::storage(format!("Failed to read item id: {}", e)))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| DomainError::storage(format!("Failed to read name: {}", e)))?;
        let category: String = row
            .try_get("category")
            .map_err(|e| DomainError::storage(format!("Failed to read category: {}", e)))?;
        let price_cents: i64 = row
            .try_get("price_cents")
            .map_err(|e| DomainError::storage(format!("Failed to read price: {}", e)))?;
        let stock: i64 = row
            .try_get("stock")
            .map_err(|e| DomainError::storage(format!("Failed to read stock: {}", e)))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| DomainError::storage(format!("Failed to read created_at: {}", e)))?;

        let item_id = ItemId::new(id)
            .map_err(|e| DomainError::storage(format!("Stored item id is invalid: {}", e)))?;

        Ok(Item::restore(
            item_id, name, category, price_cents, stock, created_at,
        ))
    }
}

/// Map serialization failures and deadlocks to the transient variant so
/// callers can retry; everything else is a hard Storage error.
fn map_storage_error(e: sqlx::Error, context: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if let Some(code) = db_err.code() {
            if matches!(code.as_ref(), "40001" | "40P01") {
                return DomainError::storage_conflict(format!("{}: {}", context, db_err));
            }
        }
    }

    DomainError::storage(format!("{}: {}", context, e))
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn get(&self, id: &ItemId) -> Result<Option<Item>, DomainError> {
        let row = sqlx::query("SELECT * FROM items WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_storage_error(e, "Failed to fetch item"))?;

        row.as_ref().map(Self::row_to_item).transpose()
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Item>, DomainError> {
        let row = sqlx::query("SELECT * FROM items WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_storage_error(e, "Failed to fetch item"))?;

        row.as_ref().map(Self::row_to_item).transpose()
    }

    async fn create(&self, item: Item) -> Result<Item, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO items (id, name, category, price_cents, stock, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item.id().as_str())
        .bind(item.name())
        .bind(item.category())
        .bind(item.price_cents())
        .bind(item.stock())
        .bind(item.created_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(item),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                DomainError::conflict("A sweet with this name already exists."),
            ),
            Err(e) => Err(map_storage_error(e, "Failed to create item")),
        }
    }

    async fn list(&self) -> Result<Vec<Item>, DomainError> {
        let rows = sqlx::query("SELECT * FROM items ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_storage_error(e, "Failed to list items"))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM items")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_storage_error(e, "Failed to count items"))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| DomainError::storage(format!("Failed to read count: {}", e)))?;

        Ok(count as usize)
    }

    async fn decrement_stock(&self, id: &ItemId, quantity: i64) -> Result<i64, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE items
            SET stock = stock - $2
            WHERE id = $1 AND stock >= $2
            RETURNING stock
            "#,
        )
        .bind(id.as_str())
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_storage_error(e, "Failed to decrement stock"))?;

        if let Some(row) = row {
            let stock: i64 = row
                .try_get("stock")
                .map_err(|e| DomainError::storage(format!("Failed to read stock: {}", e)))?;
            return Ok(stock);
        }

        // No row matched: either the item is unknown or the stock check
        // failed. A follow-up read tells them apart.
        match self.get(id).await? {
            Some(item) => Err(DomainError::insufficient_stock(format!(
                "Insufficient stock. Only {} available.",
                item.stock()
            ))),
            None => Err(DomainError::not_found("Sweet not found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_transient() {
        let err = map_storage_error(sqlx::Error::RowNotFound, "Failed to fetch item");
        assert!(!err.is_transient());
    }
}
