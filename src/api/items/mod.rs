//! Inventory API endpoints
//!
//! Browsing and purchasing require any authenticated user; adding items
//! requires the admin role.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::{RequireAdmin, RequireUser};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::item::{Item, ItemId};
use crate::infrastructure::item::CreateItemRequest;

/// Create the items router
pub fn create_items_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}/purchase", post(purchase_item))
}

/// Request to add an item to the catalog
#[derive(Debug, Deserialize)]
pub struct CreateItemApiRequest {
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// Request to purchase units of an item
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub quantity: i64,
}

/// Item response
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    pub stock: i64,
    pub created_at: String,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id().as_str().to_string(),
            name: item.name().to_string(),
            category: item.category().to_string(),
            price_cents: item.price_cents(),
            stock: item.stock(),
            created_at: item.created_at().to_rfc3339(),
        }
    }
}

/// List response
#[derive(Debug, Serialize)]
pub struct ListItemsResponse {
    pub items: Vec<ItemResponse>,
    pub total: usize,
}

/// Purchase response
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub message: String,
    pub item_id: String,
    pub quantity: i64,
    pub new_stock: i64,
    pub total_price_cents: i64,
}

/// List all items in the catalog
///
/// GET /items
pub async fn list_items(
    State(state): State<AppState>,
    _user: RequireUser,
) -> Result<Json<ListItemsResponse>, ApiError> {
    let items = state.item_service.list().await?;

    let responses: Vec<ItemResponse> = items.iter().map(ItemResponse::from).collect();
    let total = responses.len();

    Ok(Json(ListItemsResponse {
        items: responses,
        total,
    }))
}

/// Add an item to the catalog (admin only)
///
/// POST /items
pub async fn create_item(
    State(state): State<AppState>,
    RequireAdmin(identity): RequireAdmin,
    Json(request): Json<CreateItemApiRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    debug!(admin = %identity.username, name = %request.name, "creating item");

    let item = state
        .item_service
        .create(CreateItemRequest {
            name: request.name,
            category: request.category,
            price_cents: request.price_cents,
            stock: request.stock,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(&item))))
}

/// Purchase units of an item
///
/// POST /items/{id}/purchase
pub async fn purchase_item(
    State(state): State<AppState>,
    RequireUser(identity): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<PurchaseRequest>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    let item_id = ItemId::new(id)
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("id"))?;

    debug!(username = %identity.username, item_id = %item_id, quantity = request.quantity, "purchase requested");

    let receipt = state
        .item_service
        .purchase(&item_id, request.quantity)
        .await?;

    Ok(Json(PurchaseResponse {
        message: format!("Purchased {} unit(s)", receipt.quantity),
        item_id: receipt.item_id.as_str().to_string(),
        quantity: receipt.quantity,
        new_stock: receipt.new_stock,
        total_price_cents: receipt.total_price_cents,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_item_request_deserialization() {
        let request: CreateItemApiRequest = serde_json::from_str(
            r#"{"name": "Gummy Worms", "category": "Gummy", "price_cents": 450, "stock": 100}"#,
        )
        .unwrap();

        assert_eq!(request.name, "Gummy Worms");
        assert_eq!(request.price_cents, 450);
        assert_eq!(request.stock, 100);
    }

    #[test]
    fn test_purchase_request_deserialization() {
        let request: PurchaseRequest = serde_json::from_str(r#"{"quantity": 30}"#).unwrap();
        assert_eq!(request.quantity, 30);
    }

    #[test]
    fn test_item_response_from_item() {
        let item = Item::new(ItemId::generate(), "Gummy Worms", "Gummy", 450, 100);
        let response = ItemResponse::from(&item);

        assert_eq!(response.name, "Gummy Worms");
        assert_eq!(response.price_cents, 450);
        assert_eq!(response.stock, 100);
        assert_eq!(response.id, item.id().as_str());
    }

    #[test]
    fn test_purchase_response_serialization() {
        let response = PurchaseResponse {
            message: "Purchased 30 unit(s)".to_string(),
            item_id: "item-1".to_string(),
            quantity: 30,
            new_stock: 70,
            total_price_cents: 13_500,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"new_stock\":70"));
        assert!(json.contains("\"total_price_cents\":13500"));
    }
}
