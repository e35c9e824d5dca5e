use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::items;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no auth)
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints (register and login are public)
        .nest("/auth", auth::create_auth_router())
        // Inventory endpoints (token gated)
        .nest("/items", items::create_items_router())
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
