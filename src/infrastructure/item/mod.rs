//! Item infrastructure: storage backends and the item service

pub mod postgres_repository;
pub mod repository;
pub mod service;

pub use postgres_repository::PostgresItemRepository;
pub use repository::InMemoryItemRepository;
pub use service::{CreateItemRequest, ItemService};
