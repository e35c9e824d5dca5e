//! Sweet Shop API
//!
//! An authenticated inventory and purchase backend: user registration and
//! login with JWT sessions, a role-gated sweets catalog, and a
//! concurrency-safe stock ledger with atomic decrement on purchase.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use rand::{distributions::Alphanumeric, Rng};
use tracing::{info, warn};

use crate::api::state::{AppState, ItemServiceTrait, UserServiceTrait};
use crate::domain::Role;
use crate::infrastructure::auth::{JwtConfig, JwtService, TokenIssuer};
use crate::infrastructure::item::{
    CreateItemRequest, InMemoryItemRepository, ItemService, PostgresItemRepository,
};
use crate::infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, RegisterUserRequest, UserService,
};

pub use config::AppConfig;

/// Create application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create application state from configuration: wires the storage
/// backend, services and token issuer, then provisions the initial
/// admin user and catalog.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::new());

    let (user_service, item_service): (Arc<dyn UserServiceTrait>, Arc<dyn ItemServiceTrait>) =
        match config.storage.backend.as_str() {
            "postgres" => {
                let url = std::env::var("DATABASE_URL")
                    .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set for postgres storage"))?;
                let pool = sqlx::PgPool::connect(&url).await?;

                let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
                user_repository.ensure_schema().await?;

                let item_repository = Arc::new(PostgresItemRepository::new(pool));
                item_repository.ensure_schema().await?;

                info!("Using postgres storage backend");

                (
                    Arc::new(UserService::new(user_repository, hasher)),
                    Arc::new(ItemService::new(item_repository)),
                )
            }
            _ => {
                info!("Using in-memory storage backend");

                (
                    Arc::new(UserService::new(
                        Arc::new(InMemoryUserRepository::new()),
                        hasher,
                    )),
                    Arc::new(ItemService::new(Arc::new(InMemoryItemRepository::new()))),
                )
            }
        };

    let token_issuer = create_token_issuer(config);

    create_initial_admin_user(user_service.as_ref()).await?;
    seed_catalog(item_service.as_ref()).await?;

    Ok(AppState::new(user_service, item_service, token_issuer))
}

/// Build the token issuer. The signing secret comes from configuration,
/// then the JWT_SECRET environment variable, then a random value.
fn create_token_issuer(config: &AppConfig) -> Arc<dyn TokenIssuer> {
    let secret = match &config.auth.jwt_secret {
        Some(secret) => secret.clone(),
        None => match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                warn!(
                    "No JWT secret configured; generated a random one. \
                     Tokens will not survive a restart."
                );
                generate_random_secret()
            }
        },
    };

    Arc::new(JwtService::new(JwtConfig::new(
        secret,
        config.auth.token_ttl_minutes,
    )))
}

/// Create the initial admin user when the user store is empty.
async fn create_initial_admin_user(user_service: &dyn UserServiceTrait) -> anyhow::Result<()> {
    if user_service.count().await? > 0 {
        return Ok(());
    }

    let (password, generated) = match std::env::var("ADMIN_DEFAULT_PASSWORD") {
        Ok(password) => (password, false),
        Err(_) => (generate_random_password(), true),
    };

    let user = user_service
        .register(RegisterUserRequest {
            username: "admin".to_string(),
            password: password.clone(),
            email: Some("admin@sweetshop.com".to_string()),
            role: Role::Admin,
        })
        .await?;

    info!("=========================================");
    info!("Created initial admin user: {}", user.username());
    if generated {
        info!("Generated admin password: {}", password);
    }
    info!("Please change this password after first login.");
    info!("=========================================");

    Ok(())
}

/// Seed the sweets catalog when the item store is empty.
async fn seed_catalog(item_service: &dyn ItemServiceTrait) -> anyhow::Result<()> {
    if item_service.count().await? > 0 {
        return Ok(());
    }

    let catalog: [(&str, &str, i64, i64); 10] = [
        ("Gummy Worms", "Gummy", 450, 100),
        ("Chocolate Truffles", "Chocolate", 1200, 50),
        ("Lollipop Rainbow", "Hard Candy", 225, 150),
        ("Peppermint Stick", "Mint", 300, 75),
        ("Jelly Beans Mixed", "Gummy", 550, 90),
        ("Caramel Chews", "Chewy", 700, 60),
        ("Marshmallow Fluff", "Soft", 400, 120),
        ("Sour Power Belts", "Sour", 675, 80),
        ("Fudge Brownie Bites", "Chocolate", 950, 40),
        ("Bubblegum Blast", "Gum", 150, 200),
    ];

    for (name, category, price_cents, stock) in catalog {
        item_service
            .create(CreateItemRequest {
                name: name.to_string(),
                category: category.to_string(),
                price_cents,
                stock,
            })
            .await?;
    }

    info!("Seeded catalog with {} sweets", catalog.len());

    Ok(())
}

fn generate_random_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

fn generate_random_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}
