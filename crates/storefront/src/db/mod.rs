//! Database operations for the storefront `PostgreSQL`.
//!
//! # Tables
//!
//! - `menu_items` - The drink/food menu
//! - `cart_items` - Per-user cart lines (cleared at checkout)
//! - `orders` / `order_items` - Order history with denormalized line items
//! - `profiles` - Customer display data keyed by auth-provider UUID
//! - `rewards` - Loyalty point balances
//! - `custom_drinks` / `drink_addons` - Saved drink recipes
//! - `product_reviews` - Menu item reviews
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p cortado-cli -- migrate
//! ```

pub mod cart;
pub mod drinks;
pub mod menu;
pub mod orders;
pub mod profiles;
pub mod reviews;
pub mod rewards;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cart::CartRepository;
pub use drinks::CustomDrinkRepository;
pub use menu::MenuRepository;
pub use orders::OrderRepository;
pub use profiles::ProfileRepository;
pub use reviews::ReviewRepository;
pub use rewards::RewardsRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., foreign key).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
