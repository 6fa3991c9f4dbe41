//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (pings the database)
//!
//! # Menu
//! GET  /api/menu                      - Available menu items (cached)
//! GET  /api/menu/{id}                 - Single menu item
//! GET  /api/menu/{id}/reviews         - Reviews for an item
//! POST /api/menu/{id}/reviews         - Leave a review
//!
//! # Cart & checkout
//! GET    /api/cart?user_id=           - Cart lines with computed subtotal
//! POST   /api/cart                    - Add a line
//! PATCH  /api/cart/{id}               - Update quantity (0 deletes)
//! DELETE /api/cart/{id}               - Remove a line
//! POST   /api/checkout                - Snapshot cart into an order, award points
//!
//! # Orders
//! GET  /api/orders?user_id=           - Order history, newest first
//!
//! # Rewards
//! GET  /api/rewards/{user_id}         - Balance, tier, points to next tier
//! POST /api/rewards/{user_id}/redeem  - Spend points
//!
//! # Custom drinks
//! GET    /api/drinks?user_id=         - Saved recipes with addons
//! POST   /api/drinks                  - Save a recipe
//! DELETE /api/drinks/{id}?user_id=    - Delete a recipe
//!
//! # Profiles
//! GET  /api/profile/{user_id}         - Profile (404 when absent)
//! PUT  /api/profile/{user_id}         - Upsert profile
//!
//! # Contact
//! POST /api/contact                   - Forward a message to the shop inbox
//!
//! # Virtual barista
//! POST /api/barista/chat              - Chat turn with discount surfacing
//! ```

pub mod barista;
pub mod cart;
pub mod contact;
pub mod drinks;
pub mod menu;
pub mod orders;
pub mod profile;
pub mod reviews;
pub mod rewards;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/menu", get(menu::index))
        .route("/api/menu/{id}", get(menu::show))
        .route(
            "/api/menu/{id}/reviews",
            get(reviews::index).post(reviews::create),
        )
        .route("/api/cart", get(cart::show).post(cart::add))
        .route("/api/cart/{id}", patch(cart::update).delete(cart::remove))
        .route("/api/checkout", post(cart::checkout))
        .route("/api/orders", get(orders::index))
        .route("/api/rewards/{user_id}", get(rewards::show))
        .route("/api/rewards/{user_id}/redeem", post(rewards::redeem))
        .route("/api/drinks", get(drinks::index).post(drinks::create))
        .route("/api/drinks/{id}", delete(drinks::remove))
        .route(
            "/api/profile/{user_id}",
            get(profile::show).put(profile::upsert),
        )
        .route("/api/contact", post(contact::submit))
        .route("/api/barista/chat", post(barista::chat))
}
