//! Cart and checkout route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cortado_core::{CartItemId, MenuItemId, UserId};

use crate::db::{CartRepository, OrderRepository};
use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::models::{CartLine, CartView, OrderWithItems};
use crate::state::AppState;

/// Query parameters identifying whose cart to operate on.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub user_id: UserId,
}

/// Request body for adding a cart line.
#[derive(Debug, Deserialize)]
pub struct AddLineRequest {
    pub user_id: UserId,
    pub menu_item_id: MenuItemId,
    pub quantity: i32,
    pub customizations: Option<serde_json::Value>,
}

/// Request body for updating a line's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateLineRequest {
    pub quantity: i32,
}

/// Request body for checkout.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub user_id: UserId,
}

/// Fetch the user's cart with computed subtotal.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> Result<Json<CartView>> {
    let lines = CartRepository::new(state.pool())
        .lines_for_user(query.user_id)
        .await?;

    Ok(Json(CartView::from_lines(lines)))
}

/// Add a line to the cart.
#[instrument(skip(state, body))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddLineRequest>,
) -> Result<(StatusCode, Json<CartLine>)> {
    if body.quantity <= 0 {
        return Err(AppError::BadRequest("quantity must be positive".into()));
    }

    let line = CartRepository::new(state.pool())
        .add_line(
            body.user_id,
            body.menu_item_id,
            body.quantity,
            body.customizations,
        )
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
            other => AppError::Database(other),
        })?;

    Ok((StatusCode::CREATED, Json(line)))
}

/// Update a line's quantity. Quantity zero deletes the line and returns 204.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CartItemId>,
    Json(body): Json<UpdateLineRequest>,
) -> Result<axum::response::Response> {
    use axum::response::IntoResponse;

    if body.quantity < 0 {
        return Err(AppError::BadRequest("quantity must not be negative".into()));
    }

    let line = CartRepository::new(state.pool())
        .update_quantity(id, body.quantity)
        .await?;

    match line {
        Some(line) => Ok(Json(line).into_response()),
        None if body.quantity == 0 => Ok(StatusCode::NO_CONTENT.into_response()),
        None => Err(AppError::NotFound(format!("cart line {id}"))),
    }
}

/// Remove a line from the cart.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<CartItemId>) -> Result<StatusCode> {
    CartRepository::new(state.pool()).remove_line(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Check out: snapshot the cart into an order, clear it, award points.
#[instrument(skip(state, body))]
pub async fn checkout(
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderWithItems>)> {
    let order = OrderRepository::new(state.pool())
        .checkout(body.user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("cart is empty".into()))?;

    Ok((StatusCode::CREATED, Json(order)))
}
