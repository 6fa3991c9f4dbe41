//! Order history route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use cortado_core::UserId;

use crate::db::OrderRepository;
use crate::error::Result;
use crate::models::OrderWithItems;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub user_id: UserId,
}

/// Fetch the user's order history, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<OrderWithItems>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(query.user_id)
        .await?;

    Ok(Json(orders))
}
