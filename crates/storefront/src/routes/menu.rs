//! Menu route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use cortado_core::MenuItemId;

use crate::error::{AppError, Result};
use crate::db::MenuRepository;
use crate::models::MenuItem;
use crate::state::AppState;

/// List available menu items, served from the cache.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>> {
    let menu = state.menu_cache().get(state.pool()).await?;
    Ok(Json(menu.as_ref().clone()))
}

/// Fetch a single menu item.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
) -> Result<Json<MenuItem>> {
    let item = MenuRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))?;

    Ok(Json(item))
}
