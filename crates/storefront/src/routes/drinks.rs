//! Custom drink route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cortado_core::{CustomDrinkId, Price, UserId};

use crate::db::{CustomDrinkRepository, drinks::NewAddon};
use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::models::CustomDrinkWithAddons;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DrinksQuery {
    pub user_id: UserId,
}

/// An addon in a create request.
#[derive(Debug, Deserialize)]
pub struct AddonRequest {
    pub name: String,
    pub price: Price,
}

/// Request body for saving a custom drink.
#[derive(Debug, Deserialize)]
pub struct CreateDrinkRequest {
    pub user_id: UserId,
    pub name: String,
    pub base: String,
    pub size: String,
    #[serde(default)]
    pub addons: Vec<AddonRequest>,
}

/// List the user's saved drinks with addons.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<DrinksQuery>,
) -> Result<Json<Vec<CustomDrinkWithAddons>>> {
    let drinks = CustomDrinkRepository::new(state.pool())
        .list_for_user(query.user_id)
        .await?;

    Ok(Json(drinks))
}

/// Save a new custom drink with its addons.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateDrinkRequest>,
) -> Result<(StatusCode, Json<CustomDrinkWithAddons>)> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("drink name is required".into()));
    }

    let addons: Vec<NewAddon> = body
        .addons
        .into_iter()
        .map(|a| NewAddon {
            name: a.name,
            price: a.price,
        })
        .collect();

    let drink = CustomDrinkRepository::new(state.pool())
        .create(body.user_id, &body.name, &body.base, &body.size, &addons)
        .await?;

    Ok((StatusCode::CREATED, Json(drink)))
}

/// Delete a saved drink. The `user_id` query guards against deleting
/// someone else's recipe.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<CustomDrinkId>,
    Query(query): Query<DrinksQuery>,
) -> Result<StatusCode> {
    let deleted = CustomDrinkRepository::new(state.pool())
        .delete(id, query.user_id)
        .await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("custom drink {id}")))
    }
}
