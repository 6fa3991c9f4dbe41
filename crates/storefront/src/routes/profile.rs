//! Profile route handlers.

use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::instrument;

use cortado_core::UserId;

use crate::db::ProfileRepository;
use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::models::Profile;
use crate::state::AppState;

/// Request body for upserting a profile.
#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub display_name: String,
    pub favorite_drink: Option<String>,
}

/// Fetch a profile.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Profile>> {
    let profile = ProfileRepository::new(state.pool())
        .get(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("profile {user_id}")))?;

    Ok(Json(profile))
}

/// Create or update a profile.
#[instrument(skip(state, body))]
pub async fn upsert(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(body): Json<UpsertProfileRequest>,
) -> Result<Json<Profile>> {
    if body.display_name.trim().is_empty() {
        return Err(AppError::BadRequest("display name is required".into()));
    }

    let profile = ProfileRepository::new(state.pool())
        .upsert(user_id, &body.display_name, body.favorite_drink.as_deref())
        .await?;

    Ok(Json(profile))
}
