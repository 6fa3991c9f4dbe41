//! Loyalty rewards route handlers.

use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::instrument;

use cortado_core::UserId;

use crate::db::RewardsRepository;
use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::models::RewardStatus;
use crate::state::AppState;

/// Request body for redeeming points.
#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    pub points: i64,
}

/// Fetch the user's balance and tier. Users with no rewards row yet get a
/// zeroed Bronze status rather than a 404.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<RewardStatus>> {
    let reward = RewardsRepository::new(state.pool())
        .get_or_default(user_id)
        .await?;

    Ok(Json(RewardStatus::from(&reward)))
}

/// Spend points. Insufficient balance is a 400, not a partial deduction.
#[instrument(skip(state, body))]
pub async fn redeem(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(body): Json<RedeemRequest>,
) -> Result<Json<RewardStatus>> {
    if body.points <= 0 {
        return Err(AppError::BadRequest("points must be positive".into()));
    }

    let reward = RewardsRepository::new(state.pool())
        .redeem(user_id, body.points)
        .await?
        .ok_or_else(|| AppError::BadRequest("insufficient points".into()))?;

    Ok(Json(RewardStatus::from(&reward)))
}
