//! Product review route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cortado_core::{MenuItemId, UserId};

use crate::db::{RepositoryError, ReviewRepository};
use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::models::Review;
use crate::state::AppState;

/// Request body for leaving a review.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub user_id: UserId,
    pub rating: i16,
    pub comment: Option<String>,
}

/// List reviews for a menu item, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
) -> Result<Json<Vec<Review>>> {
    let reviews = ReviewRepository::new(state.pool()).list_for_item(id).await?;
    Ok(Json(reviews))
}

/// Leave a review on a menu item.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>)> {
    if !(1..=5).contains(&body.rating) {
        return Err(AppError::BadRequest("rating must be between 1 and 5".into()));
    }

    let review = ReviewRepository::new(state.pool())
        .create(id, body.user_id, body.rating, body.comment.as_deref())
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AppError::NotFound(format!("menu item {id}")),
            other => AppError::Database(other),
        })?;

    Ok((StatusCode::CREATED, Json(review)))
}
