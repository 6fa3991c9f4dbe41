//! Virtual barista chat route handler.
//!
//! This endpoint speaks the chat widget's wire format (camelCase), unlike
//! the rest of the API. The widget tracks issued codes itself and sends
//! them back as `activeCodes` so the same code is not surfaced twice.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cortado_core::{ChatRole, DiscountCode, ProductType, UserId};

use crate::barista::Message;
use crate::barista::discount::EXPIRY_DAYS;
use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::services;
use crate::state::AppState;

/// One prior conversation turn.
#[derive(Debug, Deserialize)]
pub struct HistoryTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Chat request from the widget.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub active_codes: Vec<DiscountCode>,
    #[serde(default)]
    pub chat_history: Vec<HistoryTurn>,
}

/// Chat response for the widget. Discount fields are present only when a
/// code was surfaced from the reply.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
}

/// Run one barista chat turn.
#[instrument(skip(state, body), fields(authenticated = body.user_id.is_some()))]
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if body.message.trim().is_empty() {
        return Err(AppError::BadRequest("message is required".into()));
    }

    let history: Vec<Message> = body
        .chat_history
        .into_iter()
        .map(|turn| Message {
            role: turn.role.as_str().to_string(),
            content: turn.content,
        })
        .collect();

    let outcome = services::barista::chat(
        state.pool(),
        state.completion(),
        state.menu_cache(),
        body.user_id,
        &body.message,
        history,
        &body.active_codes,
    )
    .await?;

    let response = match outcome.discount {
        Some(discount) => ChatResponse {
            reply: outcome.reply,
            discount_code: Some(discount.code),
            discount_percentage: Some(discount.percentage),
            expiry_days: Some(EXPIRY_DAYS),
            product_type: discount.product_type,
        },
        None => ChatResponse {
            reply: outcome.reply,
            discount_code: None,
            discount_percentage: None,
            expiry_days: None,
            product_type: None,
        },
    };

    Ok(Json(response))
}
