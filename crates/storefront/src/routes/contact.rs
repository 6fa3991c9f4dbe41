//! Contact form route handler.

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use cortado_core::Email;

use crate::error::{AppError, Result};
use crate::extract::Json;
use crate::state::AppState;

/// Contact form submission.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

/// Forward a contact-form message to the shop inbox.
#[instrument(skip(state, body), fields(subject = body.subject.as_deref().unwrap_or("")))]
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<StatusCode> {
    if body.name.trim().is_empty() || body.message.trim().is_empty() {
        return Err(AppError::BadRequest("name and message are required".into()));
    }

    let reply_to = Email::parse(&body.email)
        .map_err(|_| AppError::BadRequest("invalid email address".into()))?;

    let email = state
        .email()
        .ok_or_else(|| AppError::MissingConfig("SMTP".into()))?;

    email
        .send_contact_message(
            body.name.trim(),
            &reply_to,
            body.subject.as_deref(),
            &body.message,
        )
        .await?;

    Ok(StatusCode::ACCEPTED)
}
