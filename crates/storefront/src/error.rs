//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//! Failures render as a JSON `{ "error": "..." }` body, matching what the
//! chat widget and the rest of the UI expect.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::barista::CompletionError;
use crate::db::RepositoryError;
use crate::services::email::EmailError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Completion API operation failed.
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Email delivery failed.
    #[error("Email error: {0}")]
    Email(#[from] EmailError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Required configuration is missing for this operation.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database(_)
                | Self::Internal(_)
                | Self::Completion(_)
                | Self::Email(_)
                | Self::MissingConfig(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) | Self::Email(_) | Self::MissingConfig(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Completion(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients, except the
        // upstream API's own error text which the widget displays
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Completion(CompletionError::Api { message, .. }) => {
                format!("The barista is unavailable right now: {message}")
            }
            Self::Completion(_) => "The barista is unavailable right now".to_string(),
            Self::Email(_) => "Failed to send message".to_string(),
            Self::MissingConfig(_) => "Service not configured".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("menu item 123".to_string());
        assert_eq!(err.to_string(), "Not found: menu item 123");

        let err = AppError::BadRequest("quantity must be positive".to_string());
        assert_eq!(err.to_string(), "Bad request: quantity must be positive");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::MissingConfig("SMTP".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Completion(CompletionError::Parse(
                "bad json".to_string()
            ))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_upstream_api_error_text_reaches_the_client() {
        let err = AppError::Completion(CompletionError::Api {
            error_type: "overloaded_error".to_string(),
            message: "Overloaded".to_string(),
        });

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().contains("Overloaded"));
    }

    #[tokio::test]
    async fn test_internal_detail_stays_hidden() {
        let err = AppError::Internal("pool exhausted at 10.0.0.3".to_string());
        let response = err.into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal server error");
    }
}
