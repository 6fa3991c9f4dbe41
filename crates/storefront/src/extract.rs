//! Request extractors.
//!
//! Axum's stock `Json` extractor rejects malformed bodies with a
//! plain-text response, while this API's contract is a JSON `{ "error" }`
//! body for every failure. Handlers take this wrapper instead so missing
//! fields and bad JSON render through [`AppError`] like any other bad
//! request.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::AppError;

/// JSON extractor whose rejection is an [`AppError::BadRequest`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        message: String,
    }

    fn json_request(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_field_renders_error_body() {
        let rejection = Json::<Payload>::from_request(json_request("{}"), &())
            .await
            .expect_err("missing field must be rejected");

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("message"));
    }

    #[tokio::test]
    async fn test_malformed_json_renders_error_body() {
        let rejection = Json::<Payload>::from_request(json_request("{not json"), &())
            .await
            .expect_err("malformed body must be rejected");

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await.get("error").is_some());
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let Json(payload) =
            Json::<Payload>::from_request(json_request(r#"{"message": "hi"}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.message, "hi");
    }
}
