//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`imagebin_core::Error`] so that route
//! handlers can return `Result<T, imagebin_core::Error>` directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError {
    inner: imagebin_core::Error,
}

impl AppError {
    pub fn new(inner: imagebin_core::Error) -> Self {
        Self { inner }
    }
}

impl From<imagebin_core::Error> for AppError {
    fn from(e: imagebin_core::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        }

        // The wire contract fixes the body to `{"error": <message>}`, with
        // a bare "Not found" for 404s. The richer Display format stays in
        // the logs.
        let message = match &self.inner {
            imagebin_core::Error::NotFound { .. } => "Not found".to_string(),
            imagebin_core::Error::Validation(msg) => msg.clone(),
            other => other.to_string(),
        };

        let body = json!({ "error": message });

        (status, axum::Json(body)).into_response()
    }
}
