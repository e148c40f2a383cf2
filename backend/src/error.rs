//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! Every error is reported to the caller with the same generic payload; the
//! detail only goes to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned to callers for any failure
pub const GENERIC_ERROR_MESSAGE: &str = "Bir hata oluştu";

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be parsed into the expected shape
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(error = %self, status = status.as_u16(), "Request failed");

        let body = Json(json!({
            "error": GENERIC_ERROR_MESSAGE,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_body_hides_detail() {
        let response = AppError::MalformedRequest("expected value at line 1".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Bir hata oluştu" }));
    }

    #[test]
    fn test_internal_error_status() {
        let error = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.to_string().contains("boom"));
    }
}
