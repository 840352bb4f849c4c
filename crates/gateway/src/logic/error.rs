use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;

use crate::backend::BackendError;
use crate::logic::response::ErrorResponse;

/// Failure of a single gateway request.
///
/// The `Display` text is what callers see; sources are only ever logged.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing 'data' in request payload.")]
    Validation,
    #[error("Request payload exceeds {limit} bytes.")]
    PayloadTooLarge { limit: usize },
    #[error("Error invoking inference backend.")]
    Backend {
        #[source]
        source: BackendError,
    },
    #[error("An unexpected error occurred.")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation | GatewayError::PayloadTooLarge { .. } => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Backend { .. } | GatewayError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BackendError> for GatewayError {
    fn from(source: BackendError) -> Self {
        GatewayError::Backend { source }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Internal {
            source: anyhow::Error::from(e),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod unit_test {
    use super::*;

    async fn render(err: GatewayError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let (status, body) = render(GatewayError::Validation).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Missing 'data' in request payload."}"#);
    }

    #[tokio::test]
    async fn test_payload_too_large_maps_to_400() {
        let (status, body) = render(GatewayError::PayloadTooLarge { limit: 1024 }).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Request payload exceeds 1024 bytes."}"#);
    }

    #[tokio::test]
    async fn test_backend_maps_to_500_without_detail() {
        let err = GatewayError::from(BackendError::Invocation {
            source: "ThrottlingException: account 123456789012 over limit".into(),
        });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Error invoking inference backend."}"#);
    }

    #[tokio::test]
    async fn test_internal_maps_to_500_without_detail() {
        let err = GatewayError::Internal {
            source: anyhow::anyhow!("stack trace with secrets"),
        };
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"An unexpected error occurred."}"#);
    }
}
