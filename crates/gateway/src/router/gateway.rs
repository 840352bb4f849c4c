// Inference gateway routes
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    response::{IntoResponse, Response},
};
use http::StatusCode;
use shared::adapters::openapi::JsonResponse;
use tracing::{Instrument, info_span, trace};
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

use crate::backend::InferenceBackendLike;
use crate::logic::{
    ErrorResponse, GatewayError, HealthCheckResponse, PredictionRequest, PredictionResponse,
};

pub const SERVICE_ROUTE_KEY: &str = "gateway";

/// Request body ceiling, sized to SageMaker's real-time `InvokeEndpoint` payload limit.
pub const DEFAULT_MAX_BODY_SIZE: usize = 6 * 1024 * 1024;

pub fn create_router() -> OpenApiRouter<GatewayService> {
    OpenApiRouter::new()
        .routes(routes!(route_health_check))
        .routes(routes!(route_predict))
}

#[utoipa::path(
    get,
    path = "/",
    tags = [SERVICE_ROUTE_KEY],
    responses(
        (status = 200, description = "Service is running", body = HealthCheckResponse),
    ),
    summary = "Health Check",
    description = "Health check endpoint to verify the service is running.",
    operation_id = "health-check",
)]
async fn route_health_check() -> Json<HealthCheckResponse> {
    Json(crate::logic::health_check())
}

#[utoipa::path(
    post,
    path = "/predict",
    tags = [SERVICE_ROUTE_KEY],
    request_body(content = PredictionRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Prediction returned by the inference backend", body = PredictionResponse),
        (status = 400, description = "Missing 'data' in request payload, or payload over the size limit", body = ErrorResponse),
        (status = 500, description = "Inference backend failure or unexpected error", body = ErrorResponse),
    ),
    summary = "Make Prediction",
    description = "Handles prediction requests by forwarding them to the inference endpoint.",
    operation_id = "predict",
)]
async fn route_predict(
    State(ctx): State<GatewayService>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("predict", %request_id);

    async move {
        let res = match body {
            Ok(body) => {
                trace!(body_bytes = body.len(), "Handling prediction request");
                crate::logic::predict(ctx.backend(), ctx.backend_timeout(), &body).await
            }
            Err(rejection) => Err(body_rejection_to_error(rejection, ctx.max_body_size())),
        };
        trace!(success = res.is_ok(), "Handling prediction request completed");
        JsonResponse::from(res).into_response()
    }
    .instrument(span)
    .await
}

fn body_rejection_to_error(rejection: BytesRejection, limit: usize) -> GatewayError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge { limit }
    } else {
        GatewayError::Internal {
            source: anyhow::Error::from(rejection),
        }
    }
}

/// Router state. Cloned per request; the backend handle is shared.
#[derive(Clone)]
pub struct GatewayService {
    backend: Arc<dyn InferenceBackendLike>,
    backend_timeout: Duration,
    max_body_size: usize,
}

impl GatewayService {
    pub fn new(backend: Arc<dyn InferenceBackendLike>, backend_timeout: Duration) -> Self {
        Self {
            backend,
            backend_timeout,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    pub fn backend(&self) -> &dyn InferenceBackendLike {
        self.backend.as_ref()
    }

    pub fn backend_timeout(&self) -> Duration {
        self.backend_timeout
    }

    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }
}
