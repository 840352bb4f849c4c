use std::time::Duration;

use serde_json::Value;
use tracing::{error, info};

use crate::backend::{BackendError, InferenceBackendLike};
use crate::logic::error::GatewayError;
use crate::logic::request::{InvocationPayload, PredictionRequest};
use crate::logic::response::PredictionResponse;

/// Validates `body`, forwards `{"instances": data}` to `backend` and wraps
/// the parsed reply as `{"prediction": ...}`.
///
/// The backend is not called unless the body carries `data`.
pub async fn predict(
    backend: &dyn InferenceBackendLike,
    backend_timeout: Duration,
    body: &[u8],
) -> Result<PredictionResponse, GatewayError> {
    let request = PredictionRequest::from_slice(body).inspect_err(|e| match e {
        GatewayError::Validation => error!("Missing 'data' in request payload."),
        _ => error!(error = ?e, "Unexpected error: could not parse request body"),
    })?;

    info!(data = %request.data, "Received data for prediction");

    let payload = InvocationPayload::from(&request).to_vec()?;

    let raw = invoke_with_timeout(backend, payload, backend_timeout)
        .await
        .inspect_err(|e| {
            error!(
                backend = backend.name(),
                error = ?e,
                "Inference backend invocation error"
            )
        })?;

    let prediction: Value = serde_json::from_slice(&raw).inspect_err(|e| {
        error!(
            backend = backend.name(),
            error = ?e,
            "Unexpected error: backend returned a body that is not JSON"
        )
    })?;

    info!(prediction = %prediction, "Prediction result");

    Ok(PredictionResponse { prediction })
}

async fn invoke_with_timeout(
    backend: &dyn InferenceBackendLike,
    payload: Vec<u8>,
    backend_timeout: Duration,
) -> Result<Vec<u8>, BackendError> {
    match tokio::time::timeout(backend_timeout, backend.invoke(payload)).await {
        Ok(result) => result,
        Err(_) => Err(BackendError::Timeout(backend_timeout)),
    }
}
