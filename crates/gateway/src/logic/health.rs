use tracing::info;

use crate::logic::response::HealthCheckResponse;

pub const SERVICE_RUNNING_MESSAGE: &str = "Service is running";

/// Liveness check. Never fails and never touches the backend.
pub fn health_check() -> HealthCheckResponse {
    info!("Health check called.");
    HealthCheckResponse {
        message: SERVICE_RUNNING_MESSAGE.to_string(),
    }
}
