mod sagemaker;

use std::time::Duration;

use shared::error::DynError;
use thiserror::Error;

pub use sagemaker::{JSON_CONTENT_TYPE, SageMakerBackend};

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("inference backend invocation failed")]
    Invocation {
        #[source]
        source: DynError,
    },
    #[error("inference backend returned no body")]
    EmptyBody,
    #[error("inference backend did not respond within {0:?}")]
    Timeout(Duration),
}

/// A remote service that turns a JSON invocation payload into a JSON
/// prediction. Implementations are shared across concurrent requests.
#[async_trait::async_trait]
pub trait InferenceBackendLike: Send + Sync {
    /// Identifies the backend in log lines.
    fn name(&self) -> &str;

    async fn invoke(&self, payload: Vec<u8>) -> Result<Vec<u8>, BackendError>;
}
