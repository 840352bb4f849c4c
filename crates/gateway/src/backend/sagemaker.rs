use aws_sdk_sagemakerruntime::{Client, error::DisplayErrorContext, primitives::Blob};
use tracing::{debug, error};

use super::{BackendError, InferenceBackendLike};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Invokes a SageMaker real-time endpoint.
#[derive(Debug, Clone)]
pub struct SageMakerBackend {
    client: Client,
    endpoint_name: String,
}

impl SageMakerBackend {
    pub fn new(client: Client, endpoint_name: impl Into<String>) -> Self {
        Self {
            client,
            endpoint_name: endpoint_name.into(),
        }
    }

    /// Builds the runtime client from the ambient AWS credential chain,
    /// pinned to `region`.
    pub async fn from_env(region: &str, endpoint_name: impl Into<String>) -> Self {
        let mut config = aws_config::load_from_env().await;
        config = config
            .to_builder()
            .region(aws_config::Region::new(region.to_string()))
            .build();
        let client = Client::new(&config);

        Self::new(client, endpoint_name)
    }
}

#[async_trait::async_trait]
impl InferenceBackendLike for SageMakerBackend {
    fn name(&self) -> &str {
        &self.endpoint_name
    }

    async fn invoke(&self, payload: Vec<u8>) -> Result<Vec<u8>, BackendError> {
        debug!(
            endpoint_name = %self.endpoint_name,
            payload_bytes = payload.len(),
            "Invoking SageMaker endpoint"
        );

        let output = self
            .client
            .invoke_endpoint()
            .endpoint_name(&self.endpoint_name)
            .content_type(JSON_CONTENT_TYPE)
            .accept(JSON_CONTENT_TYPE)
            .body(Blob::new(payload))
            .send()
            .await
            .map_err(|e| {
                error!(
                    endpoint_name = %self.endpoint_name,
                    "SageMaker invocation error: {}",
                    DisplayErrorContext(&e)
                );
                BackendError::Invocation {
                    source: Box::new(e),
                }
            })?;

        output
            .body()
            .map(|body| body.as_ref().to_vec())
            .ok_or(BackendError::EmptyBody)
    }
}

#[cfg(all(test, feature = "integration_test"))]
mod integration_test {
    use super::*;

    // Requires AWS credentials and a deployed endpoint accepting {"instances": [...]}.
    #[tokio::test]
    async fn test_invoke_live_endpoint() {
        shared::setup_test!();

        let region = std::env::var("AWS_REGION").unwrap_or("us-east-1".to_string());
        let endpoint_name = std::env::var("INTEGRATION_SAGEMAKER_ENDPOINT_NAME")
            .expect("INTEGRATION_SAGEMAKER_ENDPOINT_NAME must be set");

        let backend = SageMakerBackend::from_env(&region, endpoint_name).await;
        let body = backend
            .invoke(br#"{"instances":[[1.0,2.0,3.0]]}"#.to_vec())
            .await
            .expect("Invocation should succeed");

        let parsed: serde_json::Value =
            serde_json::from_slice(&body).expect("Endpoint should return JSON");
        assert!(!parsed.is_null());
    }

    #[tokio::test]
    async fn test_invoke_unknown_endpoint_fails() {
        shared::setup_test!();

        let region = std::env::var("AWS_REGION").unwrap_or("us-east-1".to_string());
        let backend =
            SageMakerBackend::from_env(&region, "inference-gateway-does-not-exist").await;

        let result = backend.invoke(br#"{"instances":[]}"#.to_vec()).await;
        assert!(matches!(result, Err(BackendError::Invocation { .. })));
    }
}
