// Inbound prediction request and the payload forwarded to the backend
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::logic::error::GatewayError;

pub const DATA_KEY: &str = "data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionRequest {
    /// Model input, forwarded to the backend without inspection.
    pub data: Value,
}

impl PredictionRequest {
    /// Parses a raw request body.
    ///
    /// Only the presence of `data` is checked; `{"data": null}` is a valid
    /// request. Bodies that are not JSON are internal errors, JSON that is
    /// not an object carrying `data` is a validation error.
    pub fn from_slice(body: &[u8]) -> Result<Self, GatewayError> {
        let value: Value = serde_json::from_slice(body)?;

        match value {
            Value::Object(mut map) => match map.remove(DATA_KEY) {
                Some(data) => Ok(Self { data }),
                None => Err(GatewayError::Validation),
            },
            _ => Err(GatewayError::Validation),
        }
    }
}

/// Body sent to the inference backend: `{"instances": <data>}`.
#[derive(Debug, Serialize)]
pub struct InvocationPayload<'a> {
    pub instances: &'a Value,
}

impl<'a> From<&'a PredictionRequest> for InvocationPayload<'a> {
    fn from(request: &'a PredictionRequest) -> Self {
        Self {
            instances: &request.data,
        }
    }
}

impl InvocationPayload<'_> {
    pub fn to_vec(&self) -> Result<Vec<u8>, GatewayError> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[cfg(test)]
mod unit_test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_data_array() {
        let request = PredictionRequest::from_slice(br#"{"data":[1,2,3]}"#).unwrap();
        assert_eq!(request.data, json!([1, 2, 3]));
    }

    #[test]
    fn test_null_data_is_present() {
        let request = PredictionRequest::from_slice(br#"{"data":null}"#).unwrap();
        assert_eq!(request.data, Value::Null);
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let request =
            PredictionRequest::from_slice(br#"{"data":{"x":1},"model":"ignored"}"#).unwrap();
        assert_eq!(request.data, json!({"x": 1}));
    }

    #[test]
    fn test_missing_data_is_validation_error() {
        let err = PredictionRequest::from_slice(b"{}").unwrap_err();
        assert!(matches!(err, GatewayError::Validation));
    }

    #[test]
    fn test_non_object_body_is_validation_error() {
        for body in [&b"[1,2]"[..], b"\"data\"", b"42", b"null"] {
            let err = PredictionRequest::from_slice(body).unwrap_err();
            assert!(matches!(err, GatewayError::Validation), "body: {body:?}");
        }
    }

    #[test]
    fn test_malformed_json_is_internal_error() {
        let err = PredictionRequest::from_slice(b"data=1,2,3").unwrap_err();
        assert!(matches!(err, GatewayError::Internal { .. }));
    }

    #[test]
    fn test_payload_wraps_data_as_instances() {
        let request = PredictionRequest {
            data: json!([[0.5, 1.5], [2.5, 3.5]]),
        };
        let bytes = InvocationPayload::from(&request).to_vec().unwrap();
        let sent: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(sent, json!({"instances": [[0.5, 1.5], [2.5, 3.5]]}));
    }
}
