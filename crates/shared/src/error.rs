use thiserror::Error;

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Startup and CLI failures. Request failures have their own error type in
/// the gateway crate.
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("invalid configuration: {msg}")]
    InvalidConfiguration {
        msg: String,
        #[source]
        source: Option<anyhow::Error>,
    },
    #[error("io error")]
    IoError {
        #[from]
        #[source]
        source: std::io::Error,
    },
    #[error("serde json error")]
    SerdeSerializationError {
        #[from]
        #[source]
        source: serde_json::Error,
    },
    #[error("address parse error")]
    AddrParseError {
        #[from]
        #[source]
        source: std::net::AddrParseError,
    },
}

#[cfg(test)]
mod unit_test {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_invalid_configuration_names_the_problem() {
        let err = CommonError::InvalidConfiguration {
            msg: "region must not be empty".to_string(),
            source: None,
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: region must not be empty"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_addr_parse_error_keeps_source() {
        let parse_err = "not a host:80".parse::<std::net::SocketAddr>().unwrap_err();
        let err = CommonError::from(parse_err);

        assert!(matches!(err, CommonError::AddrParseError { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_converts() {
        let err: CommonError =
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken").into();
        assert_eq!(err.to_string(), "io error");
        assert_eq!(err.source().unwrap().to_string(), "port taken");
    }
}
