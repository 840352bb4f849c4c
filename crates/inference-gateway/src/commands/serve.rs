use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use gateway::backend::SageMakerBackend;
use gateway::router::{DEFAULT_MAX_BODY_SIZE, GatewayService};
use shared::error::CommonError;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::server::{StartAxumServerParams, start_axum_server};

#[derive(Debug, Clone, Parser)]
pub struct ServeParams {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, env = "PORT", default_value = "8000")]
    pub port: u16,
    /// AWS region of the inference endpoint
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,
    /// SageMaker endpoint to forward predictions to
    #[arg(long, env = "SAGEMAKER_ENDPOINT_NAME", default_value = "mySageMakerEndpoint")]
    pub endpoint_name: String,
    /// Upper bound on a single backend invocation, e.g. "60s" or "1m 30s"
    #[arg(long, env = "BACKEND_TIMEOUT", default_value = "60s", value_parser = humantime::parse_duration)]
    pub backend_timeout: Duration,
    /// Largest accepted request body, in bytes
    #[arg(long, env = "MAX_BODY_SIZE", default_value_t = DEFAULT_MAX_BODY_SIZE)]
    pub max_body_size: usize,
    /// How long in-flight requests may run after a shutdown signal
    #[arg(long, env = "SHUTDOWN_GRACE_PERIOD", default_value = "30s", value_parser = humantime::parse_duration)]
    pub shutdown_grace_period: Duration,
}

impl ServeParams {
    pub fn validate(&self) -> Result<(), CommonError> {
        if self.endpoint_name.trim().is_empty() {
            return Err(CommonError::InvalidConfiguration {
                msg: "endpoint name must not be empty".to_string(),
                source: None,
            });
        }
        if self.region.trim().is_empty() {
            return Err(CommonError::InvalidConfiguration {
                msg: "region must not be empty".to_string(),
                source: None,
            });
        }
        if self.max_body_size == 0 {
            return Err(CommonError::InvalidConfiguration {
                msg: "max body size must be greater than zero".to_string(),
                source: None,
            });
        }
        if self.backend_timeout.is_zero() {
            return Err(CommonError::InvalidConfiguration {
                msg: "backend timeout must be greater than zero".to_string(),
                source: None,
            });
        }
        Ok(())
    }
}

pub async fn cmd_serve(params: ServeParams) -> Result<(), CommonError> {
    params.validate()?;

    info!(
        region = %params.region,
        endpoint_name = %params.endpoint_name,
        backend_timeout = %humantime::format_duration(params.backend_timeout),
        max_body_size = params.max_body_size,
        "Configuring inference backend"
    );
    let backend = SageMakerBackend::from_env(&params.region, params.endpoint_name.clone()).await;
    let service = GatewayService::new(Arc::new(backend), params.backend_timeout)
        .with_max_body_size(params.max_body_size);

    let (system_shutdown_signal_tx, system_shutdown_signal_rx) = broadcast::channel(1);

    let (server_fut, _handle, addr) = start_axum_server(StartAxumServerParams {
        host: params.host,
        port: params.port,
        shutdown_grace_period: params.shutdown_grace_period,
        system_shutdown_signal_rx,
        service,
    })
    .await?;

    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        info!("Shutdown signal received");
        let _ = system_shutdown_signal_tx.send(());
    });

    info!("Inference gateway listening on http://{addr}");
    server_fut.await?;

    Ok(())
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod unit_test {
    use super::*;

    fn params() -> ServeParams {
        ServeParams {
            host: "127.0.0.1".to_string(),
            port: 8000,
            region: "us-east-1".to_string(),
            endpoint_name: "mySageMakerEndpoint".to_string(),
            backend_timeout: Duration::from_secs(60),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            shutdown_grace_period: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(params().validate().is_ok());
    }

    #[test]
    fn test_empty_endpoint_name_is_rejected() {
        let mut p = params();
        p.endpoint_name = "  ".to_string();
        assert!(matches!(
            p.validate(),
            Err(CommonError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_zero_max_body_size_is_rejected() {
        let mut p = params();
        p.max_body_size = 0;
        assert!(matches!(
            p.validate(),
            Err(CommonError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut p = params();
        p.backend_timeout = Duration::ZERO;
        assert!(matches!(
            p.validate(),
            Err(CommonError::InvalidConfiguration { .. })
        ));
    }
}
