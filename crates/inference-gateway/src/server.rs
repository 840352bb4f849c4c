use std::future::Future;
use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use gateway::router::{GatewayService, initiate_router};
use shared::error::CommonError;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct StartAxumServerParams {
    pub host: String,
    pub port: u16,
    pub shutdown_grace_period: Duration,
    pub system_shutdown_signal_rx: tokio::sync::broadcast::Receiver<()>,
    pub service: GatewayService,
}

/// Binds the listener and returns the server future together with its
/// handle and the bound address. The server drains in-flight requests for
/// `shutdown_grace_period` once a shutdown signal arrives.
pub async fn start_axum_server(
    params: StartAxumServerParams,
) -> Result<
    (
        impl Future<Output = Result<(), std::io::Error>>,
        axum_server::Handle,
        SocketAddr,
    ),
    CommonError,
> {
    let mut system_shutdown_signal_rx = params.system_shutdown_signal_rx;
    let addr: SocketAddr = format!("{}:{}", params.host, params.port)
        .parse()
        .map_err(|e| CommonError::AddrParseError { source: e })?;

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)?;
    listener.set_nonblocking(true)?;
    let local_addr = listener.local_addr()?;

    let handle = axum_server::Handle::new();

    let router = initiate_router(params.service).layer(TraceLayer::new_for_http());

    info!("Router initiated");

    let server_fut = axum_server::from_tcp(listener)
        .handle(handle.clone())
        .serve(router.into_make_service());

    let handle_clone = handle.clone();
    let grace_period = params.shutdown_grace_period;

    tokio::spawn(async move {
        let _ = system_shutdown_signal_rx.recv().await;

        info!("Shutting down axum server, waiting for in-flight requests to complete...");

        handle_clone.graceful_shutdown(Some(grace_period));

        info!("Axum server shut down gracefully");
    });

    info!("Server bound");
    Ok((server_fut, handle, local_addr))
}
