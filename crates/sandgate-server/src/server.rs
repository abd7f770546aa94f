//! Server startup and graceful shutdown.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;

use sandgate_config::Config;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::ServerError;
use crate::routes::router;
use crate::state::AppState;

/// Bind the configured listen address.
pub async fn bind(listen: &str) -> Result<TcpListener, ServerError> {
    let addr: SocketAddr = listen
        .parse()
        .map_err(|_| ServerError::Config("invalid listen address".into()))?;
    Ok(TcpListener::bind(addr).await?)
}

/// Serve `state` on `listener` until `shutdown` is cancelled.
///
/// After cancellation, in-flight requests get `shutdown_timeout` to finish.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown_timeout: Duration,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let address = listener.local_addr()?;
    info!(%address, "listening");

    let signal = shutdown.clone();
    let server = axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { signal.cancelled().await })
        .into_future();

    let drain_deadline = async {
        shutdown.cancelled().await;
        info!("shutdown signal received, draining requests");
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = server => result?,
        _ = drain_deadline => {
            warn!(timeout_secs = shutdown_timeout.as_secs(), "shutdown timeout, dropping active requests");
        }
    }

    info!("server stopped");
    Ok(())
}

/// Run the server with a cancellation token for graceful shutdown.
pub async fn run_with_shutdown(config: Config, shutdown: CancellationToken) -> Result<(), ServerError> {
    let state = AppState::from_config(&config).await?;
    let listener = bind(&config.server.listen).await?;
    serve(
        listener,
        state,
        Duration::from_secs(config.server.shutdown_timeout_secs),
        shutdown,
    )
    .await
}

/// Run the server (blocking until error, no graceful shutdown).
pub async fn run(config: Config) -> Result<(), ServerError> {
    run_with_shutdown(config, CancellationToken::new()).await
}
