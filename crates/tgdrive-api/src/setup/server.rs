//! Server startup and graceful shutdown

use anyhow::Result;
use axum::Router;
use tgdrive_core::Config;
use tokio_util::sync::CancellationToken;

use super::Application;
use crate::event_source;

/// Start the dispatcher, the event source and the HTTP server, then wait for shutdown.
pub async fn run(config: &Config, app: Application) -> Result<()> {
    let shutdown = CancellationToken::new();

    let dispatcher = tokio::spawn(app.dispatcher.run(app.events_rx, shutdown.clone()));

    let source = match event_source::start(
        config,
        app.telegram,
        app.state.events.clone(),
        shutdown.clone(),
    )
    .await
    {
        Ok(source) => source,
        Err(e) => {
            shutdown.cancel();
            return Err(e);
        }
    };

    let served = start_server(config, app.router, shutdown.clone()).await;
    shutdown.cancel();

    if let Some(source) = source {
        if let Err(e) = source.await {
            tracing::warn!(error = %e, "Polling task ended abnormally");
        }
    }
    if let Err(e) = dispatcher.await {
        tracing::warn!(error = %e, "Dispatcher task ended abnormally");
    }

    served
}

/// Start the server with graceful shutdown
pub async fn start_server(config: &Config, app: Router, shutdown: CancellationToken) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port());
    tracing::info!(addr = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        bot_mode = %config.bot_mode(),
        "Server ready and accepting connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C, SIGTERM or when `shutdown` is cancelled elsewhere,
/// and cancels `shutdown` so background loops stop too.
///
/// # Panics
/// Panics if the signal handlers cannot be installed.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
        _ = shutdown.cancelled() => {},
    }

    tracing::info!("Shutting down gracefully...");
    shutdown.cancel();
}
