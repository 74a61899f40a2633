use anyhow::Context;
use clap::Args;
use tokio::net::TcpListener;

use crate::app::app;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::state::AppState;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides API_PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Use process-local stores instead of Postgres")]
    pub in_memory: bool,
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting users-api in {:?} mode", config.environment);

    // The pool lives exactly as long as the server; it is closed after shutdown below.
    let database = if args.in_memory {
        tracing::warn!("Using in-memory stores; data is lost on exit");
        None
    } else {
        Some(
            DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?,
        )
    };

    let state = match &database {
        Some(database) => AppState::postgres(&config, database.clone()),
        None => AppState::in_memory(&config),
    };

    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    let served = axum::serve(listener, app(state, &config))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(database) = database {
        database.close().await;
    }
    served.context("server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
