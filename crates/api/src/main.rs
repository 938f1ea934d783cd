use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::sync::Arc;

use nodeloom_api::config::{ConfigError, RunMode, ServerConfig};
use nodeloom_api::router::build_app_router;
use nodeloom_api::state::AppState;
use nodeloom_db::{RestGateway, StoreError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Failures that stop the server before or while it runs.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not build remote store client: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid HOST address: {0}")]
    Address(#[from] AddrParseError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Tracing goes up first so configuration errors are logged.
    init_tracing(RunMode::from_env());

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        run_mode = ?config.run_mode,
        "Loaded server configuration"
    );

    // --- Remote store ---
    let gateway = RestGateway::new(&config.store.url, config.store.key.clone())?;
    tracing::info!(base_url = %config.store.url, "Remote store gateway ready");

    let addr = SocketAddr::new(config.host.parse::<IpAddr>()?, config.port);

    // --- Router ---
    let state = AppState::new(Arc::new(gateway), config);
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Install the global subscriber. `release` logs JSON lines; other modes
/// use the human-readable formatter.
fn init_tracing(mode: RunMode) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nodeloom_api=debug,nodeloom_db=debug,tower_http=debug".into());

    let json = mode == RunMode::Release;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
