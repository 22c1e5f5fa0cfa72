use tracing_subscriber::EnvFilter;

use tour_server::config::ServerConfig;
use tour_server::routing::OrsClient;
use tour_server::store::setup_database;
use tour_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tour_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    if config.routing.api_key.is_empty() {
        tracing::warn!("ORS_API_KEY not set. Route requests will be rejected upstream.");
    }

    let pool = setup_database(&config.db_path).await?;

    let routing = OrsClient::new(config.routing.clone())?;
    let state = AppState::new(pool, routing);
    let app = create_router(state, &config.public_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, public_dir = %config.public_dir.display(), "listening");
    tracing::info!("  POST /save-station, /edit-station, /delete-station");
    tracing::info!("  GET  /get-stations");
    tracing::info!("  POST /save-tour, /edit-tour, /delete-tour");
    tracing::info!("  GET  /get-tours");
    tracing::info!("  POST /route-bike");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

/// Resolve on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
