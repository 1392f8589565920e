use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use folio_server::config::ServerConfig;
use folio_server::routes;
use folio_server::state::AppState;

const DEFAULT_LOG_FILTER: &str = "folio_server=info,folio_core=info,folio_client=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;
    let state = Arc::new(AppState::from_config(&config)?);

    let app = routes::app(state, &config);

    let addr = config.bind_addr();
    tracing::info!(
        fetch_timeout_secs = config.fetch_timeout.as_secs(),
        block_private_urls = config.block_private_urls,
        "Starting server on {addr}"
    );
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
