use activity_portal::{api::ApiClient, load_storage, router, AppState, Config};
use std::net::SocketAddr;
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    if let Some(parent) = config.storage_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let storage = load_storage(&config.storage_path).await;
    let state = AppState::new(
        ApiClient::new(config.api_base_url.clone()),
        config.storage_path.clone(),
        storage,
    );
    info!(
        "session {:?}, activities api at {}",
        state.session().await,
        state.api.base_url()
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}
