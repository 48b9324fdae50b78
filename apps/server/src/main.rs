mod api;
mod config;
mod error;
mod main_lib;

use api::app_router;
use config::Config;
use main_lib::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config).await?;

    // Populate the symbol catalog once; upstream failure must not block startup
    match state.catalog_service.bootstrap().await {
        Ok(outcome) => tracing::info!("Catalog bootstrap: {:?}", outcome),
        Err(e) => tracing::warn!("Catalog bootstrap failed: {}", e),
    }

    let router = app_router(state);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
