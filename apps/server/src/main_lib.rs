use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use energyfolio_core::catalog::{CatalogService, SymbolRepository};
use energyfolio_core::db;
use energyfolio_core::prices::{PriceRepository, PriceService};
use energyfolio_core::providers::{CommodityApiProvider, UpstreamProvider};

use crate::config::Config;

pub struct AppState {
    pub catalog_service: Arc<CatalogService>,
    pub price_service: Arc<PriceService>,
    pub ma_precision: u32,
}

pub fn init_tracing() {
    let log_format = std::env::var("EF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path, config.db_pool_size)?;
    db::run_migrations(&pool)?;

    let provider: Arc<dyn UpstreamProvider> = match &config.upstream_base_url {
        Some(base_url) => Arc::new(CommodityApiProvider::with_base_url(
            config.upstream_api_key.clone(),
            base_url.clone(),
        )),
        None => Arc::new(CommodityApiProvider::new(config.upstream_api_key.clone())),
    };

    let catalog_service = Arc::new(CatalogService::new(
        SymbolRepository::new(pool.clone()),
        provider.clone(),
        config.symbol_category.clone(),
    ));

    let price_service = Arc::new(PriceService::new(
        PriceRepository::new(pool.clone()),
        SymbolRepository::new(pool.clone()),
        provider,
    ));

    Ok(Arc::new(AppState {
        catalog_service,
        price_service,
        ma_precision: config.ma_precision,
    }))
}
