use energyfolio_core::constants::{DEFAULT_MA_PRECISION, DEFAULT_SYMBOL_CATEGORY};

const DEFAULT_DB_PATH: &str = "./data/energyfolio.db";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 8;

/// Server configuration, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub db_pool_size: u32,
    pub listen_addr: String,
    pub upstream_api_key: String,
    /// Override for the upstream endpoint, mainly for tests
    pub upstream_base_url: Option<String>,
    pub symbol_category: String,
    pub ma_precision: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            db_path: env_or("EF_DB_PATH", DEFAULT_DB_PATH),
            db_pool_size: env_parsed("EF_DB_POOL_SIZE", DEFAULT_POOL_SIZE),
            listen_addr: env_or("EF_LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
            upstream_api_key: env_or("UPSTREAM_API_KEY", ""),
            upstream_base_url: std::env::var("UPSTREAM_BASE_URL").ok(),
            symbol_category: env_or("EF_SYMBOL_CATEGORY", DEFAULT_SYMBOL_CATEGORY),
            ma_precision: env_parsed("EF_MA_PRECISION", DEFAULT_MA_PRECISION),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
