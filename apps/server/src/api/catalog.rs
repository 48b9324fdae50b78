use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use energyfolio_core::catalog::Symbol;

use crate::{error::ApiResult, main_lib::AppState};

async fn list_catalog(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Symbol>>> {
    let symbols = state.catalog_service.get_symbols()?;
    Ok(Json(symbols))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/catalog", get(list_catalog))
}
