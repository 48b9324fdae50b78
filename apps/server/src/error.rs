use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use energyfolio_core::catalog::CatalogError;
use energyfolio_core::metrics::MetricsError;
use energyfolio_core::prices::PriceError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Request-level error surface.
///
/// Only caller-input problems map to 4xx; everything else is a 500 with the
/// detail kept out of the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<PriceError> for ApiError {
    fn from(err: PriceError) -> Self {
        match err {
            PriceError::SymbolNotFound(symbol) => {
                ApiError::NotFound(format!("unknown symbol: {}", symbol))
            }
            PriceError::InvalidRange(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(symbol) => {
                ApiError::NotFound(format!("unknown symbol: {}", symbol))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<MetricsError> for ApiError {
    fn from(err: MetricsError) -> Self {
        match err {
            MetricsError::EmptySeries(msg) => ApiError::Unprocessable(msg),
            MetricsError::UnknownKind(kind) => {
                ApiError::BadRequest(format!("unknown metric kind: {}", kind))
            }
            MetricsError::InvalidWindow(msg) => ApiError::BadRequest(msg),
        }
    }
}

impl From<energyfolio_core::Error> for ApiError {
    fn from(err: energyfolio_core::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
