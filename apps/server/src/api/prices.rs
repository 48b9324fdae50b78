use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use energyfolio_core::metrics::{self, MetricKind, MetricResult};
use energyfolio_core::prices::{DateSpan, RangeSeries};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct RangeQuery {
    symbol: String,
    start_date: String,
    end_date: String,
}

#[derive(Deserialize)]
struct MetricsQuery {
    symbol: String,
    start_date: String,
    end_date: String,
    metric: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PricePoint {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

/// Range response: prices keyed by ISO date, which keeps the BTreeMap
/// serialization date-ascending.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RangeResponse {
    symbol: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    partial: bool,
    missing_spans: Vec<DateSpan>,
    prices: BTreeMap<String, PricePoint>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricsResponse {
    symbol: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    partial: bool,
    metric: MetricResult,
}

impl From<RangeSeries> for RangeResponse {
    fn from(series: RangeSeries) -> Self {
        let prices = series
            .observations
            .iter()
            .map(|o| {
                (
                    o.date.format("%Y-%m-%d").to_string(),
                    PricePoint {
                        open: o.open,
                        high: o.high,
                        low: o.low,
                        close: o.close,
                    },
                )
            })
            .collect();

        Self {
            symbol: series.symbol,
            start_date: series.start_date,
            end_date: series.end_date,
            partial: series.partial,
            missing_spans: series.missing_spans,
            prices,
        }
    }
}

fn parse_date(field: &str, value: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::BadRequest(format!("{} is not a valid ISO date: '{}'", field, value))
    })
}

async fn get_range(
    State(state): State<Arc<AppState>>,
    Query(q): Query<RangeQuery>,
) -> ApiResult<Json<RangeResponse>> {
    let start = parse_date("start_date", &q.start_date)?;
    let end = parse_date("end_date", &q.end_date)?;

    let series = state.price_service.get_range(&q.symbol, start, end).await?;
    Ok(Json(RangeResponse::from(series)))
}

async fn get_range_metrics(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MetricsQuery>,
) -> ApiResult<Json<MetricsResponse>> {
    let start = parse_date("start_date", &q.start_date)?;
    let end = parse_date("end_date", &q.end_date)?;
    let kind: MetricKind = q.metric.parse()?;

    let series = state.price_service.get_range(&q.symbol, start, end).await?;
    let metric = metrics::compute(kind, &series.close_series(), state.ma_precision)?;

    Ok(Json(MetricsResponse {
        symbol: series.symbol,
        start_date: series.start_date,
        end_date: series.end_date,
        partial: series.partial,
        metric,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/range", get(get_range))
        .route("/range/metrics", get(get_range_metrics))
}
