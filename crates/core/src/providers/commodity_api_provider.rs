//! HTTP client for the commodity price API

use chrono::NaiveDate;
use log::warn;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

use super::models::{UpstreamObservation, UpstreamSymbol};
use super::upstream_provider::{UpstreamError, UpstreamProvider};

const DEFAULT_BASE_URL: &str = "https://api.commoditypriceapi.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize, Debug)]
struct SymbolsResponse {
    success: bool,
    #[serde(default)]
    symbols: Vec<UpstreamSymbol>,
}

#[derive(Deserialize, Debug)]
struct TimeseriesResponse {
    success: bool,
    #[serde(default)]
    rates: BTreeMap<String, RateEntry>,
}

#[derive(Deserialize, Debug)]
struct RateEntry {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

/// Commodity price API client
#[derive(Clone)]
pub struct CommodityApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CommodityApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Points the client at a different endpoint, used by tests
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn map_request_error(e: reqwest::Error) -> UpstreamError {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Http(e)
        }
    }
}

#[async_trait::async_trait]
impl UpstreamProvider for CommodityApiProvider {
    fn id(&self) -> &'static str {
        "COMMODITY_PRICE_API"
    }

    async fn fetch_symbols(&self) -> Result<Vec<UpstreamSymbol>, UpstreamError> {
        let url = format!("{}/symbols?access_key={}", self.base_url, self.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let body: SymbolsResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        if !body.success {
            return Err(UpstreamError::Malformed(
                "upstream reported success=false".to_string(),
            ));
        }

        Ok(body.symbols)
    }

    async fn fetch_range(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<UpstreamObservation>, UpstreamError> {
        let url = format!(
            "{}/timeseries?access_key={}&symbol={}&start_date={}&end_date={}",
            self.base_url,
            self.api_key,
            symbol,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let body: TimeseriesResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        if !body.success {
            return Err(UpstreamError::Malformed(
                "upstream reported success=false".to_string(),
            ));
        }

        // BTreeMap keys are ISO dates, so iteration is already date-ascending
        let mut observations = Vec::with_capacity(body.rates.len());
        for (date_str, rate) in body.rates {
            match NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
                Ok(date) => observations.push(UpstreamObservation {
                    date,
                    open: rate.open,
                    high: rate.high,
                    low: rate.low,
                    close: rate.close,
                }),
                Err(_) => {
                    warn!(
                        "Dropping upstream rate with unparseable date '{}' for {}",
                        date_str, symbol
                    );
                }
            }
        }

        Ok(observations)
    }
}
