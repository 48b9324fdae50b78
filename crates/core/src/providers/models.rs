use chrono::NaiveDate;
use serde::Deserialize;

/// One row of the upstream symbol directory
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamSymbol {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub currency: serde_json::Value,
    #[serde(default)]
    pub unit: serde_json::Value,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub update_interval: String,
}

/// One daily OHLC observation as reported by upstream
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamObservation {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}
