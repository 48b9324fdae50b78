use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use super::models::{UpstreamObservation, UpstreamSymbol};

/// Errors that can occur when talking to the upstream price API
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// Request exceeded the client timeout
    #[error("Upstream request timed out")]
    Timeout,

    /// Response body could not be interpreted
    #[error("Malformed upstream payload: {0}")]
    Malformed(String),
}

/// Trait for the upstream commodity price source.
///
/// Implement this to plug in a different data vendor; the cache and
/// bootstrapper only depend on this interface.
#[async_trait]
pub trait UpstreamProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs
    fn id(&self) -> &'static str;

    /// Fetch the full symbol directory (no date parameters)
    async fn fetch_symbols(&self) -> Result<Vec<UpstreamSymbol>, UpstreamError>;

    /// Fetch daily observations for one symbol over an inclusive date range.
    ///
    /// Dates with no upstream data are simply absent from the result; the
    /// returned observations are ordered by date ascending.
    async fn fetch_range(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<UpstreamObservation>, UpstreamError>;
}
