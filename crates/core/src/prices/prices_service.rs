use chrono::NaiveDate;
use dashmap::DashMap;
use futures::future::join_all;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::catalog::SymbolRepository;
use crate::providers::UpstreamProvider;

use super::prices_errors::{PriceError, Result};
use super::prices_model::{DateSpan, PriceObservation, RangeSeries};
use super::prices_repository::PriceRepository;
use super::spans::missing_spans;

/// Range cache resolver.
///
/// Serves date-range price queries from the observation store, fetching and
/// persisting only the spans that have never been fetched before. Upstream
/// failures degrade to a partial result instead of failing the request.
pub struct PriceService {
    repository: PriceRepository,
    symbols: SymbolRepository,
    provider: Arc<dyn UpstreamProvider>,
    /// One async mutex per symbol so overlapping requests never issue
    /// duplicate upstream calls for the same span
    fetch_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl PriceService {
    pub fn new(
        repository: PriceRepository,
        symbols: SymbolRepository,
        provider: Arc<dyn UpstreamProvider>,
    ) -> Self {
        Self {
            repository,
            symbols,
            provider,
            fetch_locks: DashMap::new(),
        }
    }

    /// Returns the full, date-ordered series for [start, end].
    ///
    /// Unknown symbols and inverted ranges are the only request-level errors;
    /// everything upstream-related is absorbed into the `partial` flag.
    pub async fn get_range(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RangeSeries> {
        if start > end {
            return Err(PriceError::InvalidRange(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }

        self.symbols.get_by_symbol(symbol)?;

        let lock = self.symbol_lock(symbol);
        let _guard = lock.lock().await;

        let covered = self.repository.get_coverage(symbol)?;
        let gaps = missing_spans(start, end, &covered);

        let mut unfetched: Vec<DateSpan> = Vec::new();
        if !gaps.is_empty() {
            debug!(
                "{} missing span(s) for {} in [{}, {}]",
                gaps.len(),
                symbol,
                start,
                end
            );

            let fetches = gaps.iter().map(|span| self.fetch_span(symbol, *span));
            for (span, outcome) in gaps.iter().zip(join_all(fetches).await) {
                if let Err(e) = outcome {
                    warn!(
                        "Leaving span [{}, {}] of {} unfetched: {}",
                        span.start, span.end, symbol, e
                    );
                    unfetched.push(*span);
                }
            }
        }

        let observations = self.repository.get_observations(symbol, start, end)?;

        Ok(RangeSeries {
            symbol: symbol.to_string(),
            start_date: start,
            end_date: end,
            partial: !unfetched.is_empty(),
            missing_spans: unfetched,
            observations,
        })
    }

    /// Fetches one span from upstream, persists it, and records coverage.
    ///
    /// Coverage is only written after a successful fetch, so a failed span is
    /// retried by the next request that needs it.
    async fn fetch_span(&self, symbol: &str, span: DateSpan) -> Result<()> {
        let fetched = self
            .provider
            .fetch_range(symbol, span.start, span.end)
            .await
            .map_err(|e| PriceError::Upstream(e.to_string()))?;

        let observations: Vec<PriceObservation> = fetched
            .into_iter()
            .map(|o| PriceObservation::from_upstream(symbol, o))
            .collect();

        self.repository.upsert_observations(&observations)?;
        self.repository.record_coverage(symbol, span)?;

        Ok(())
    }

    fn symbol_lock(&self, symbol: &str) -> Arc<Mutex<()>> {
        self.fetch_locks
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
