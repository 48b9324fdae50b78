//! Tests for the range cache resolver contract.
//!
//! Each test runs against a throwaway SQLite file and a scripted upstream
//! provider that counts its calls, so cache-hit and partial-result behavior
//! can be asserted precisely.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::catalog::{NewSymbol, SymbolRepository};
use crate::db;
use crate::prices::prices_errors::PriceError;
use crate::prices::prices_model::DateSpan;
use crate::prices::prices_repository::PriceRepository;
use crate::prices::prices_service::PriceService;
use crate::providers::{UpstreamError, UpstreamObservation, UpstreamProvider, UpstreamSymbol};

/// Scripted upstream: serves weekday closes for any requested span and
/// records every fetch it receives.
struct ScriptedProvider {
    fetched_spans: Mutex<Vec<DateSpan>>,
    fail_fetches: AtomicBool,
}

impl ScriptedProvider {
    fn new() -> Self {
        Self {
            fetched_spans: Mutex::new(Vec::new()),
            fail_fetches: AtomicBool::new(false),
        }
    }

    fn set_failing(&self, failing: bool) {
        self.fail_fetches.store(failing, Ordering::SeqCst);
    }

    fn fetch_count(&self) -> usize {
        self.fetched_spans.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamProvider for ScriptedProvider {
    fn id(&self) -> &'static str {
        "SCRIPTED"
    }

    async fn fetch_symbols(&self) -> Result<Vec<UpstreamSymbol>, UpstreamError> {
        Ok(Vec::new())
    }

    async fn fetch_range(
        &self,
        _symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<UpstreamObservation>, UpstreamError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status(503));
        }

        self.fetched_spans
            .lock()
            .unwrap()
            .push(DateSpan::new(start, end));

        let mut observations = Vec::new();
        let mut current = start;
        while current <= end {
            // Weekends have no trading data, like a real commodity feed
            if current.weekday().num_days_from_monday() < 5 {
                let close = 50.0 + current.day() as f64;
                observations.push(UpstreamObservation {
                    date: current,
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                });
            }
            current = current.succ_opt().unwrap();
        }
        Ok(observations)
    }
}

struct TestContext {
    service: PriceService,
    repository: PriceRepository,
    provider: Arc<ScriptedProvider>,
    _dir: tempfile::TempDir,
}

fn setup() -> TestContext {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir
        .path()
        .join("prices_test.db")
        .to_str()
        .unwrap()
        .to_string();

    let db_path = db::init(&db_path).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path, 2).expect("Failed to create pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    let symbols = SymbolRepository::new(pool.clone());
    symbols
        .claim_and_insert(&[NewSymbol {
            symbol: "BRENTOIL".to_string(),
            name: "Brent Crude Oil".to_string(),
            category: "Energy".to_string(),
            ..Default::default()
        }])
        .expect("Failed to seed symbol");

    let provider = Arc::new(ScriptedProvider::new());
    let service = PriceService::new(
        PriceRepository::new(pool.clone()),
        SymbolRepository::new(pool.clone()),
        provider.clone(),
    );

    TestContext {
        service,
        repository: PriceRepository::new(pool),
        provider,
        _dir: dir,
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn test_get_range_unknown_symbol_is_not_found() {
    let ctx = setup();
    let result = ctx
        .service
        .get_range("NO_SUCH", d(2024, 1, 1), d(2024, 1, 31))
        .await;
    assert!(matches!(result, Err(PriceError::SymbolNotFound(_))));
    assert_eq!(ctx.provider.fetch_count(), 0);
}

#[tokio::test]
async fn test_get_range_inverted_range_is_invalid() {
    let ctx = setup();
    let result = ctx
        .service
        .get_range("BRENTOIL", d(2024, 1, 31), d(2024, 1, 1))
        .await;
    assert!(matches!(result, Err(PriceError::InvalidRange(_))));
}

#[tokio::test]
async fn test_get_range_returns_ordered_in_range_series() {
    let ctx = setup();
    // 2024-01-01 is a Monday
    let series = ctx
        .service
        .get_range("BRENTOIL", d(2024, 1, 1), d(2024, 1, 14))
        .await
        .unwrap();

    assert!(!series.partial);
    assert!(series.missing_spans.is_empty());
    // Ten weekdays in the two weeks, weekends simply absent
    assert_eq!(series.observations.len(), 10);
    for pair in series.observations.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
    for o in &series.observations {
        assert!(o.date >= d(2024, 1, 1) && o.date <= d(2024, 1, 14));
        assert_eq!(o.symbol, "BRENTOIL");
    }
}

#[tokio::test]
async fn test_second_call_is_a_full_cache_hit() {
    let ctx = setup();
    let first = ctx
        .service
        .get_range("BRENTOIL", d(2024, 1, 1), d(2024, 1, 14))
        .await
        .unwrap();
    assert_eq!(ctx.provider.fetch_count(), 1);

    let second = ctx
        .service
        .get_range("BRENTOIL", d(2024, 1, 1), d(2024, 1, 14))
        .await
        .unwrap();

    // No new upstream call, even though weekend dates are absent from the store
    assert_eq!(ctx.provider.fetch_count(), 1);
    assert_eq!(first.observations.len(), second.observations.len());
    for (a, b) in first.observations.iter().zip(second.observations.iter()) {
        assert_eq!(a.date, b.date);
        assert_eq!(a.close, b.close);
    }
}

#[tokio::test]
async fn test_only_missing_subranges_are_fetched() {
    let ctx = setup();
    ctx.service
        .get_range("BRENTOIL", d(2024, 1, 8), d(2024, 1, 12))
        .await
        .unwrap();
    assert_eq!(ctx.provider.fetch_count(), 1);

    // Wider request: only the two flanking gaps go upstream
    ctx.service
        .get_range("BRENTOIL", d(2024, 1, 1), d(2024, 1, 19))
        .await
        .unwrap();

    let spans = ctx.provider.fetched_spans.lock().unwrap().clone();
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0], DateSpan::new(d(2024, 1, 8), d(2024, 1, 12)));
    assert!(spans[1..].contains(&DateSpan::new(d(2024, 1, 1), d(2024, 1, 7))));
    assert!(spans[1..].contains(&DateSpan::new(d(2024, 1, 13), d(2024, 1, 19))));
}

#[tokio::test]
async fn test_upstream_failure_yields_flagged_partial_result() {
    let ctx = setup();
    ctx.service
        .get_range("BRENTOIL", d(2024, 1, 1), d(2024, 1, 7))
        .await
        .unwrap();

    ctx.provider.set_failing(true);
    let series = ctx
        .service
        .get_range("BRENTOIL", d(2024, 1, 1), d(2024, 1, 14))
        .await
        .unwrap();

    assert!(series.partial);
    assert_eq!(
        series.missing_spans,
        vec![DateSpan::new(d(2024, 1, 8), d(2024, 1, 14))]
    );
    // The cached week is still served
    assert_eq!(series.observations.len(), 5);

    // Once upstream recovers the failed span is fetched again
    ctx.provider.set_failing(false);
    let recovered = ctx
        .service
        .get_range("BRENTOIL", d(2024, 1, 1), d(2024, 1, 14))
        .await
        .unwrap();
    assert!(!recovered.partial);
    assert_eq!(recovered.observations.len(), 10);
}

#[tokio::test]
async fn test_upsert_same_observation_twice_leaves_one_row() {
    let ctx = setup();
    let observation = crate::prices::prices_model::PriceObservation::from_upstream(
        "BRENTOIL",
        UpstreamObservation {
            date: d(2024, 1, 3),
            open: 74.0,
            high: 76.0,
            low: 73.5,
            close: 75.0,
        },
    );

    ctx.repository
        .upsert_observations(std::slice::from_ref(&observation))
        .unwrap();
    ctx.repository
        .upsert_observations(std::slice::from_ref(&observation))
        .unwrap();

    let rows = ctx
        .repository
        .get_observations("BRENTOIL", d(2024, 1, 1), d(2024, 1, 31))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].close, 75.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_overlapping_requests_share_one_fetch() {
    let ctx = Arc::new(setup());

    let mut handles = Vec::new();
    for _ in 0..4 {
        let ctx = ctx.clone();
        handles.push(tokio::spawn(async move {
            ctx.service
                .get_range("BRENTOIL", d(2024, 1, 1), d(2024, 1, 14))
                .await
                .unwrap()
        }));
    }

    let mut lengths = Vec::new();
    for handle in handles {
        lengths.push(handle.await.unwrap().observations.len());
    }

    // The per-symbol lock serializes the resolutions; the first fetches, the
    // rest hit coverage
    assert_eq!(ctx.provider.fetch_count(), 1);
    assert!(lengths.iter().all(|&l| l == 10));
}
