use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::providers::UpstreamObservation;

/// Domain model for one persisted daily price observation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    pub id: String,
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub created_at: NaiveDateTime,
}

impl PriceObservation {
    /// Deterministic id keyed on (symbol, date); INSERT OR REPLACE on this id
    /// is what makes the upsert idempotent.
    pub fn observation_id(symbol: &str, date: NaiveDate) -> String {
        format!("{}_{}", date.format("%Y%m%d"), symbol)
    }

    pub fn from_upstream(symbol: &str, upstream: UpstreamObservation) -> Self {
        Self {
            id: Self::observation_id(symbol, upstream.date),
            symbol: symbol.to_string(),
            date: upstream.date,
            open: upstream.open,
            high: upstream.high,
            low: upstream.low,
            close: upstream.close,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// An inclusive span of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// Resolved series for one symbol over a requested range.
///
/// `partial` is true when one or more spans could not be fetched from
/// upstream; those spans are listed in `missing_spans` so a short series is
/// never mistaken for a complete one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSeries {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub partial: bool,
    pub missing_spans: Vec<DateSpan>,
    pub observations: Vec<PriceObservation>,
}

impl RangeSeries {
    /// Date-ordered (date, close) pairs for the metrics calculator
    pub fn close_series(&self) -> Vec<(NaiveDate, f64)> {
        self.observations.iter().map(|o| (o.date, o.close)).collect()
    }
}

/// Database model for price observations
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::price_observations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PriceObservationDB {
    pub id: String,
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub created_at: NaiveDateTime,
}

impl From<PriceObservationDB> for PriceObservation {
    fn from(db: PriceObservationDB) -> Self {
        PriceObservation {
            id: db.id,
            symbol: db.symbol,
            date: db.date,
            open: db.open,
            high: db.high,
            low: db.low,
            close: db.close,
            created_at: db.created_at,
        }
    }
}

impl From<PriceObservation> for PriceObservationDB {
    fn from(domain: PriceObservation) -> Self {
        Self {
            id: domain.id,
            symbol: domain.symbol,
            date: domain.date,
            open: domain.open,
            high: domain.high,
            low: domain.low,
            close: domain.close,
            created_at: domain.created_at,
        }
    }
}

/// Database model for fetched-span coverage
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::symbol_coverage)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CoverageSpanDB {
    pub id: String,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CoverageSpanDB {
    pub fn from_span(symbol: &str, span: DateSpan) -> Self {
        Self {
            id: format!("{}:{}", symbol, span.start.format("%Y%m%d")),
            symbol: symbol.to_string(),
            start_date: span.start,
            end_date: span.end,
        }
    }
}

impl From<CoverageSpanDB> for DateSpan {
    fn from(db: CoverageSpanDB) -> Self {
        DateSpan {
            start: db.start_date,
            end: db.end_date,
        }
    }
}
