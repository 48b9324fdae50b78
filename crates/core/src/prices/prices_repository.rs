use chrono::NaiveDate;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::schema::{price_observations, symbol_coverage};

use super::prices_errors::{PriceError, Result};
use super::prices_model::{CoverageSpanDB, DateSpan, PriceObservation, PriceObservationDB};
use super::spans::merge_spans;

/// Repository for persisted price observations and fetch coverage
pub struct PriceRepository {
    pool: Arc<DbPool>,
}

impl PriceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Observations for a symbol within an inclusive date range, ascending
    pub fn get_observations(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceObservation>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PriceError::DatabaseError(e.to_string()))?;

        let rows = price_observations::table
            .filter(price_observations::symbol.eq(symbol))
            .filter(price_observations::date.ge(start))
            .filter(price_observations::date.le(end))
            .order(price_observations::date.asc())
            .load::<PriceObservationDB>(&mut conn)?;

        Ok(rows.into_iter().map(PriceObservation::from).collect())
    }

    /// Upserts observations keyed on their deterministic id.
    ///
    /// Writing the same (symbol, date) twice leaves exactly one row.
    pub fn upsert_observations(&self, observations: &[PriceObservation]) -> Result<usize> {
        if observations.is_empty() {
            return Ok(0);
        }

        let mut conn = get_connection(&self.pool)
            .map_err(|e| PriceError::DatabaseError(e.to_string()))?;

        let rows: Vec<PriceObservationDB> = observations
            .iter()
            .cloned()
            .map(PriceObservationDB::from)
            .collect();

        let mut written = 0;
        for chunk in rows.chunks(100) {
            written += diesel::replace_into(price_observations::table)
                .values(chunk)
                .execute(&mut conn)?;
        }

        Ok(written)
    }

    /// Fetched-span coverage for a symbol, sorted by span start
    pub fn get_coverage(&self, symbol: &str) -> Result<Vec<DateSpan>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PriceError::DatabaseError(e.to_string()))?;

        let rows = symbol_coverage::table
            .filter(symbol_coverage::symbol.eq(symbol))
            .order(symbol_coverage::start_date.asc())
            .load::<CoverageSpanDB>(&mut conn)?;

        Ok(rows.into_iter().map(DateSpan::from).collect())
    }

    /// Records a successfully fetched span, coalescing it with the spans
    /// already on record so coverage stays a minimal sorted set.
    pub fn record_coverage(&self, symbol: &str, span: DateSpan) -> Result<()> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PriceError::DatabaseError(e.to_string()))?;

        conn.transaction::<(), PriceError, _>(|tx| {
            let existing: Vec<DateSpan> = symbol_coverage::table
                .filter(symbol_coverage::symbol.eq(symbol))
                .order(symbol_coverage::start_date.asc())
                .load::<CoverageSpanDB>(tx)?
                .into_iter()
                .map(DateSpan::from)
                .collect();

            let merged = merge_spans(&existing, span);

            diesel::delete(symbol_coverage::table.filter(symbol_coverage::symbol.eq(symbol)))
                .execute(tx)?;

            let rows: Vec<CoverageSpanDB> = merged
                .into_iter()
                .map(|s| CoverageSpanDB::from_span(symbol, s))
                .collect();

            diesel::insert_into(symbol_coverage::table)
                .values(&rows)
                .execute(tx)?;

            Ok(())
        })
    }
}
