use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbConnection, DbPool};
use crate::schema::{bootstrap_state, symbols};

use super::catalog_errors::{CatalogError, Result};
use super::catalog_model::{BootstrapStateDB, NewSymbol, Symbol, SymbolDB};

/// Repository for the persisted symbol catalog
pub struct SymbolRepository {
    pool: Arc<DbPool>,
}

impl SymbolRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Lists all catalog symbols, ordered by symbol
    pub fn list(&self) -> Result<Vec<Symbol>> {
        let mut conn = get_connection(&self.pool).map_err(|e| {
            CatalogError::DatabaseError(e.to_string())
        })?;

        let results = symbols::table
            .order(symbols::symbol.asc())
            .load::<SymbolDB>(&mut conn)?;

        Ok(results.into_iter().map(Symbol::from).collect())
    }

    /// Retrieves a symbol by its identifier
    pub fn get_by_symbol(&self, symbol: &str) -> Result<Symbol> {
        let mut conn = get_connection(&self.pool).map_err(|e| {
            CatalogError::DatabaseError(e.to_string())
        })?;

        symbols::table
            .find(symbol)
            .first::<SymbolDB>(&mut conn)
            .optional()?
            .map(Symbol::from)
            .ok_or_else(|| CatalogError::NotFound(symbol.to_string()))
    }

    /// True once the bootstrap marker row has been written
    pub fn is_bootstrapped(&self) -> Result<bool> {
        let mut conn = get_connection(&self.pool).map_err(|e| {
            CatalogError::DatabaseError(e.to_string())
        })?;

        let count: i64 = bootstrap_state::table.count().get_result(&mut conn)?;
        Ok(count > 0)
    }

    /// Atomically claims the bootstrap marker and bulk-inserts the catalog.
    ///
    /// The marker insert uses INSERT OR IGNORE inside the same transaction as
    /// the symbol rows; a zero row count means another worker already
    /// bootstrapped and the whole call is a no-op. Returns the number of
    /// symbols inserted, or None when the marker was already present.
    pub fn claim_and_insert(&self, new_symbols: &[NewSymbol]) -> Result<Option<usize>> {
        let mut conn = get_connection(&self.pool).map_err(|e| {
            CatalogError::DatabaseError(e.to_string())
        })?;

        conn.transaction::<Option<usize>, CatalogError, _>(|tx| {
            let marker = BootstrapStateDB {
                id: 1,
                completed_at: chrono::Utc::now().naive_utc(),
                symbol_count: new_symbols.len() as i32,
            };

            let claimed = diesel::insert_or_ignore_into(bootstrap_state::table)
                .values(&marker)
                .execute(tx)?;

            if claimed == 0 {
                return Ok(None);
            }

            let inserted = Self::insert_symbols(tx, new_symbols)?;

            diesel::update(bootstrap_state::table.find(1))
                .set(bootstrap_state::symbol_count.eq(inserted as i32))
                .execute(tx)?;

            Ok(Some(inserted))
        })
    }

    fn insert_symbols(conn: &mut DbConnection, new_symbols: &[NewSymbol]) -> Result<usize> {
        let rows: Vec<SymbolDB> = new_symbols
            .iter()
            .cloned()
            .map(SymbolDB::from)
            .collect();

        let mut inserted = 0;
        for chunk in rows.chunks(100) {
            inserted += diesel::insert_or_ignore_into(symbols::table)
                .values(chunk)
                .execute(conn)?;
        }
        Ok(inserted)
    }
}
