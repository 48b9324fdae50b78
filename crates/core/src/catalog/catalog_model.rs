use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::catalog_errors::{CatalogError, Result};
use crate::providers::UpstreamSymbol;

/// Domain model for a tradable commodity symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub symbol: String,
    pub name: String,
    pub category: String,
    /// Currency metadata as reported by upstream, kept opaque
    pub currency: serde_json::Value,
    /// Unit metadata as reported by upstream, kept opaque
    pub unit: serde_json::Value,
    pub status: String,
    pub update_interval: String,
    pub created_at: NaiveDateTime,
}

/// Input model for inserting a catalog symbol
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewSymbol {
    pub symbol: String,
    pub name: String,
    pub category: String,
    pub currency: serde_json::Value,
    pub unit: serde_json::Value,
    pub status: String,
    pub update_interval: String,
}

impl NewSymbol {
    /// Validates the new symbol data
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(CatalogError::InvalidData(
                "Symbol cannot be empty".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidData(
                "Symbol name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<UpstreamSymbol> for NewSymbol {
    fn from(row: UpstreamSymbol) -> Self {
        Self {
            symbol: row.symbol,
            name: row.name,
            category: row.category,
            currency: row.currency,
            unit: row.unit,
            status: row.status,
            update_interval: row.update_interval,
        }
    }
}

/// Database model for catalog symbols
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::symbols)]
#[diesel(primary_key(symbol))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SymbolDB {
    pub symbol: String,
    pub name: String,
    pub category: String,
    pub currency: String,
    pub unit: String,
    pub status: String,
    pub update_interval: String,
    pub created_at: NaiveDateTime,
}

impl From<SymbolDB> for Symbol {
    fn from(db: SymbolDB) -> Self {
        Symbol {
            symbol: db.symbol,
            name: db.name,
            category: db.category,
            currency: serde_json::from_str(&db.currency)
                .unwrap_or(serde_json::Value::Null),
            unit: serde_json::from_str(&db.unit).unwrap_or(serde_json::Value::Null),
            status: db.status,
            update_interval: db.update_interval,
            created_at: db.created_at,
        }
    }
}

impl From<NewSymbol> for SymbolDB {
    fn from(domain: NewSymbol) -> Self {
        Self {
            symbol: domain.symbol,
            name: domain.name,
            category: domain.category,
            currency: domain.currency.to_string(),
            unit: domain.unit.to_string(),
            status: domain.status,
            update_interval: domain.update_interval,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Database model for the bootstrap marker row
#[derive(Queryable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::bootstrap_state)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BootstrapStateDB {
    pub id: i32,
    pub completed_at: NaiveDateTime,
    pub symbol_count: i32,
}
