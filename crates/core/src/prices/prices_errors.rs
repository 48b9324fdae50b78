use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::errors::DatabaseError;

/// Custom error type for price cache operations
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Absorbed inside the resolver; never escapes `get_range`
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<DieselError> for PriceError {
    fn from(err: DieselError) -> Self {
        PriceError::DatabaseError(err.to_string())
    }
}

impl From<DatabaseError> for PriceError {
    fn from(err: DatabaseError) -> Self {
        PriceError::DatabaseError(err.to_string())
    }
}

impl From<CatalogError> for PriceError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(symbol) => PriceError::SymbolNotFound(symbol),
            other => PriceError::DatabaseError(other.to_string()),
        }
    }
}

/// Result type for price operations
pub type Result<T> = std::result::Result<T, PriceError>;
