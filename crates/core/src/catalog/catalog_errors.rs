use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::errors::DatabaseError;

/// Custom error type for symbol catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),
}

impl From<DieselError> for CatalogError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => CatalogError::NotFound("Record not found".to_string()),
            _ => CatalogError::DatabaseError(err.to_string()),
        }
    }
}

impl From<DatabaseError> for CatalogError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::QueryFailed(DieselError::NotFound) => {
                CatalogError::NotFound("Record not found".to_string())
            }
            other => CatalogError::DatabaseError(other.to_string()),
        }
    }
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
