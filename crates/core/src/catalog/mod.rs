pub(crate) mod catalog_errors;
pub(crate) mod catalog_model;
pub(crate) mod catalog_repository;
pub(crate) mod catalog_service;

// Re-export the public interface
pub use catalog_model::{NewSymbol, Symbol};
pub use catalog_repository::SymbolRepository;
pub use catalog_service::{BootstrapOutcome, CatalogService};

// Re-export error types for convenience
pub use catalog_errors::{CatalogError, Result};
