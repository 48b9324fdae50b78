pub(crate) mod prices_errors;
pub(crate) mod prices_model;
pub(crate) mod prices_repository;
pub(crate) mod prices_service;
pub(crate) mod spans;

#[cfg(test)]
mod prices_service_tests;

// Re-export the public interface
pub use prices_model::{DateSpan, PriceObservation, RangeSeries};
pub use prices_repository::PriceRepository;
pub use prices_service::PriceService;
pub use spans::{merge_spans, missing_spans};

// Re-export error types for convenience
pub use prices_errors::{PriceError, Result};
