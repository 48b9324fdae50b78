use thiserror::Error;

/// Custom error type for derived-metric calculations
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Min/max/average are undefined on a zero-length series
    #[error("Empty series: {0}")]
    EmptySeries(String),

    #[error("Unknown metric kind: {0}")]
    UnknownKind(String),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}

/// Result type for metric operations
pub type Result<T> = std::result::Result<T, MetricsError>;
