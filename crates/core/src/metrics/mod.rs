pub(crate) mod metrics_calculator;
pub(crate) mod metrics_errors;
pub(crate) mod metrics_model;

// Re-export the public interface
pub use metrics_calculator::{
    close_points, compute, daily_change_pct, moving_average, summarize,
};
pub use metrics_model::{ClosePoint, MetricKind, MetricPoint, MetricResult, SeriesSummary};

// Re-export error types for convenience
pub use metrics_errors::{MetricsError, Result};
