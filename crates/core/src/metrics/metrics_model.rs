use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::constants::{MA_WINDOW_MONTH, MA_WINDOW_WEEK};

use super::metrics_errors::MetricsError;

/// Closed set of derived metrics over a close-price series.
///
/// Parsed from the wire as `close`, `summary`, `daily_change`, `ma7`, `ma30`
/// or `ma<N>` for an arbitrary window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Close,
    Summary,
    DailyChangePct,
    MovingAverage { window: u32 },
}

impl MetricKind {
    pub const MA_WEEK: MetricKind = MetricKind::MovingAverage {
        window: MA_WINDOW_WEEK,
    };
    pub const MA_MONTH: MetricKind = MetricKind::MovingAverage {
        window: MA_WINDOW_MONTH,
    };
}

impl FromStr for MetricKind {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "close" => Ok(MetricKind::Close),
            "summary" => Ok(MetricKind::Summary),
            "daily_change" => Ok(MetricKind::DailyChangePct),
            other => {
                if let Some(window_str) = other.strip_prefix("ma") {
                    let window: u32 = window_str.parse().map_err(|_| {
                        MetricsError::UnknownKind(other.to_string())
                    })?;
                    if window == 0 {
                        return Err(MetricsError::InvalidWindow(
                            "window must be at least 1".to_string(),
                        ));
                    }
                    Ok(MetricKind::MovingAverage { window })
                } else {
                    Err(MetricsError::UnknownKind(other.to_string()))
                }
            }
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Close => write!(f, "close"),
            MetricKind::Summary => write!(f, "summary"),
            MetricKind::DailyChangePct => write!(f, "daily_change"),
            MetricKind::MovingAverage { window } => write!(f, "ma{}", window),
        }
    }
}

/// One (date, close) pair of the identity projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// One dated metric value; `None` is the explicit "no data" marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Min/max/average over a close series; min/max dates are the first occurrence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub min: f64,
    pub min_date: NaiveDate,
    pub max: f64,
    pub max_date: NaiveDate,
    pub average: f64,
}

/// Tagged metric payload returned to the API layer
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MetricResult {
    Close { points: Vec<ClosePoint> },
    Summary { summary: SeriesSummary },
    DailyChangePct { points: Vec<MetricPoint> },
    MovingAverage { window: u32, points: Vec<MetricPoint> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_kinds() {
        assert_eq!("close".parse::<MetricKind>().unwrap(), MetricKind::Close);
        assert_eq!(
            "summary".parse::<MetricKind>().unwrap(),
            MetricKind::Summary
        );
        assert_eq!(
            "daily_change".parse::<MetricKind>().unwrap(),
            MetricKind::DailyChangePct
        );
    }

    #[test]
    fn test_parse_ma_presets_and_arbitrary_windows() {
        assert_eq!("ma7".parse::<MetricKind>().unwrap(), MetricKind::MA_WEEK);
        assert_eq!("ma30".parse::<MetricKind>().unwrap(), MetricKind::MA_MONTH);
        assert_eq!(
            "ma90".parse::<MetricKind>().unwrap(),
            MetricKind::MovingAverage { window: 90 }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_zero_window() {
        assert!("volatility".parse::<MetricKind>().is_err());
        assert!("ma0".parse::<MetricKind>().is_err());
        assert!("maX".parse::<MetricKind>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for kind in [
            MetricKind::Close,
            MetricKind::Summary,
            MetricKind::DailyChangePct,
            MetricKind::MovingAverage { window: 14 },
        ] {
            assert_eq!(kind.to_string().parse::<MetricKind>().unwrap(), kind);
        }
    }
}
