//! Derived metrics over a close-price series.
//!
//! All functions take a date-ordered (date, close) slice, are pure, and never
//! touch the observation store. Positions with no defined value carry an
//! explicit `None`, never a zero or a partial average.

use chrono::NaiveDate;

use super::metrics_errors::{MetricsError, Result};
use super::metrics_model::{ClosePoint, MetricKind, MetricPoint, MetricResult, SeriesSummary};

/// Identity projection of the (date, close) series
pub fn close_points(series: &[(NaiveDate, f64)]) -> Vec<ClosePoint> {
    series
        .iter()
        .map(|&(date, close)| ClosePoint { date, close })
        .collect()
}

/// Single-pass min/max/average.
///
/// Min and max report the first date at which the value occurs. Errors on an
/// empty series, where all three are undefined.
pub fn summarize(series: &[(NaiveDate, f64)]) -> Result<SeriesSummary> {
    let (&(first_date, first_close), rest) = series.split_first().ok_or_else(|| {
        MetricsError::EmptySeries("min/max/average are undefined".to_string())
    })?;

    let mut summary = SeriesSummary {
        min: first_close,
        min_date: first_date,
        max: first_close,
        max_date: first_date,
        average: 0.0,
    };

    let mut sum = first_close;
    for &(date, close) in rest {
        if close < summary.min {
            summary.min = close;
            summary.min_date = date;
        }
        if close > summary.max {
            summary.max = close;
            summary.max_date = date;
        }
        sum += close;
    }

    summary.average = sum / series.len() as f64;
    Ok(summary)
}

/// Day-over-day percentage change.
///
/// The first date has no predecessor and a zero predecessor makes the ratio
/// undefined; both yield `None` rather than a fault.
pub fn daily_change_pct(series: &[(NaiveDate, f64)]) -> Vec<MetricPoint> {
    series
        .iter()
        .enumerate()
        .map(|(i, &(date, close))| {
            let value = if i == 0 {
                None
            } else {
                let prev = series[i - 1].1;
                if prev == 0.0 {
                    None
                } else {
                    Some((close - prev) / prev * 100.0)
                }
            };
            MetricPoint { date, value }
        })
        .collect()
}

/// Moving average over `window` closes ending at each index.
///
/// Positions with fewer than `window` values available yield `None`. Defined
/// values are rounded to `precision` decimal places (0 = integer rounding,
/// the default used by the API layer).
pub fn moving_average(
    series: &[(NaiveDate, f64)],
    window: u32,
    precision: u32,
) -> Vec<MetricPoint> {
    let window = window as usize;
    let factor = 10f64.powi(precision as i32);

    series
        .iter()
        .enumerate()
        .map(|(i, &(date, _))| {
            let value = if window == 0 || i + 1 < window {
                None
            } else {
                let sum: f64 = series[i + 1 - window..=i].iter().map(|&(_, c)| c).sum();
                Some((sum / window as f64 * factor).round() / factor)
            };
            MetricPoint { date, value }
        })
        .collect()
}

/// Dispatches a metric kind to its calculator
pub fn compute(
    kind: MetricKind,
    series: &[(NaiveDate, f64)],
    ma_precision: u32,
) -> Result<MetricResult> {
    match kind {
        MetricKind::Close => Ok(MetricResult::Close {
            points: close_points(series),
        }),
        MetricKind::Summary => Ok(MetricResult::Summary {
            summary: summarize(series)?,
        }),
        MetricKind::DailyChangePct => Ok(MetricResult::DailyChangePct {
            points: daily_change_pct(series),
        }),
        MetricKind::MovingAverage { window } => Ok(MetricResult::MovingAverage {
            window,
            points: moving_average(series, window, ma_precision),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn series(values: &[f64]) -> Vec<(NaiveDate, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (d(i as u32 + 1), v))
            .collect()
    }

    #[test]
    fn test_close_points_is_identity() {
        let input = series(&[100.0, 101.5]);
        let points = close_points(&input);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, d(1));
        assert_eq!(points[0].close, 100.0);
        assert_eq!(points[1].close, 101.5);
    }

    #[test]
    fn test_summarize_min_max_average() {
        let summary = summarize(&series(&[100.0, 80.0, 120.0])).unwrap();
        assert_eq!(summary.min, 80.0);
        assert_eq!(summary.min_date, d(2));
        assert_eq!(summary.max, 120.0);
        assert_eq!(summary.max_date, d(3));
        assert_eq!(summary.average, 100.0);
    }

    #[test]
    fn test_summarize_reports_first_occurrence() {
        let summary = summarize(&series(&[80.0, 80.0, 120.0, 120.0])).unwrap();
        assert_eq!(summary.min_date, d(1));
        assert_eq!(summary.max_date, d(3));
    }

    #[test]
    fn test_summarize_empty_series_errors() {
        assert!(matches!(
            summarize(&[]),
            Err(MetricsError::EmptySeries(_))
        ));
    }

    #[test]
    fn test_daily_change_first_element_undefined() {
        let changes = daily_change_pct(&series(&[100.0, 110.0]));
        assert_eq!(changes[0].value, None);
        assert_eq!(changes[1].value, Some(10.0));
    }

    #[test]
    fn test_daily_change_zero_predecessor_undefined() {
        let changes = daily_change_pct(&series(&[100.0, 0.0, 50.0]));
        assert_eq!(changes[1].value, Some(-100.0));
        // 50 against a zero close has no defined change
        assert_eq!(changes[2].value, None);
    }

    #[test]
    fn test_daily_change_empty_series() {
        assert!(daily_change_pct(&[]).is_empty());
    }

    #[test]
    fn test_moving_average_window_longer_than_series() {
        let points = moving_average(&series(&[10.0, 11.0, 12.0]), 7, 0);
        assert!(points.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn test_moving_average_windowed_means() {
        let points = moving_average(&series(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]), 3, 0);
        assert_eq!(points[0].value, None);
        assert_eq!(points[1].value, None);
        assert_eq!(points[2].value, Some(11.0)); // (10+11+12)/3
        assert_eq!(points[3].value, Some(12.0));
        assert_eq!(points[4].value, Some(13.0));
        assert_eq!(points[5].value, Some(14.0));
    }

    #[test]
    fn test_moving_average_integer_rounding_default() {
        let points = moving_average(&series(&[10.0, 11.0]), 2, 0);
        // (10 + 11) / 2 = 10.5 rounds away from zero
        assert_eq!(points[1].value, Some(11.0));
    }

    #[test]
    fn test_moving_average_configurable_precision() {
        let points = moving_average(&series(&[10.0, 11.0, 11.0]), 3, 2);
        assert_eq!(points[2].value, Some(10.67));
    }

    #[test]
    fn test_moving_average_dates_follow_input() {
        let points = moving_average(&series(&[10.0, 11.0, 12.0]), 2, 0);
        assert_eq!(points[0].date, d(1));
        assert_eq!(points[2].date, d(3));
    }

    #[test]
    fn test_compute_dispatch_matches_kind() {
        let input = series(&[100.0, 110.0]);
        assert!(matches!(
            compute(MetricKind::Close, &input, 0).unwrap(),
            MetricResult::Close { .. }
        ));
        assert!(matches!(
            compute(MetricKind::Summary, &input, 0).unwrap(),
            MetricResult::Summary { .. }
        ));
        assert!(matches!(
            compute(MetricKind::DailyChangePct, &input, 0).unwrap(),
            MetricResult::DailyChangePct { .. }
        ));
        assert!(matches!(
            compute(MetricKind::MA_WEEK, &input, 0).unwrap(),
            MetricResult::MovingAverage { window: 7, .. }
        ));
    }

    #[test]
    fn test_compute_summary_on_empty_series_errors() {
        assert!(compute(MetricKind::Summary, &[], 0).is_err());
    }
}
