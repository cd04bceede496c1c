//! Trailing simple moving averages and the price/average ratio ("multiple").
//!
//! `compute_moving_average` produces the headline Mayer Multiple for the latest
//! price; `ratio_series` slides the same window across the whole history so the
//! multiple can be charted over time.

use crate::core::error::MetricsError;
use crate::core::series::{PricePoint, PriceSeries};
use chrono::NaiveDate;
use serde::Serialize;
use std::slice::Windows;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MovingAverageResult {
    pub average: f64,
    pub current_price: f64,
    pub multiple: f64,
}

impl MovingAverageResult {
    /// The multiple as it is displayed, with two decimals.
    pub fn formatted_multiple(&self) -> String {
        format!("{:.2}", self.multiple)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioSeriesPoint {
    pub date: NaiveDate,
    pub ratio: f64,
}

impl RatioSeriesPoint {
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

fn mean_price(points: &[PricePoint]) -> f64 {
    points.iter().map(|p| p.price).sum::<f64>() / points.len() as f64
}

/// Computes the trailing average over the last `window` prices and the ratio of
/// the latest price to it.
///
/// When the series is shorter than `window` the average covers every point, so
/// short histories still produce a (less smoothed) multiple.
pub fn compute_moving_average(
    series: &PriceSeries,
    window: usize,
) -> Result<MovingAverageResult, MetricsError> {
    if window == 0 {
        return Err(MetricsError::InvalidWindow);
    }
    let points = series.points();
    let current = points.last().ok_or(MetricsError::EmptySeries)?;

    let start = points.len().saturating_sub(window);
    let average = mean_price(&points[start..]);
    if average == 0.0 {
        return Err(MetricsError::DivisionByZero);
    }

    Ok(MovingAverageResult {
        average,
        current_price: current.price,
        multiple: current.price / average,
    })
}

/// Lazy sequence of windowed ratios over a borrowed series.
///
/// Each call to [`ratio_series`] starts a fresh pass; nothing is cached between
/// passes.
pub struct RatioSeries<'a> {
    windows: Windows<'a, PricePoint>,
}

impl Iterator for RatioSeries<'_> {
    type Item = Result<RatioSeriesPoint, MetricsError>;

    fn next(&mut self) -> Option<Self::Item> {
        let window = self.windows.next()?;
        // windows() never yields an empty slice
        let last = window[window.len() - 1];
        let average = mean_price(window);
        if average == 0.0 {
            return Some(Err(MetricsError::DivisionByZero));
        }
        Some(Ok(RatioSeriesPoint {
            date: last.timestamp.date_naive(),
            ratio: last.price / average,
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.windows.size_hint()
    }
}

impl ExactSizeIterator for RatioSeries<'_> {}

/// Slides a `window`-point average across `series`.
///
/// Indices without a full trailing window are skipped, so the sequence has
/// `max(0, len - window + 1)` points.
pub fn ratio_series(series: &PriceSeries, window: usize) -> Result<RatioSeries<'_>, MetricsError> {
    if window == 0 {
        return Err(MetricsError::InvalidWindow);
    }
    Ok(RatioSeries {
        windows: series.points().windows(window),
    })
}

/// Collects [`ratio_series`], failing on the first zero-average window.
pub fn build_ratio_series(
    series: &PriceSeries,
    window: usize,
) -> Result<Vec<RatioSeriesPoint>, MetricsError> {
    ratio_series(series, window)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn series_of(prices: &[f64]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| PricePoint::new(start + Duration::days(i as i64), *p))
            .collect()
    }

    #[test]
    fn test_moving_average_full_window() {
        let series = series_of(&[100.0, 200.0]);
        let result = compute_moving_average(&series, 2).unwrap();

        assert_eq!(result.average, 150.0);
        assert_eq!(result.current_price, 200.0);
        assert!((result.multiple - 1.3333).abs() < 0.0001);
        assert_eq!(result.formatted_multiple(), "1.33");
    }

    #[test]
    fn test_moving_average_uses_only_trailing_window() {
        let series = series_of(&[1000.0, 10.0, 20.0, 30.0]);
        let result = compute_moving_average(&series, 3).unwrap();

        assert_eq!(result.average, 20.0);
        assert_eq!(result.multiple, 1.5);
    }

    #[test]
    fn test_moving_average_short_history_uses_all_points() {
        let series = series_of(&[42_000.0]);
        let result = compute_moving_average(&series, 200).unwrap();

        assert_eq!(result.average, 42_000.0);
        assert_eq!(result.multiple, 1.0);

        let series = series_of(&[10.0, 20.0, 30.0]);
        let result = compute_moving_average(&series, 200).unwrap();
        assert_eq!(result.average, 20.0);
    }

    #[test]
    fn test_moving_average_errors() {
        assert_eq!(
            compute_moving_average(&PriceSeries::default(), 200),
            Err(MetricsError::EmptySeries)
        );
        assert_eq!(
            compute_moving_average(&series_of(&[0.0, 0.0]), 2),
            Err(MetricsError::DivisionByZero)
        );
        assert_eq!(
            compute_moving_average(&series_of(&[1.0]), 0),
            Err(MetricsError::InvalidWindow)
        );
    }

    #[test]
    fn test_moving_average_is_repeatable() {
        let series = series_of(&[3.1, 2.7, 9.4, 1.1, 5.9]);
        let first = compute_moving_average(&series, 3).unwrap();
        let second = compute_moving_average(&series, 3).unwrap();
        assert_eq!(first.multiple.to_bits(), second.multiple.to_bits());
        assert_eq!(first.average.to_bits(), second.average.to_bits());
    }

    #[test]
    fn test_ratio_series_length() {
        let prices: Vec<f64> = (1..=60).map(f64::from).collect();
        let series = series_of(&prices);

        let points = build_ratio_series(&series, 50).unwrap();
        assert_eq!(points.len(), 11);
        assert_eq!(ratio_series(&series, 50).unwrap().len(), 11);

        assert!(build_ratio_series(&series, 61).unwrap().is_empty());
        assert_eq!(build_ratio_series(&series, 1).unwrap().len(), 60);
    }

    #[test]
    fn test_ratio_series_values_and_dates() {
        let series = series_of(&[10.0, 20.0, 30.0, 60.0]);
        let points = build_ratio_series(&series, 2).unwrap();

        assert_eq!(points.len(), 3);
        assert!((points[0].ratio - 20.0 / 15.0).abs() < 1e-12);
        assert!((points[1].ratio - 30.0 / 25.0).abs() < 1e-12);
        assert!((points[2].ratio - 60.0 / 45.0).abs() < 1e-12);
        assert_eq!(points[0].date_label(), "2024-01-02");
        assert_eq!(points[2].date_label(), "2024-01-04");
    }

    #[test]
    fn test_ratio_series_matches_headline_multiple_at_last_point() {
        let series = series_of(&[5.0, 7.0, 6.0, 8.0, 9.0, 4.0]);
        let headline = compute_moving_average(&series, 4).unwrap();
        let last = *build_ratio_series(&series, 4).unwrap().last().unwrap();
        assert!((headline.multiple - last.ratio).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_series_is_restartable() {
        let series = series_of(&[1.0, 2.0, 3.0, 4.0]);
        let first: Vec<_> = ratio_series(&series, 2).unwrap().collect();
        let second: Vec<_> = ratio_series(&series, 2).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ratio_series_zero_window_average() {
        let series = series_of(&[1.0, 0.0, 0.0, 2.0]);
        let mut iter = ratio_series(&series, 2).unwrap();

        assert!(iter.next().unwrap().is_ok());
        assert_eq!(iter.next(), Some(Err(MetricsError::DivisionByZero)));
        assert_eq!(
            build_ratio_series(&series, 2),
            Err(MetricsError::DivisionByZero)
        );
    }

    #[test]
    fn test_ratio_series_rejects_zero_window() {
        let series = series_of(&[1.0]);
        assert!(matches!(
            ratio_series(&series, 0),
            Err(MetricsError::InvalidWindow)
        ));
    }
}
