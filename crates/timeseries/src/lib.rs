//! # timeseries
//!
//! Daily sales-series analysis: per-day revenue with 7- and 30-point
//! trailing moving averages, period-over-period growth, and an optional
//! additive seasonal decomposition at monthly periodicity.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dataset::DailySeries;
//! use timeseries::analyze;
//!
//! let points: Vec<(NaiveDate, f64)> = (1..=10)
//!     .map(|day| {
//!         (NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), 100.0 + day as f64)
//!     })
//!     .collect();
//! let analysis = analyze(&DailySeries::from_points(points));
//!
//! assert_eq!(analysis.points.len(), 10);
//! assert!(analysis.points[0].ma7.is_none());
//! assert!(analysis.points[9].ma7.is_some());
//! ```

pub mod decomposition;
pub mod growth;
pub mod moving_average;

pub use decomposition::{decompose_additive, Decomposition};
pub use growth::growth_rates;
pub use moving_average::trailing_mean;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dataset::DailySeries;

/// Short moving-average window (one week of daily data).
pub const MA_SHORT_WINDOW: usize = 7;
/// Long moving-average window (one month of daily data).
pub const MA_LONG_WINDOW: usize = 30;
/// Decomposition periodicity: roughly monthly seasonality in daily data.
pub const SEASONAL_PERIOD: usize = 30;

/// One analyzed point of the daily series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub revenue: f64,
    /// 7-point trailing mean, `None` for the first six points
    pub ma7: Option<f64>,
    /// 30-point trailing mean, `None` for the first twenty-nine points
    pub ma30: Option<f64>,
    /// Percent change vs. the previous point, `None` at the start and after
    /// a zero-revenue day
    pub growth_pct: Option<f64>,
}

/// Full time-series analysis of a daily revenue series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesAnalysis {
    pub points: Vec<SeriesPoint>,
    /// Absent when the series is shorter than two seasonal cycles
    pub decomposition: Option<Decomposition>,
}

/// Analyze a daily series with the default monthly seasonal period.
pub fn analyze(series: &DailySeries) -> TimeSeriesAnalysis {
    analyze_with_period(series, SEASONAL_PERIOD)
}

/// Analyze a daily series, decomposing at an explicit periodicity.
pub fn analyze_with_period(series: &DailySeries, period: usize) -> TimeSeriesAnalysis {
    let values = series.values();
    let ma7 = trailing_mean(&values, MA_SHORT_WINDOW);
    let ma30 = trailing_mean(&values, MA_LONG_WINDOW);
    let growth = growth_rates(&values);

    let points = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, (date, revenue))| SeriesPoint {
            date: *date,
            revenue: *revenue,
            ma7: ma7[i],
            ma30: ma30[i],
            growth_pct: growth[i],
        })
        .collect();

    TimeSeriesAnalysis {
        points,
        decomposition: decompose_additive(&values, period),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_series(days: usize, revenue: f64) -> DailySeries {
        let points: Vec<(NaiveDate, f64)> = (0..days)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64);
                (date, revenue)
            })
            .collect();
        DailySeries::from_points(points)
    }

    #[test]
    fn test_flat_forty_day_series() {
        // 40 daily rows at a flat 100: growth is 0% everywhere after the
        // first point, and decomposition is skipped (40 < 60).
        let analysis = analyze(&flat_series(40, 100.0));

        assert_eq!(analysis.points.len(), 40);
        assert_eq!(analysis.points[0].growth_pct, None);
        for point in &analysis.points[1..] {
            assert_eq!(point.growth_pct, Some(0.0));
        }
        assert!(analysis.decomposition.is_none());
    }

    #[test]
    fn test_flat_series_long_enough_decomposes_to_nothing() {
        let analysis = analyze(&flat_series(60, 100.0));
        let decomposition = analysis.decomposition.unwrap();
        assert!(decomposition.seasonal.iter().all(|s| s.abs() < 1e-9));
        assert!(decomposition
            .trend
            .iter()
            .all(|t| (t - 100.0).abs() < 1e-9));
    }

    #[test]
    fn test_moving_average_defined_counts() {
        let analysis = analyze(&flat_series(10, 50.0));
        let ma7_defined = analysis.points.iter().filter(|p| p.ma7.is_some()).count();
        assert_eq!(ma7_defined, 4);
        assert!(analysis.points.iter().all(|p| p.ma30.is_none()));
    }

    #[test]
    fn test_empty_series() {
        let analysis = analyze(&DailySeries::default());
        assert!(analysis.points.is_empty());
        assert!(analysis.decomposition.is_none());
    }
}
