//! Period-over-period comparison.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use dataset::{Dataset, DatasetFilter};

/// Named reporting period, resolved against the dataset's latest date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisPeriod {
    ThisWeek,
    ThisMonth,
    ThisYear,
    Last30Days,
    Last90Days,
    PreviousWeek,
    PreviousMonth,
    PreviousYear,
    Previous30Days,
    Previous90Days,
}

impl AnalysisPeriod {
    /// Inclusive date range of the period, anchored at `anchor` (normally
    /// the dataset's latest date).
    ///
    /// Rolling windows are exact: `Last30Days` covers thirty dates ending
    /// at the anchor and `Previous30Days` the thirty dates immediately
    /// before them, abutting without overlap.
    pub fn date_range(&self, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
        let week_start = anchor - Duration::days(anchor.weekday().num_days_from_monday() as i64);
        match self {
            AnalysisPeriod::ThisWeek => (week_start, anchor),
            AnalysisPeriod::ThisMonth => (anchor.with_day(1).expect("day 1 is valid"), anchor),
            AnalysisPeriod::ThisYear => (
                NaiveDate::from_ymd_opt(anchor.year(), 1, 1).expect("jan 1 is valid"),
                anchor,
            ),
            AnalysisPeriod::Last30Days => (anchor - Duration::days(29), anchor),
            AnalysisPeriod::Last90Days => (anchor - Duration::days(89), anchor),
            AnalysisPeriod::PreviousWeek => {
                (week_start - Duration::days(7), week_start - Duration::days(1))
            }
            AnalysisPeriod::PreviousMonth => {
                let this_month_start = anchor.with_day(1).expect("day 1 is valid");
                let previous_end = this_month_start - Duration::days(1);
                (
                    previous_end.with_day(1).expect("day 1 is valid"),
                    previous_end,
                )
            }
            AnalysisPeriod::PreviousYear => (
                NaiveDate::from_ymd_opt(anchor.year() - 1, 1, 1).expect("jan 1 is valid"),
                NaiveDate::from_ymd_opt(anchor.year() - 1, 12, 31).expect("dec 31 is valid"),
            ),
            AnalysisPeriod::Previous30Days => {
                (anchor - Duration::days(59), anchor - Duration::days(30))
            }
            AnalysisPeriod::Previous90Days => {
                (anchor - Duration::days(179), anchor - Duration::days(90))
            }
        }
    }
}

/// Metrics of one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub total_revenue: f64,
    pub mean_revenue: f64,
    pub transaction_count: usize,
}

impl PeriodMetrics {
    fn of(dataset: &Dataset) -> Self {
        let count = dataset.len();
        let total: f64 = dataset.records().iter().map(|tx| tx.revenue).sum();
        Self {
            total_revenue: total,
            mean_revenue: if count > 0 { total / count as f64 } else { 0.0 },
            transaction_count: count,
        }
    }
}

/// Two periods side by side with percent changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub current: PeriodMetrics,
    pub previous: PeriodMetrics,
    pub current_range: (NaiveDate, NaiveDate),
    pub previous_range: (NaiveDate, NaiveDate),
    /// Percent changes; a zero baseline reports 0 rather than a fault
    pub revenue_change_pct: f64,
    pub mean_change_pct: f64,
    pub transaction_change_pct: f64,
}

/// Compare two named periods over the dataset.
///
/// `None` when the dataset is empty (no anchor date to resolve against).
pub fn compare_periods(
    dataset: &Dataset,
    current: AnalysisPeriod,
    previous: AnalysisPeriod,
) -> Option<PeriodComparison> {
    let anchor = dataset.max_date()?;
    let current_range = current.date_range(anchor);
    let previous_range = previous.date_range(anchor);
    debug!(?current_range, ?previous_range, "comparing periods");

    let current_metrics = PeriodMetrics::of(
        &dataset.filtered(&DatasetFilter::new().date_range(current_range.0, current_range.1)),
    );
    let previous_metrics = PeriodMetrics::of(
        &dataset.filtered(&DatasetFilter::new().date_range(previous_range.0, previous_range.1)),
    );

    Some(PeriodComparison {
        revenue_change_pct: percent_change(
            current_metrics.total_revenue,
            previous_metrics.total_revenue,
        ),
        mean_change_pct: percent_change(
            current_metrics.mean_revenue,
            previous_metrics.mean_revenue,
        ),
        transaction_change_pct: percent_change(
            current_metrics.transaction_count as f64,
            previous_metrics.transaction_count as f64,
        ),
        current: current_metrics,
        previous: previous_metrics,
        current_range,
        previous_range,
    })
}

fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::RawTable;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rolling_windows_abut() {
        let anchor = date(2024, 6, 15);
        let (last_start, last_end) = AnalysisPeriod::Last30Days.date_range(anchor);
        let (prev_start, prev_end) = AnalysisPeriod::Previous30Days.date_range(anchor);

        assert_eq!(last_end, anchor);
        assert_eq!((last_end - last_start).num_days(), 29);
        assert_eq!((prev_end - prev_start).num_days(), 29);
        assert_eq!(prev_end + Duration::days(1), last_start);
    }

    #[test]
    fn test_week_ranges() {
        // 2024-06-12 is a Wednesday
        let anchor = date(2024, 6, 12);
        let (start, end) = AnalysisPeriod::ThisWeek.date_range(anchor);
        assert_eq!(start, date(2024, 6, 10));
        assert_eq!(end, anchor);

        let (prev_start, prev_end) = AnalysisPeriod::PreviousWeek.date_range(anchor);
        assert_eq!(prev_start, date(2024, 6, 3));
        assert_eq!(prev_end, date(2024, 6, 9));
    }

    #[test]
    fn test_month_ranges() {
        let anchor = date(2024, 3, 14);
        assert_eq!(
            AnalysisPeriod::ThisMonth.date_range(anchor),
            (date(2024, 3, 1), anchor)
        );
        assert_eq!(
            AnalysisPeriod::PreviousMonth.date_range(anchor),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
    }

    #[test]
    fn test_year_ranges() {
        let anchor = date(2024, 3, 14);
        assert_eq!(
            AnalysisPeriod::ThisYear.date_range(anchor),
            (date(2024, 1, 1), anchor)
        );
        assert_eq!(
            AnalysisPeriod::PreviousYear.date_range(anchor),
            (date(2023, 1, 1), date(2023, 12, 31))
        );
    }

    fn dataset(rows: &[(&str, &str)]) -> Dataset {
        let mut table = RawTable::new(vec!["date", "product_id", "quantity", "revenue"]);
        for &(day, revenue) in rows {
            table
                .push_row(vec![day, "SKU-1", "1", revenue])
                .unwrap();
        }
        Dataset::from_table(&table).unwrap()
    }

    #[test]
    fn test_compare_periods() {
        let ds = dataset(&[
            ("2024-05-20", "100.0"),
            ("2024-06-02", "150.0"),
            ("2024-06-10", "150.0"),
        ]);
        let comparison = compare_periods(
            &ds,
            AnalysisPeriod::ThisMonth,
            AnalysisPeriod::PreviousMonth,
        )
        .unwrap();

        assert_eq!(comparison.current.total_revenue, 300.0);
        assert_eq!(comparison.previous.total_revenue, 100.0);
        assert!((comparison.revenue_change_pct - 200.0).abs() < 1e-10);
        assert_eq!(comparison.current.transaction_count, 2);
    }

    #[test]
    fn test_zero_baseline_reports_zero_change() {
        let ds = dataset(&[("2024-06-10", "150.0")]);
        let comparison = compare_periods(
            &ds,
            AnalysisPeriod::ThisMonth,
            AnalysisPeriod::PreviousMonth,
        )
        .unwrap();

        assert_eq!(comparison.previous.total_revenue, 0.0);
        assert_eq!(comparison.revenue_change_pct, 0.0);
    }

    #[test]
    fn test_empty_dataset_has_no_anchor() {
        let ds = dataset(&[]);
        assert!(compare_periods(
            &ds,
            AnalysisPeriod::Last30Days,
            AnalysisPeriod::Previous30Days
        )
        .is_none());
    }
}
