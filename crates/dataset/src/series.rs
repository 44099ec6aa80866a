//! Date-indexed revenue series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Revenue aggregated per calendar day, date-ascending.
///
/// This is the input shape shared by the time-series and forecast engines:
/// one point per distinct date, ordered, with no gap filling; engines that
/// care about gaps handle them explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    points: Vec<(NaiveDate, f64)>,
}

impl DailySeries {
    /// Sum values per day from arbitrary (date, value) pairs.
    pub fn aggregate<I: IntoIterator<Item = (NaiveDate, f64)>>(items: I) -> Self {
        let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (date, value) in items {
            *by_day.entry(date).or_insert(0.0) += value;
        }
        Self {
            points: by_day.into_iter().collect(),
        }
    }

    /// Build from already-aggregated, date-ascending points.
    pub fn from_points(points: Vec<(NaiveDate, f64)>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
        Self { points }
    }

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values in date order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    /// Dates in ascending order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|(d, _)| *d).collect()
    }

    /// Last observed date, `None` when empty.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|(d, _)| *d)
    }
}
