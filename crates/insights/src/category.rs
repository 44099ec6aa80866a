//! Category-level metrics and growth.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use dataset::Dataset;

/// Aggregate metrics for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetrics {
    pub category: String,
    pub total_revenue: f64,
    pub mean_revenue: f64,
    pub transaction_count: usize,
    pub total_quantity: f64,
}

/// Revenue of one category in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGrowthPoint {
    pub category: String,
    /// First day of the month
    pub month: NaiveDate,
    pub revenue: f64,
    /// Percent change vs. the category's previous month; `None` for the
    /// first month and after a zero-revenue month
    pub growth_pct: Option<f64>,
}

/// Category analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    /// Per-category aggregates, category-ascending
    pub metrics: Vec<CategoryMetrics>,
    /// Month-over-month revenue per category, (category, month)-ascending
    pub monthly_growth: Vec<CategoryGrowthPoint>,
}

/// Analyze categories; `None` when the dataset carries no category at all
/// (the engine is skipped, mirroring the optional column).
pub fn analyze_categories(dataset: &Dataset) -> Option<CategoryAnalysis> {
    if !dataset.has_categories() {
        return None;
    }

    let mut totals: BTreeMap<&str, (f64, usize, f64)> = BTreeMap::new();
    let mut monthly: BTreeMap<(&str, NaiveDate), f64> = BTreeMap::new();
    for tx in dataset.records() {
        let category = match &tx.category {
            Some(c) => c.as_str(),
            None => continue,
        };
        let entry = totals.entry(category).or_insert((0.0, 0, 0.0));
        entry.0 += tx.revenue;
        entry.1 += 1;
        entry.2 += tx.quantity;

        *monthly.entry((category, month_of(tx.date()))).or_insert(0.0) += tx.revenue;
    }

    let metrics = totals
        .into_iter()
        .map(|(category, (revenue, count, quantity))| CategoryMetrics {
            category: category.to_string(),
            total_revenue: revenue,
            mean_revenue: revenue / count as f64,
            transaction_count: count,
            total_quantity: quantity,
        })
        .collect();

    // BTreeMap iteration groups categories together month-ascending, so the
    // previous entry of the same category is the previous month.
    let mut monthly_growth: Vec<CategoryGrowthPoint> = Vec::with_capacity(monthly.len());
    let mut previous: Option<(&str, f64)> = None;
    for ((category, month), revenue) in monthly {
        let growth_pct = match previous {
            Some((prev_category, prev_revenue))
                if prev_category == category && prev_revenue != 0.0 =>
            {
                Some((revenue - prev_revenue) / prev_revenue * 100.0)
            }
            _ => None,
        };
        monthly_growth.push(CategoryGrowthPoint {
            category: category.to_string(),
            month,
            revenue,
            growth_pct,
        });
        previous = Some((category, revenue));
    }

    Some(CategoryAnalysis {
        metrics,
        monthly_growth,
    })
}

fn month_of(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("first of month is valid")
}
