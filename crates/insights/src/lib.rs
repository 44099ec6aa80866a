//! # insights
//!
//! Descriptive sales analytics feeding the report and dashboard layers:
//! category metrics with month-over-month growth, comparison of named
//! reporting periods, product rankings, and headline KPIs.
//!
//! Everything here is pure computation over a validated
//! [`dataset::Dataset`]; rendering belongs to the callers.

pub mod category;
pub mod comparison;
pub mod summary;

pub use category::{analyze_categories, CategoryAnalysis, CategoryGrowthPoint, CategoryMetrics};
pub use comparison::{compare_periods, AnalysisPeriod, PeriodComparison, PeriodMetrics};
pub use summary::{summarize, top_products, ProductRank, SummaryKpis};
