//! # salecast
//!
//! Top-level facade over the sales-analytics computation core. One crate to
//! depend on: the dataset contract, the RFM segmentation engine, the
//! time-series engine, both forecast models, the inventory heuristics, and
//! the descriptive insights, plus the glue that runs them together over one
//! dataset.
//!
//! The core is stateless: every function is a pure computation over the
//! dataset it is handed. Filtering, rendering, and persistence belong to
//! the caller.
//!
//! ## Example
//!
//! ```rust
//! use salecast::prelude::*;
//!
//! let mut table = RawTable::new(vec!["date", "product_id", "quantity", "revenue"]);
//! for day in 1..=28 {
//!     table
//!         .push_row(vec![
//!             format!("2024-01-{day:02}"),
//!             "SKU-1".to_string(),
//!             "2".to_string(),
//!             format!("{}", 100 + day * 3),
//!         ])
//!         .unwrap();
//! }
//!
//! let ds = Dataset::from_table(&table).unwrap();
//! let report = salecast::analyze(&ds, &AnalyticsParams::default());
//!
//! assert_eq!(report.series.points.len(), 28);
//! assert!(report.rfm.is_none()); // no customer ids in this dataset
//! ```

pub use dataset::{
    DailySeries, Dataset, DatasetError, DatasetFilter, RawTable, Schema, Transaction,
};
pub use forecast_facade::{
    AutoArima, AutoArimaConfig, Bounds, Forecast, ForecastError, ForecastModel,
    SeasonalTrendConfig, SeasonalTrendModel,
};
pub use insights::{CategoryAnalysis, ProductRank, SummaryKpis};
pub use inventory::{ProductStats, StockPolicy, StockStatus};
pub use segmentation::{RfmRecord, Segment};
pub use timeseries::TimeSeriesAnalysis;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Convenient single import for callers.
pub mod prelude {
    pub use crate::{
        analyze, forecast_sales, AnalyticsParams, AnalyticsReport, Dataset, DatasetFilter,
        ForecastBundle, RawTable,
    };
    pub use forecast_facade::ForecastModel;
}

/// Default forecast horizon in days.
pub const DEFAULT_HORIZON: usize = 30;

/// Parameters of a full analytics run. Everything is explicit; there is no
/// process-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsParams {
    /// Number of future days to forecast
    pub horizon: usize,
    pub seasonal: SeasonalTrendConfig,
    pub arima: AutoArimaConfig,
    pub stock_policy: StockPolicy,
    /// Number of rows in the product ranking
    pub top_products: usize,
}

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            seasonal: SeasonalTrendConfig::default(),
            arima: AutoArimaConfig::default(),
            stock_policy: StockPolicy::default(),
            top_products: 10,
        }
    }
}

/// Both demand forecasts over one daily series.
///
/// The models are independent; disagreement between them is information,
/// not an error, and nothing here reconciles them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    /// Model A: fitted values plus horizon, with uncertainty bounds
    pub seasonal_trend: Forecast,
    /// Model B: point predictions for the horizon only
    pub auto_arima: Forecast,
    /// Last observed date; Model B's first value lands one day after
    pub anchor_date: NaiveDate,
}

impl ForecastBundle {
    /// Real dates of the horizon, starting the day after the anchor.
    pub fn future_dates(&self) -> Vec<NaiveDate> {
        (1..=self.auto_arima.values.len() as i64)
            .map(|offset| self.anchor_date + Duration::days(offset))
            .collect()
    }
}

/// Fit both forecast models on a daily revenue series.
///
/// Fails closed when either model cannot produce a usable fit; the error
/// names the model's problem and leaves every other engine unaffected.
pub fn forecast_sales(
    series: &DailySeries,
    horizon: usize,
    seasonal: SeasonalTrendConfig,
    arima: AutoArimaConfig,
) -> Result<ForecastBundle, ForecastError> {
    let anchor_date = series
        .last_date()
        .ok_or(ForecastError::InsufficientData {
            required: 2,
            actual: 0,
        })?;
    let values = series.values();

    let mut model_a = SeasonalTrendModel::new(seasonal);
    model_a.fit(&values)?;
    let seasonal_trend = model_a.predictions_with_history(horizon)?;

    let mut model_b = AutoArima::new(arima);
    model_b.fit(&values)?;
    let auto_arima = model_b.forecast(horizon)?;

    Ok(ForecastBundle {
        seasonal_trend,
        auto_arima,
        anchor_date,
    })
}

/// Everything the report assembler consumes.
#[derive(Debug, Clone)]
pub struct AnalyticsReport {
    pub summary: SummaryKpis,
    /// `None` when the dataset carries no customer ids
    pub rfm: Option<Vec<RfmRecord>>,
    pub series: TimeSeriesAnalysis,
    /// A model-fit failure is fatal to the forecast only; the rest of the
    /// report stays usable
    pub forecast: Result<ForecastBundle, ForecastError>,
    pub inventory: Vec<ProductStats>,
    /// `None` when the dataset carries no categories
    pub categories: Option<CategoryAnalysis>,
    pub top_products: Vec<ProductRank>,
}

/// Run every engine over one dataset.
///
/// The engines are independent; any of them can also be called on its own
/// through the underlying crates; this is the convenience wiring for
/// callers that want the whole report.
pub fn analyze(dataset: &Dataset, params: &AnalyticsParams) -> AnalyticsReport {
    let daily = dataset.daily_revenue();

    let rfm = if dataset.has_customers() {
        Some(segmentation::analyze(dataset))
    } else {
        None
    };

    let forecast = forecast_sales(&daily, params.horizon, params.seasonal, params.arima);
    if let Err(error) = &forecast {
        warn!(%error, "forecast unavailable for this dataset");
    }

    AnalyticsReport {
        summary: insights::summarize(dataset),
        rfm,
        series: timeseries::analyze(&daily),
        forecast,
        inventory: inventory::analyze_with_policy(dataset, &params.stock_policy),
        categories: insights::analyze_categories(dataset),
        top_products: insights::top_products(dataset, params.top_products),
    }
}
