//! # inventory
//!
//! Per-product demand statistics and stock-reorder heuristics.
//!
//! Safety stock and reorder point are fixed-multiplier heuristics, not
//! service-level formulas; the multipliers live in [`StockPolicy`] so a
//! deployment can tune them without code changes.
//!
//! ## Example
//!
//! ```rust
//! use dataset::{Dataset, RawTable};
//! use inventory::{analyze, StockStatus};
//!
//! let mut table = RawTable::new(vec!["date", "product_id", "quantity", "revenue"]);
//! for day in 1..=10 {
//!     let date = format!("2024-01-{day:02}");
//!     table.push_row(vec![date, "SKU-1".into(), "1".into(), "10.0".into()]).unwrap();
//! }
//!
//! let stats = analyze(&Dataset::from_table(&table).unwrap());
//! assert_eq!(stats[0].safety_stock, 2.0);
//! assert_eq!(stats[0].status, StockStatus::HighStock);
//! ```

pub mod policy;

pub use policy::StockPolicy;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use dataset::Dataset;

/// Three-way stock classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    HighStock,
    ReorderRequired,
    NormalStock,
}

impl StockStatus {
    /// Display label used by report and UI layers.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::HighStock => "High Stock",
            StockStatus::ReorderRequired => "Reorder Required",
            StockStatus::NormalStock => "Normal Stock",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Demand statistics and reorder heuristics for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStats {
    pub product: String,
    pub total_quantity: f64,
    pub mean_quantity: f64,
    /// Sample standard deviation; zero for single-transaction products
    pub std_dev_quantity: f64,
    pub order_count: usize,
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub status: StockStatus,
}

/// Analyze every product with the default policy.
pub fn analyze(dataset: &Dataset) -> Vec<ProductStats> {
    analyze_with_policy(dataset, &StockPolicy::default())
}

/// Analyze every product under an explicit policy.
pub fn analyze_with_policy(dataset: &Dataset, policy: &StockPolicy) -> Vec<ProductStats> {
    let mut quantities: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for tx in dataset.records() {
        quantities.entry(&tx.product).or_default().push(tx.quantity);
    }
    debug!(products = quantities.len(), "analyzing stock levels");

    quantities
        .into_iter()
        .map(|(product, values)| {
            let order_count = values.len();
            let total: f64 = values.iter().sum();
            let mean = total / order_count as f64;
            let std_dev = sample_std_dev(&values, mean);

            let safety_stock = (mean * policy.safety_factor).round();
            let reorder_point = (mean * policy.reorder_factor).round();
            let status = classify(total, safety_stock, policy);

            ProductStats {
                product: product.to_string(),
                total_quantity: total,
                mean_quantity: mean,
                std_dev_quantity: std_dev,
                order_count,
                safety_stock,
                reorder_point,
                status,
            }
        })
        .collect()
}

/// First matching rule wins: overstock, then shortage, then normal.
fn classify(total: f64, safety_stock: f64, policy: &StockPolicy) -> StockStatus {
    if total > safety_stock * policy.high_stock_multiplier {
        StockStatus::HighStock
    } else if total < safety_stock {
        StockStatus::ReorderRequired
    } else {
        StockStatus::NormalStock
    }
}

fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}
