//! Stock policy constants.

use serde::{Deserialize, Serialize};

/// Multipliers behind the reorder heuristics.
///
/// The defaults are the established policy values: safety stock at 1.5x
/// mean demand, reorder point at 2x, and overstock above twice the safety
/// stock. They are heuristics, not derived from a service-level model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockPolicy {
    /// Safety stock as a multiple of mean per-transaction quantity
    pub safety_factor: f64,
    /// Reorder point as a multiple of mean per-transaction quantity
    pub reorder_factor: f64,
    /// High-stock threshold as a multiple of safety stock
    pub high_stock_multiplier: f64,
}

impl Default for StockPolicy {
    fn default() -> Self {
        Self {
            safety_factor: 1.5,
            reorder_factor: 2.0,
            high_stock_multiplier: 2.0,
        }
    }
}
