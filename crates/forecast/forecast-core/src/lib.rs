//! Demand-forecast model implementations.
//!
//! Two independent models over the same daily revenue series:
//!
//! - [`SeasonalTrendModel`]: additive seasonal regression, an OLS trend plus
//!   weekly and yearly seasonal factors, with uncertainty bounds derived
//!   from residual spread.
//! - [`AutoArima`]: ARIMA with automatically selected order, including
//!   weekly seasonal differencing, scored on a chronological holdout.
//!
//! The models deliberately disagree at times; callers present both and
//! never reconcile them here.

pub mod auto_arima;
pub mod confidence;
pub mod seasonal_trend;

pub use auto_arima::{Arima, ArimaOrder, AutoArima, AutoArimaConfig};
pub use confidence::DEFAULT_CONFIDENCE_LEVEL;
pub use seasonal_trend::{SeasonalTrendConfig, SeasonalTrendModel};

/// Fewest observations either model accepts.
///
/// Two weekly cycles: below this neither seasonal structure nor a holdout
/// split is meaningful.
pub const MIN_FIT_POINTS: usize = 14;
