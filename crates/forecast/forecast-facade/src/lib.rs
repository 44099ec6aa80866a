//! Forecast Facade
//!
//! High-level API for the forecast stack. Re-exports the model
//! implementations and the SPI so callers depend on one crate.

// Re-export core models
pub use forecast_core::{
    Arima, ArimaOrder, AutoArima, AutoArimaConfig, SeasonalTrendConfig, SeasonalTrendModel,
    DEFAULT_CONFIDENCE_LEVEL, MIN_FIT_POINTS,
};

// Re-export core modules for direct access
pub use forecast_core::{auto_arima, confidence, seasonal_trend};

// Re-export SPI traits and models
pub use forecast_spi::{Bounds, Forecast, ForecastError, ForecastModel, Result};
