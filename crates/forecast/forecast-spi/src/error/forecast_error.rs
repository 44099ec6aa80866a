//! Forecast error types

use thiserror::Error;

/// Errors that can occur while fitting or applying a forecast model.
///
/// A fit failure is fatal to that model's forecast only; other models and
/// engines over the same dataset remain usable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Insufficient data points for the operation
    #[error("insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model must be fitted before forecasting
    #[error("model must be fitted before forecasting")]
    NotFitted,

    /// Numerical computation error
    #[error("numerical error: {0}")]
    NumericalError(String),

    /// No candidate order produced a usable fit during model selection
    #[error("no viable model: {0}")]
    NoViableModel(String),

    /// Invalid time series data
    #[error("invalid data: {0}")]
    InvalidData(String),
}
