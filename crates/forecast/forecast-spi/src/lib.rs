//! Forecast Service Provider Interface
//!
//! Defines the trait every demand-forecast model implements, the error
//! taxonomy for model fitting, and the shared result models. New models
//! plug in through [`ForecastModel`] without new call-site shapes.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::ForecastModel;
pub use error::{ForecastError, Result};
pub use model::{Bounds, Forecast};
