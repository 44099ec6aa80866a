//! Contract module containing forecast traits

mod forecast_model;

pub use forecast_model::ForecastModel;
