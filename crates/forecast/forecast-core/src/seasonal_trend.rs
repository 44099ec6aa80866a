//! Additive seasonal-trend regression (Model A).
//!
//! Fits `y(t) = intercept + slope * t + weekly(t mod 7) + yearly(t mod 365)`
//! by ordinary least squares on the trend and zero-normalized seasonal
//! factor means on the detrended series. Seasonal components activate only
//! when the series spans two of their periods; on daily-aggregated data the
//! daily component degenerates to a constant and is absorbed by the trend.

use serde::{Deserialize, Serialize};
use tracing::debug;

use forecast_spi::{Forecast, ForecastError, ForecastModel, Result};

use crate::confidence::{band_from_residual_std, residual_std, DEFAULT_CONFIDENCE_LEVEL};

const WEEKLY_PERIOD: usize = 7;
const YEARLY_PERIOD: usize = 365;

/// Which seasonal components the model may fit.
///
/// Defaults to all enabled; a component that the data cannot support stays
/// inactive regardless of its flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalTrendConfig {
    pub yearly: bool,
    pub weekly: bool,
    pub daily: bool,
}

impl Default for SeasonalTrendConfig {
    fn default() -> Self {
        Self {
            yearly: true,
            weekly: true,
            daily: true,
        }
    }
}

/// Additive seasonal regression model with uncertainty bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalTrendModel {
    config: SeasonalTrendConfig,
    intercept: f64,
    slope: f64,
    /// Additive factors per weekday position, empty when inactive
    weekly_factors: Vec<f64>,
    /// Additive factors per day-of-year position, empty when inactive
    yearly_factors: Vec<f64>,
    residual_std: f64,
    n_observations: usize,
    fitted: bool,
}

impl Default for SeasonalTrendModel {
    fn default() -> Self {
        Self::new(SeasonalTrendConfig::default())
    }
}

impl SeasonalTrendModel {
    pub fn new(config: SeasonalTrendConfig) -> Self {
        Self {
            config,
            intercept: 0.0,
            slope: 0.0,
            weekly_factors: Vec::new(),
            yearly_factors: Vec::new(),
            residual_std: 0.0,
            n_observations: 0,
            fitted: false,
        }
    }

    /// Trend slope per day.
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Model value at an arbitrary time index.
    fn predict_at(&self, t: usize) -> f64 {
        let mut value = self.intercept + self.slope * t as f64;
        if !self.weekly_factors.is_empty() {
            value += self.weekly_factors[t % WEEKLY_PERIOD];
        }
        if !self.yearly_factors.is_empty() {
            value += self.yearly_factors[t % YEARLY_PERIOD];
        }
        value
    }

    /// Fitted values plus `horizon` future predictions, with bounds over the
    /// whole range.
    ///
    /// This is the report shape of the model: one banded series covering
    /// every historical date and the forecast horizon.
    pub fn predictions_with_history(&self, horizon: usize) -> Result<Forecast> {
        if !self.fitted {
            return Err(ForecastError::NotFitted);
        }

        let values: Vec<f64> = (0..self.n_observations + horizon)
            .map(|t| self.predict_at(t))
            .collect();
        let bounds = band_from_residual_std(
            &values,
            self.residual_std,
            self.n_observations,
            DEFAULT_CONFIDENCE_LEVEL,
        );

        Ok(Forecast {
            values,
            bounds: Some(bounds),
        })
    }

    /// Zero-normalized mean of `values` grouped by `t % period`; empty when
    /// the series does not cover two periods.
    fn seasonal_factors(values: &[f64], period: usize) -> Vec<f64> {
        if values.len() < period * 2 {
            return Vec::new();
        }

        let mut factors = vec![0.0; period];
        for (pos, factor) in factors.iter_mut().enumerate() {
            let group: Vec<f64> = values.iter().skip(pos).step_by(period).copied().collect();
            *factor = group.iter().sum::<f64>() / group.len() as f64;
        }
        let mean = factors.iter().sum::<f64>() / period as f64;
        for factor in &mut factors {
            *factor -= mean;
        }
        factors
    }
}

impl ForecastModel for SeasonalTrendModel {
    fn fit(&mut self, series: &[f64]) -> Result<()> {
        if series.len() < 2 {
            return Err(ForecastError::InsufficientData {
                required: 2,
                actual: series.len(),
            });
        }
        if series.iter().any(|x| !x.is_finite()) {
            return Err(ForecastError::InvalidData(
                "series contains NaN or infinite values".to_string(),
            ));
        }

        // OLS trend over time indices 0, 1, 2, ...
        let n = series.len() as f64;
        let sum_t: f64 = (0..series.len()).map(|i| i as f64).sum();
        let sum_y: f64 = series.iter().sum();
        let sum_t2: f64 = (0..series.len()).map(|i| (i * i) as f64).sum();
        let sum_ty: f64 = series.iter().enumerate().map(|(i, &y)| i as f64 * y).sum();

        let denominator = n * sum_t2 - sum_t * sum_t;
        if denominator.abs() < 1e-10 {
            return Err(ForecastError::NumericalError(
                "singular matrix in trend regression".to_string(),
            ));
        }
        self.slope = (n * sum_ty - sum_t * sum_y) / denominator;
        self.intercept = (sum_y - self.slope * sum_t) / n;

        let mut detrended: Vec<f64> = series
            .iter()
            .enumerate()
            .map(|(i, &y)| y - (self.intercept + self.slope * i as f64))
            .collect();

        self.weekly_factors = if self.config.weekly {
            Self::seasonal_factors(&detrended, WEEKLY_PERIOD)
        } else {
            Vec::new()
        };
        if !self.weekly_factors.is_empty() {
            for (i, value) in detrended.iter_mut().enumerate() {
                *value -= self.weekly_factors[i % WEEKLY_PERIOD];
            }
        }

        self.yearly_factors = if self.config.yearly {
            Self::seasonal_factors(&detrended, YEARLY_PERIOD)
        } else {
            Vec::new()
        };
        if !self.yearly_factors.is_empty() {
            for (i, value) in detrended.iter_mut().enumerate() {
                *value -= self.yearly_factors[i % YEARLY_PERIOD];
            }
        }

        // What is left of `detrended` is the residual
        self.residual_std = residual_std(&detrended);
        self.n_observations = series.len();
        self.fitted = true;

        debug!(
            n = self.n_observations,
            weekly = !self.weekly_factors.is_empty(),
            yearly = !self.yearly_factors.is_empty(),
            "seasonal trend model fitted"
        );
        Ok(())
    }

    fn forecast(&self, horizon: usize) -> Result<Forecast> {
        if !self.fitted {
            return Err(ForecastError::NotFitted);
        }

        let values: Vec<f64> = (self.n_observations..self.n_observations + horizon)
            .map(|t| self.predict_at(t))
            .collect();
        let bounds =
            band_from_residual_std(&values, self.residual_std, 0, DEFAULT_CONFIDENCE_LEVEL);

        Ok(Forecast {
            values,
            bounds: Some(bounds),
        })
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
