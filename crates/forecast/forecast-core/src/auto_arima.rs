//! Autoregressive forecasting with automatic order selection (Model B).
//!
//! [`Arima`] is the underlying ARIMA(p, d, q) implementation: Yule-Walker
//! AR estimation via Levinson-Durbin, moving-average terms from residual
//! autocorrelation, differencing for stationarity. [`AutoArima`] wraps it
//! with a grid search over the order, including one level of seasonal
//! differencing at the weekly period, scored on a chronological holdout.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use forecast_spi::{Forecast, ForecastError, ForecastModel, Result};

use crate::MIN_FIT_POINTS;

/// A fully specified model order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArimaOrder {
    /// Autoregressive order
    pub p: usize,
    /// Differencing order
    pub d: usize,
    /// Moving-average order
    pub q: usize,
    /// Seasonal differencing passes (0 or 1)
    pub seasonal_d: usize,
}

impl fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)?;
        if self.seasonal_d > 0 {
            write!(f, " D={}", self.seasonal_d)?;
        }
        Ok(())
    }
}

/// ARIMA model with fixed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arima {
    p: usize,
    d: usize,
    q: usize,
    ar: Vec<f64>,
    ma: Vec<f64>,
    mean: f64,
    /// Original series, kept for undifferencing
    history: Vec<f64>,
    /// Series after `d` differencing passes
    worked: Vec<f64>,
    residuals: Vec<f64>,
    fitted: bool,
}

impl Arima {
    /// Create an unfitted model with the given non-seasonal order.
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        if p > 10 {
            return Err(ForecastError::InvalidParameter {
                name: "p".to_string(),
                reason: "AR order must be <= 10".to_string(),
            });
        }
        if d > 2 {
            return Err(ForecastError::InvalidParameter {
                name: "d".to_string(),
                reason: "differencing order must be <= 2".to_string(),
            });
        }
        if q > 10 {
            return Err(ForecastError::InvalidParameter {
                name: "q".to_string(),
                reason: "MA order must be <= 10".to_string(),
            });
        }

        Ok(Self {
            p,
            d,
            q,
            ar: Vec::new(),
            ma: Vec::new(),
            mean: 0.0,
            history: Vec::new(),
            worked: Vec::new(),
            residuals: Vec::new(),
            fitted: false,
        })
    }

    /// AR coefficients after fitting.
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    /// MA coefficients after fitting.
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    fn min_required(&self) -> usize {
        self.p + self.d + self.q + 10
    }

    /// Map the differenced-scale forecast back onto the original scale.
    fn undifference(&self, forecasts: &[f64]) -> Vec<f64> {
        let mut result = forecasts.to_vec();
        for _ in 0..self.d {
            let mut level = *self.history.last().expect("fitted on non-empty series");
            for value in &mut result {
                level += *value;
                *value = level;
            }
        }
        result
    }
}

impl ForecastModel for Arima {
    fn fit(&mut self, series: &[f64]) -> Result<()> {
        if series.len() < self.min_required() {
            return Err(ForecastError::InsufficientData {
                required: self.min_required(),
                actual: series.len(),
            });
        }
        if series.iter().any(|x| !x.is_finite()) {
            return Err(ForecastError::InvalidData(
                "series contains NaN or infinite values".to_string(),
            ));
        }

        self.history = series.to_vec();
        self.worked = difference(series, self.d);

        let n = self.worked.len();
        self.mean = self.worked.iter().sum::<f64>() / n as f64;

        let gamma = autocovariance(&self.worked, self.p);
        self.ar = levinson_durbin(&gamma, self.p);

        // One-step-ahead residuals of the AR part
        self.residuals = vec![0.0; n];
        for i in self.p..n {
            let mut prediction = self.mean;
            for (j, coeff) in self.ar.iter().enumerate() {
                prediction += coeff * (self.worked[i - j - 1] - self.mean);
            }
            self.residuals[i] = self.worked[i] - prediction;
        }

        self.ma = ma_from_residuals(&self.residuals, self.q);
        self.fitted = true;
        Ok(())
    }

    fn forecast(&self, horizon: usize) -> Result<Forecast> {
        if !self.fitted {
            return Err(ForecastError::NotFitted);
        }
        if horizon == 0 {
            return Ok(Forecast::points(Vec::new()));
        }

        let n = self.worked.len();
        let mut extended = self.worked.clone();
        let mut shocks = self.residuals.clone();

        for _ in 0..horizon {
            let mut next = self.mean;
            for (j, coeff) in self.ar.iter().enumerate() {
                next += coeff * (extended[extended.len() - j - 1] - self.mean);
            }
            for (j, coeff) in self.ma.iter().enumerate() {
                if shocks.len() > j {
                    next += coeff * shocks[shocks.len() - j - 1];
                }
            }
            extended.push(next);
            // Future shocks have zero expectation
            shocks.push(0.0);
        }

        Ok(Forecast::points(self.undifference(&extended[n..])))
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

/// Configuration of the order search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoArimaConfig {
    pub max_p: usize,
    pub max_d: usize,
    pub max_q: usize,
    /// Seasonal differencing period; 7 models weekly structure in daily data
    pub seasonal_period: usize,
    /// Fraction of the series held out for candidate scoring
    pub holdout_ratio: f64,
}

impl Default for AutoArimaConfig {
    fn default() -> Self {
        Self {
            max_p: 3,
            max_d: 2,
            max_q: 3,
            seasonal_period: 7,
            holdout_ratio: 0.2,
        }
    }
}

/// ARIMA with automatically selected order.
///
/// Every `(p, d, q, D)` combination in the configured grid is fitted on the
/// head of the series and scored by mean absolute error on the held-out
/// tail; the winner is refitted on the full series. When no candidate
/// produces a usable fit the search fails closed with
/// [`ForecastError::NoViableModel`] rather than returning silently wrong
/// numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoArima {
    config: AutoArimaConfig,
    selected: Option<ArimaOrder>,
    model: Option<Arima>,
    /// Last `seasonal_period` observed values, used to undo seasonal
    /// differencing; empty when the selected order has `D = 0`
    season_tail: Vec<f64>,
    fitted: bool,
}

impl Default for AutoArima {
    fn default() -> Self {
        Self::new(AutoArimaConfig::default())
    }
}

impl AutoArima {
    pub fn new(config: AutoArimaConfig) -> Self {
        Self {
            config,
            selected: None,
            model: None,
            season_tail: Vec::new(),
            fitted: false,
        }
    }

    /// The order the search settled on, once fitted.
    pub fn selected_order(&self) -> Option<ArimaOrder> {
        self.selected
    }

    /// Fit a candidate on `train` and forecast `horizon` values on the
    /// original scale. `None` when the candidate cannot be fitted.
    fn candidate_forecast(
        train: &[f64],
        order: ArimaOrder,
        period: usize,
        horizon: usize,
    ) -> Option<Vec<f64>> {
        let (worked, tail) = if order.seasonal_d == 1 {
            if train.len() <= period {
                return None;
            }
            (
                seasonal_difference(train, period),
                train[train.len() - period..].to_vec(),
            )
        } else {
            (train.to_vec(), Vec::new())
        };

        let mut model = Arima::new(order.p, order.d, order.q).ok()?;
        model.fit(&worked).ok()?;
        let raw = model.forecast(horizon).ok()?.values;

        Some(if order.seasonal_d == 1 {
            undo_seasonal_difference(&raw, &tail, period)
        } else {
            raw
        })
    }
}

impl ForecastModel for AutoArima {
    fn fit(&mut self, series: &[f64]) -> Result<()> {
        if series.len() < MIN_FIT_POINTS {
            return Err(ForecastError::InsufficientData {
                required: MIN_FIT_POINTS,
                actual: series.len(),
            });
        }
        if series.iter().any(|x| !x.is_finite()) {
            return Err(ForecastError::InvalidData(
                "series contains NaN or infinite values".to_string(),
            ));
        }

        let holdout = ((series.len() as f64 * self.config.holdout_ratio) as usize).max(2);
        let split = series.len() - holdout;
        let (train, test) = series.split_at(split);
        let period = self.config.seasonal_period;

        let mut best: Option<(ArimaOrder, f64)> = None;
        for seasonal_d in 0..=1 {
            for p in 0..=self.config.max_p {
                for d in 0..=self.config.max_d {
                    for q in 0..=self.config.max_q {
                        if p == 0 && q == 0 {
                            continue;
                        }
                        let order = ArimaOrder { p, d, q, seasonal_d };
                        let Some(predictions) =
                            Self::candidate_forecast(train, order, period, test.len())
                        else {
                            continue;
                        };
                        let score = mae(test, &predictions);
                        if score.is_finite()
                            && best.map_or(true, |(_, best_score)| score < best_score)
                        {
                            best = Some((order, score));
                        }
                    }
                }
            }
        }

        let (order, score) = best.ok_or_else(|| {
            ForecastError::NoViableModel("no candidate order could be fitted".to_string())
        })?;
        debug!(%order, score, "auto-arima order selected");

        // Refit the winner on the full series
        let (worked, tail) = if order.seasonal_d == 1 {
            (
                seasonal_difference(series, period),
                series[series.len() - period..].to_vec(),
            )
        } else {
            (series.to_vec(), Vec::new())
        };
        let mut model = Arima::new(order.p, order.d, order.q)?;
        model.fit(&worked)?;

        self.selected = Some(order);
        self.model = Some(model);
        self.season_tail = tail;
        self.fitted = true;
        Ok(())
    }

    fn forecast(&self, horizon: usize) -> Result<Forecast> {
        let model = self.model.as_ref().ok_or(ForecastError::NotFitted)?;
        let raw = model.forecast(horizon)?.values;

        let values = if self.season_tail.is_empty() {
            raw
        } else {
            undo_seasonal_difference(&raw, &self.season_tail, self.config.seasonal_period)
        };
        Ok(Forecast::points(values))
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

/// Apply `order` passes of first differencing.
fn difference(series: &[f64], order: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..order {
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Lag-`period` differencing: `y'[t] = y[t] - y[t - period]`.
fn seasonal_difference(series: &[f64], period: usize) -> Vec<f64> {
    series
        .iter()
        .skip(period)
        .zip(series.iter())
        .map(|(current, lagged)| current - lagged)
        .collect()
}

/// Reconstruct original-scale values from a seasonally differenced forecast.
///
/// `tail` holds the last `period` observed values; each forecast step adds
/// back the value one period earlier in the reconstructed sequence.
fn undo_seasonal_difference(diffed: &[f64], tail: &[f64], period: usize) -> Vec<f64> {
    debug_assert_eq!(tail.len(), period);
    let mut extended = tail.to_vec();
    let mut out = Vec::with_capacity(diffed.len());
    for &delta in diffed {
        let base = extended[extended.len() - period];
        let value = delta + base;
        extended.push(value);
        out.push(value);
    }
    out
}

/// Autocovariance at lags `0..=max_lag`.
fn autocovariance(series: &[f64], max_lag: usize) -> Vec<f64> {
    let n = series.len();
    let mean = series.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = series.iter().map(|x| x - mean).collect();

    (0..=max_lag)
        .map(|lag| {
            centered
                .iter()
                .skip(lag)
                .zip(centered.iter())
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / n as f64
        })
        .collect()
}

/// Solve the Yule-Walker equations by Levinson-Durbin recursion.
fn levinson_durbin(gamma: &[f64], order: usize) -> Vec<f64> {
    let mut coeffs = vec![0.0; order];
    if order == 0 || gamma[0].abs() < 1e-10 {
        return coeffs;
    }

    coeffs[0] = gamma[1] / gamma[0];
    for k in 1..order {
        let mut numerator = gamma[k + 1];
        for j in 0..k {
            numerator -= coeffs[j] * gamma[k - j];
        }
        let mut denominator = gamma[0];
        for j in 0..k {
            denominator -= coeffs[j] * gamma[j + 1];
        }
        if denominator.abs() < 1e-10 {
            break;
        }

        let reflection = numerator / denominator;
        let previous = coeffs.clone();
        coeffs[k] = reflection;
        for j in 0..k {
            coeffs[j] = previous[j] - reflection * previous[k - 1 - j];
        }
    }
    coeffs
}

/// MA coefficients estimated from residual autocorrelation, clamped for
/// stability.
fn ma_from_residuals(residuals: &[f64], order: usize) -> Vec<f64> {
    if order == 0 || residuals.is_empty() {
        return vec![0.0; order];
    }

    let n = residuals.len();
    let mean = residuals.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = residuals.iter().map(|x| x - mean).collect();
    let variance = centered.iter().map(|x| x * x).sum::<f64>() / n as f64;

    let mut coeffs = vec![0.0; order];
    if variance.abs() > 1e-10 {
        for (k, coeff) in coeffs.iter_mut().enumerate() {
            let cross: f64 = centered
                .iter()
                .skip(k + 1)
                .zip(centered.iter())
                .map(|(a, b)| a * b)
                .sum();
            *coeff = ((cross / n as f64) / variance).clamp(-0.99, 0.99);
        }
    }
    coeffs
}

/// Mean absolute error; `NaN` on length mismatch or empty input.
fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}
