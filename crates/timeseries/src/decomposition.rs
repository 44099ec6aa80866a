//! Additive seasonal decomposition.
//!
//! Splits a series into trend, seasonal, and residual components with
//! `Y = T + S + R`. The trend is a centered moving average; the seasonal
//! component is the zero-normalized mean of detrended values per period
//! position.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Decomposed series components, index-aligned with the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
}

/// Additive decomposition with the given periodicity.
///
/// Needs at least `2 * period` points to estimate one full seasonal cycle
/// against a trend; anything less returns `None`. Decomposition is a soft
/// feature and its absence must not fail the rest of the pipeline.
pub fn decompose_additive(data: &[f64], period: usize) -> Option<Decomposition> {
    let n = data.len();
    if period < 2 || n < period * 2 {
        debug!(n, period, "series too short for decomposition; skipping");
        return None;
    }

    let trend = centered_trend(data, period);

    let detrended: Vec<f64> = data.iter().zip(&trend).map(|(d, t)| d - t).collect();

    // Mean of detrended values per period position, normalized to sum to
    // zero so the level stays in the trend component.
    let mut factors = vec![0.0; period];
    for (pos, factor) in factors.iter_mut().enumerate() {
        let values: Vec<f64> = detrended.iter().skip(pos).step_by(period).copied().collect();
        *factor = values.iter().sum::<f64>() / values.len() as f64;
    }
    let mean_factor = factors.iter().sum::<f64>() / period as f64;
    for factor in &mut factors {
        *factor -= mean_factor;
    }

    let seasonal: Vec<f64> = (0..n).map(|i| factors[i % period]).collect();

    let residual: Vec<f64> = data
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((d, t), s)| d - t - s)
        .collect();

    Some(Decomposition {
        trend,
        seasonal,
        residual,
    })
}

/// Centered moving average, edge positions extended from the first and last
/// computable values.
///
/// For an even period the window spans `period + 1` points with the two
/// endpoints half-weighted, so a constant series yields exactly that
/// constant as its trend.
fn centered_trend(data: &[f64], period: usize) -> Vec<f64> {
    let n = data.len();
    let half = period / 2;
    let mut trend = vec![0.0; n];

    for i in half..(n - half) {
        let value = if period % 2 == 0 {
            let inner: f64 = data[i - half + 1..i + half].iter().sum();
            (0.5 * data[i - half] + inner + 0.5 * data[i + half]) / period as f64
        } else {
            data[i - half..=i + half].iter().sum::<f64>() / period as f64
        };
        trend[i] = value;
    }

    for i in 0..half {
        trend[i] = trend[half];
    }
    for i in (n - half)..n {
        trend[i] = trend[n - half - 1];
    }
    trend
}
