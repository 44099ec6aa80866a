//! Uncertainty bounds for point forecasts.
//!
//! Bounds are derived from the spread of in-sample residuals. Historical
//! fitted values get a constant band; future points widen with the square
//! root of forecast distance, since errors compound as the model walks
//! away from observed data.

use forecast_spi::Bounds;

/// Confidence level used when a caller does not pass one.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Bounds around `values`, where indexes at `first_future` and beyond are
/// forecasts and everything before is an in-sample fit.
pub fn band_from_residual_std(
    values: &[f64],
    residual_std: f64,
    first_future: usize,
    confidence_level: f64,
) -> Bounds {
    let z = z_score(confidence_level);

    let mut lower = Vec::with_capacity(values.len());
    let mut upper = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        let margin = if i < first_future {
            z * residual_std
        } else {
            let step = (i - first_future + 1) as f64;
            z * residual_std * step.sqrt()
        };
        lower.push(value - margin);
        upper.push(value + margin);
    }

    Bounds { lower, upper }
}

/// Get z-score for a given confidence level
pub(crate) fn z_score(confidence_level: f64) -> f64 {
    match confidence_level {
        x if x >= 0.99 => 2.576,
        x if x >= 0.95 => 1.96,
        x if x >= 0.90 => 1.645,
        x if x >= 0.80 => 1.282,
        _ => 1.96, // default to 95%
    }
}

/// Standard deviation of residuals around their mean.
pub(crate) fn residual_std(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }
    let n = residuals.len() as f64;
    let mean = residuals.iter().sum::<f64>() / n;
    let variance = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_widens_into_the_future() {
        let values = vec![100.0; 6];
        let bounds = band_from_residual_std(&values, 5.0, 3, 0.95);

        // Constant band over history
        assert!((bounds.upper[0] - bounds.lower[0] - bounds.upper[2] + bounds.lower[2]).abs() < 1e-10);
        // Widening band over the future
        let width_first = bounds.upper[3] - bounds.lower[3];
        let width_last = bounds.upper[5] - bounds.lower[5];
        assert!(width_last > width_first);
        assert!((width_last / width_first - 3f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_zero_residuals_collapse_band() {
        let values = vec![10.0, 11.0];
        let bounds = band_from_residual_std(&values, 0.0, 0, 0.95);
        assert_eq!(bounds.lower, values);
        assert_eq!(bounds.upper, values);
    }

    #[test]
    fn test_z_scores() {
        assert_eq!(z_score(0.99), 2.576);
        assert_eq!(z_score(0.95), 1.96);
        assert_eq!(z_score(0.90), 1.645);
        assert_eq!(z_score(0.80), 1.282);
        assert_eq!(z_score(0.5), 1.96);
    }

    #[test]
    fn test_residual_std() {
        assert_eq!(residual_std(&[]), 0.0);
        assert_eq!(residual_std(&[3.0, 3.0, 3.0]), 0.0);
        assert!((residual_std(&[-1.0, 1.0]) - 1.0).abs() < 1e-10);
    }
}
