//! Trait for demand-forecast models.

use crate::error::Result;
use crate::model::Forecast;

/// Common capability of all forecast models.
///
/// A model is fitted once on a historical series and then asked for a
/// forecast over a future horizon. Whether the result carries uncertainty
/// bounds is up to the implementation.
pub trait ForecastModel {
    /// Fit the model to an observed series, oldest value first.
    fn fit(&mut self, series: &[f64]) -> Result<()>;

    /// Predict `horizon` future values.
    fn forecast(&self, horizon: usize) -> Result<Forecast>;

    /// Whether [`ForecastModel::fit`] has completed successfully.
    fn is_fitted(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    /// Mock model: repeats the last observed value.
    struct NaiveModel {
        last: Option<f64>,
    }

    impl ForecastModel for NaiveModel {
        fn fit(&mut self, series: &[f64]) -> Result<()> {
            self.last = series.last().copied();
            if self.last.is_none() {
                return Err(ForecastError::InsufficientData {
                    required: 1,
                    actual: 0,
                });
            }
            Ok(())
        }

        fn forecast(&self, horizon: usize) -> Result<Forecast> {
            let last = self.last.ok_or(ForecastError::NotFitted)?;
            Ok(Forecast {
                values: vec![last; horizon],
                bounds: None,
            })
        }

        fn is_fitted(&self) -> bool {
            self.last.is_some()
        }
    }

    #[test]
    fn test_mock_model_through_trait() {
        let mut model: Box<dyn ForecastModel> = Box::new(NaiveModel { last: None });
        assert!(!model.is_fitted());
        model.fit(&[1.0, 2.0, 3.0]).unwrap();
        let forecast = model.forecast(4).unwrap();
        assert_eq!(forecast.values, vec![3.0; 4]);
        assert!(forecast.bounds.is_none());
    }

    #[test]
    fn test_unfitted_model_errors() {
        let model = NaiveModel { last: None };
        assert!(matches!(model.forecast(3), Err(ForecastError::NotFitted)));
    }

    #[test]
    fn test_fit_on_empty_series_errors() {
        let mut model = NaiveModel { last: None };
        assert!(model.fit(&[]).is_err());
    }
}
