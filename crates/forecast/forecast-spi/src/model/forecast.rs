//! Forecast result model

use serde::{Deserialize, Serialize};

/// Lower/upper uncertainty bounds, index-aligned with the point forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Point predictions with optional uncertainty bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Point predictions, oldest first
    pub values: Vec<f64>,
    /// Uncertainty bounds when the model provides them
    pub bounds: Option<Bounds>,
}

impl Forecast {
    /// A bound-less forecast from point predictions.
    pub fn points(values: Vec<f64>) -> Self {
        Self {
            values,
            bounds: None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_constructor() {
        let forecast = Forecast::points(vec![1.0, 2.0]);
        assert_eq!(forecast.len(), 2);
        assert!(forecast.bounds.is_none());
    }

    #[test]
    fn test_bounds_alignment() {
        let forecast = Forecast {
            values: vec![10.0, 11.0],
            bounds: Some(Bounds {
                lower: vec![8.0, 8.5],
                upper: vec![12.0, 13.5],
            }),
        };
        let bounds = forecast.bounds.as_ref().unwrap();
        assert_eq!(bounds.lower.len(), forecast.values.len());
        assert_eq!(bounds.upper.len(), forecast.values.len());
    }
}
