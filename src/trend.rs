//! Least-squares linear trend over (index, value) pairs
//!
//! Used to separate slow drift in pause times from short peak periods.

use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// First-degree polynomial `value = intercept + slope * index`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendModel {
    /// Fit by ordinary least squares with x = 0, 1, ..., n-1
    ///
    /// # Example
    /// ```
    /// use gcpause::trend::TrendModel;
    ///
    /// let trend = TrendModel::fit(&[1.0, 3.0, 5.0, 7.0]).unwrap();
    /// assert!((trend.slope - 2.0).abs() < 1e-12);
    /// assert!((trend.intercept - 1.0).abs() < 1e-12);
    /// ```
    pub fn fit(values: &[f64]) -> Result<Self> {
        let n = values.len();
        if n < 2 {
            return Err(AnalysisError::InsufficientData {
                required: 2,
                actual: n,
            });
        }

        let n_f = n as f64;
        let mean_x = (n_f - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n_f;

        // Centered sums keep the fit stable for long series
        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - mean_x;
            sxx += dx * dx;
            sxy += dx * (y - mean_y);
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        Ok(Self { slope, intercept })
    }

    /// Predicted value at `index`
    pub fn predict(&self, index: usize) -> f64 {
        self.intercept + self.slope * index as f64
    }

    /// Predicted values at indices 0..len
    pub fn predict_series(&self, len: usize) -> Vec<f64> {
        (0..len).map(|i| self.predict(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_flat_series() {
        let trend = TrendModel::fit(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.intercept, 5.0);
    }

    #[test]
    fn test_fit_two_points() {
        let trend = TrendModel::fit(&[2.0, 4.0]).unwrap();
        assert!((trend.slope - 2.0).abs() < 1e-12);
        assert!((trend.intercept - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_pulled_by_outlier() {
        // Outlier at the end tilts the line upward
        let values = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 50.0];
        let trend = TrendModel::fit(&values).unwrap();
        assert!((trend.slope - 180.0 / 82.5).abs() < 1e-9);
        assert!(trend.slope > 0.0);
    }

    #[test]
    fn test_fit_rejects_single_point() {
        assert!(TrendModel::fit(&[1.0]).is_err());
    }

    #[test]
    fn test_predict_series() {
        let trend = TrendModel {
            slope: 1.5,
            intercept: -1.0,
        };
        assert_eq!(trend.predict_series(3), vec![-1.0, 0.5, 2.0]);
    }
}
