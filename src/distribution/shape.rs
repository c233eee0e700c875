// Descriptive characteristics and moment-based shape classification
//
// Skewness and kurtosis are the uncorrected moment ratios (g1, g2), the
// defaults of scipy.stats.skew / kurtosis. Both are undefined for a series
// with no spread.

use crate::error::{AnalysisError, Result};
use serde::Serialize;
use u_numflow::stats;

/// |skewness| and |excess kurtosis| beyond this mark a clear departure from normal
pub const SHAPE_THRESHOLD: f64 = 1.0;

/// Location, spread and shape of a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionCharacteristics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// g1 = m3 / m2^1.5, `None` without spread
    pub skewness: Option<f64>,
    /// g2 = m4 / m2² - 3, `None` without spread
    pub excess_kurtosis: Option<f64>,
}

/// Which shape labels a series matches; several can hold at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShapeClassification {
    pub approximately_normal: bool,
    pub right_skewed: bool,
    pub left_skewed: bool,
    pub heavy_tailed: bool,
    pub light_tailed: bool,
}

impl DistributionCharacteristics {
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(AnalysisError::NonFiniteValue { index });
        }
        let insufficient = || AnalysisError::InsufficientData {
            required: 1,
            actual: values.len(),
        };

        Ok(Self {
            count: values.len(),
            min: stats::min(values).ok_or_else(insufficient)?,
            max: stats::max(values).ok_or_else(insufficient)?,
            mean: stats::mean(values).ok_or_else(insufficient)?,
            median: stats::median(values).ok_or_else(insufficient)?,
            std_dev: stats::population_std_dev(values).ok_or_else(insufficient)?,
            skewness: stats::skewness_moment(values),
            excess_kurtosis: stats::kurtosis_moment(values),
        })
    }

    /// Shape labels, `None` when skewness or kurtosis is undefined
    pub fn classify(&self) -> Option<ShapeClassification> {
        Some(ShapeClassification::from_moments(
            self.skewness?,
            self.excess_kurtosis?,
        ))
    }
}

impl ShapeClassification {
    pub fn from_moments(skewness: f64, excess_kurtosis: f64) -> Self {
        Self {
            approximately_normal: skewness.abs() < SHAPE_THRESHOLD
                && excess_kurtosis.abs() < SHAPE_THRESHOLD,
            right_skewed: skewness > SHAPE_THRESHOLD,
            left_skewed: skewness < -SHAPE_THRESHOLD,
            heavy_tailed: excess_kurtosis.abs() > SHAPE_THRESHOLD,
            light_tailed: excess_kurtosis.abs() < SHAPE_THRESHOLD,
        }
    }

    /// Names of the matching labels, in a fixed order
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.approximately_normal, "approximately normal"),
            (self.right_skewed, "right-skewed"),
            (self.left_skewed, "left-skewed"),
            (self.heavy_tailed, "heavy-tailed"),
            (self.light_tailed, "light-tailed"),
        ]
        .into_iter()
        .filter_map(|(matched, label)| matched.then_some(label))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_characteristics() {
        let c = DistributionCharacteristics::from_values(&[4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();
        assert_eq!(c.count, 5);
        assert_eq!(c.min, 1.0);
        assert_eq!(c.max, 5.0);
        assert_eq!(c.mean, 3.0);
        assert_eq!(c.median, 3.0);
        assert!((c.std_dev - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!(c.skewness.unwrap().abs() < 1e-12);
        // m2 = 2, m4 = 6.8 → 6.8 / 4 - 3 = -1.3
        assert!((c.excess_kurtosis.unwrap() + 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_right_tail_skewness() {
        let c = DistributionCharacteristics::from_values(&[1.0, 1.0, 1.0, 2.0, 10.0]).unwrap();
        assert!(c.skewness.unwrap() > 1.0);
        assert!(c.classify().unwrap().right_skewed);
    }

    #[test]
    fn test_constant_series_has_no_shape() {
        let c = DistributionCharacteristics::from_values(&[5.0; 6]).unwrap();
        assert_eq!(c.std_dev, 0.0);
        assert_eq!(c.median, 5.0);
        assert!(c.skewness.is_none());
        assert!(c.excess_kurtosis.is_none());
        assert!(c.classify().is_none());
    }

    #[test]
    fn test_empty_and_non_finite() {
        assert!(matches!(
            DistributionCharacteristics::from_values(&[]),
            Err(AnalysisError::InsufficientData { .. })
        ));
        assert_eq!(
            DistributionCharacteristics::from_values(&[1.0, f64::NAN]),
            Err(AnalysisError::NonFiniteValue { index: 1 })
        );
    }

    #[test]
    fn test_classification_labels() {
        let normal = ShapeClassification::from_moments(0.2, -0.3);
        assert_eq!(normal.labels(), vec!["approximately normal", "light-tailed"]);

        let gc_like = ShapeClassification::from_moments(2.4, 7.1);
        assert_eq!(gc_like.labels(), vec!["right-skewed", "heavy-tailed"]);

        let left = ShapeClassification::from_moments(-1.5, 0.5);
        assert!(left.left_skewed && !left.approximately_normal);
    }
}
