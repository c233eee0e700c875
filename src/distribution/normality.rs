// Shapiro-Wilk normality checks and the Box-Cox transform
//
// GC pause series are right-skewed, so normality is tested both on the raw
// series and after a maximum-likelihood Box-Cox transform.

use crate::error::{AnalysisError, Result};
use crate::series::population_std;
use serde::Serialize;
use u_analytics::testing::shapiro_wilk_test;
use u_numflow::transforms;

/// Significance level below which normality is rejected
pub const NORMALITY_ALPHA: f64 = 0.05;

/// Search interval for the Box-Cox lambda
pub const BOX_COX_LAMBDA_RANGE: (f64, f64) = (-4.0, 4.0);

/// Outcome of a Shapiro-Wilk test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalityTest {
    pub w: f64,
    pub p_value: f64,
    /// `p_value > NORMALITY_ALPHA`
    pub normal: bool,
}

/// Shapiro-Wilk test; `None` outside 3..=5000 values or without spread
pub fn shapiro_wilk(values: &[f64]) -> Option<NormalityTest> {
    let result = shapiro_wilk_test(values)?;
    Some(NormalityTest {
        w: result.w,
        p_value: result.p_value,
        normal: result.p_value > NORMALITY_ALPHA,
    })
}

/// Box-Cox transform with the fitted lambda
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxCoxResult {
    pub lambda: f64,
    /// The likelihood peaked on an end of `BOX_COX_LAMBDA_RANGE`
    pub at_bound: bool,
    /// Offset added before transforming so every value is positive
    pub shift: f64,
    #[serde(skip)]
    pub transformed: Vec<f64>,
}

/// Fit lambda by profile likelihood and transform the series.
///
/// Non-positive input is shifted by `1 - min` first. The transform is
/// `expm1(λ·ln v) / λ`, switching to `ln v` for λ near zero. The lambda
/// search is bounded to `BOX_COX_LAMBDA_RANGE`, where scipy's `boxcox`
/// searches without bounds; `at_bound` marks a fit clamped to an end.
pub fn box_cox_transform(values: &[f64]) -> Result<BoxCoxResult> {
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(AnalysisError::NonFiniteValue { index });
    }
    if values.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: values.len(),
        });
    }
    if population_std(values).unwrap_or(0.0) == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "Box-Cox transform needs a series with nonzero spread".to_string(),
        ));
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let shift = if min <= 0.0 { 1.0 - min } else { 0.0 };
    let shifted: Vec<f64> = values.iter().map(|v| v + shift).collect();

    let (lo, hi) = BOX_COX_LAMBDA_RANGE;
    let estimate = transforms::estimate_lambda(&shifted, lo, hi)?;
    if estimate.at_bound {
        tracing::warn!(
            "Box-Cox lambda {:.4} is clamped to the search range [{}, {}]",
            estimate.lambda,
            lo,
            hi
        );
    }
    let transformed = transforms::box_cox(&shifted, estimate.lambda)?;

    tracing::debug!(
        "Box-Cox lambda {:.4} (shift {}) over {} values",
        estimate.lambda,
        shift,
        values.len()
    );

    Ok(BoxCoxResult {
        lambda: estimate.lambda,
        at_bound: estimate.at_bound,
        shift,
        transformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Evenly spaced normal quantiles via a fixed probit table
    fn normal_scores() -> Vec<f64> {
        vec![
            -1.96, -1.64, -1.28, -1.04, -0.84, -0.67, -0.52, -0.39, -0.25, -0.13, 0.0, 0.13,
            0.25, 0.39, 0.52, 0.67, 0.84, 1.04, 1.28, 1.64, 1.96,
        ]
    }

    #[test]
    fn test_shapiro_wilk_accepts_normal_scores() {
        let test = shapiro_wilk(&normal_scores()).unwrap();
        assert!(test.w > 0.95);
        assert!(test.normal);
    }

    #[test]
    fn test_shapiro_wilk_rejects_spiky_series() {
        let mut values = vec![10.0; 30];
        for (i, v) in values.iter_mut().enumerate() {
            *v += (i % 3) as f64 * 0.1;
        }
        values[7] = 400.0;
        values[19] = 350.0;
        let test = shapiro_wilk(&values).unwrap();
        assert!(test.p_value < NORMALITY_ALPHA);
        assert!(!test.normal);
    }

    #[test]
    fn test_shapiro_wilk_undefined_cases() {
        assert!(shapiro_wilk(&[1.0, 2.0]).is_none());
        assert!(shapiro_wilk(&[3.0; 10]).is_none());
    }

    #[test]
    fn test_lognormal_data_gives_lambda_near_zero() {
        let z = normal_scores();
        let values: Vec<f64> = z.iter().map(|v| v.exp()).collect();
        let result = box_cox_transform(&values).unwrap();

        assert!(result.lambda.abs() < 1e-3, "lambda = {}", result.lambda);
        assert!(!result.at_bound);
        assert_eq!(result.shift, 0.0);
        for (t, expected) in result.transformed.iter().zip(&z) {
            assert!((t - expected).abs() < 1e-2);
        }
    }

    #[test]
    fn test_transform_matches_log_for_tiny_lambda() {
        // y^λ - 1 loses every digit here; expm1(λ·ln y) does not
        let values = [1.000_000_1, 2.0];
        let transformed = transforms::box_cox(&values, 1e-9).unwrap();
        for (t, v) in transformed.iter().zip(values) {
            assert!((t - v.ln()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_non_positive_input_is_shifted() {
        let result = box_cox_transform(&[-2.0, 0.0, 1.0, 3.0, 8.0]).unwrap();
        assert_eq!(result.shift, 3.0);
        assert_eq!(result.transformed.len(), 5);
        assert!(result.transformed.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_constant_series_is_degenerate() {
        assert!(matches!(
            box_cox_transform(&[4.0; 8]),
            Err(AnalysisError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_box_cox_rejects_short_and_non_finite() {
        assert!(matches!(
            box_cox_transform(&[1.0]),
            Err(AnalysisError::InsufficientData { .. })
        ));
        assert_eq!(
            box_cox_transform(&[1.0, f64::INFINITY]),
            Err(AnalysisError::NonFiniteValue { index: 1 })
        );
    }
}
