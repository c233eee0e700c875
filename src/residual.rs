//! Residual analysis against a fitted trend

use crate::error::{AnalysisError, Result};
use crate::series::{mean, population_std};

/// Computes residuals and their z-score normalization
#[derive(Debug, Clone, Copy, Default)]
pub struct ResidualAnalyzer;

impl ResidualAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Element-wise `observed - predicted`
    pub fn calculate_residuals(&self, observed: &[f64], predicted: &[f64]) -> Result<Vec<f64>> {
        if observed.len() != predicted.len() {
            return Err(AnalysisError::LengthMismatch {
                observed: observed.len(),
                predicted: predicted.len(),
            });
        }

        Ok(observed
            .iter()
            .zip(predicted)
            .map(|(o, p)| o - p)
            .collect())
    }

    /// `(x - mean) / population_std` for every residual
    ///
    /// Returns `DegenerateInput` when all residuals are equal, since the
    /// z-scores are undefined.
    pub fn normalize_residuals(&self, residuals: &[f64]) -> Result<Vec<f64>> {
        let (Some(mean), Some(std)) = (mean(residuals), population_std(residuals)) else {
            return Err(AnalysisError::InsufficientData {
                required: 1,
                actual: 0,
            });
        };

        if std == 0.0 || !std.is_finite() {
            return Err(AnalysisError::DegenerateInput(format!(
                "residual standard deviation is {std}, cannot normalize"
            )));
        }

        Ok(residuals.iter().map(|r| (r - mean) / std).collect())
    }
}
