//! Measurement series and descriptive statistics
//!
//! All statistics use the population form (divide by n), matching how the
//! pause-time analyses have always been computed.

use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// Minimum number of samples needed to fit a trend line
pub const MIN_SERIES_LEN: usize = 2;

/// Ordered GC pause durations in milliseconds (index = arrival order)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MeasurementSeries {
    values: Vec<f64>,
}

impl MeasurementSeries {
    /// Build a series, rejecting short input and NaN/infinite values
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.len() < MIN_SERIES_LEN {
            return Err(AnalysisError::InsufficientData {
                required: MIN_SERIES_LEN,
                actual: values.len(),
            });
        }

        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(AnalysisError::NonFiniteValue { index });
        }

        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a series holds at least `MIN_SERIES_LEN` values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Multiply every value by `factor`
    pub fn scaled(&self, factor: f64) -> Result<Self> {
        Self::new(self.values.iter().map(|v| v * factor).collect())
    }

    pub fn mean(&self) -> f64 {
        mean(&self.values).unwrap_or(0.0)
    }

    pub fn std_dev(&self) -> f64 {
        population_std(&self.values).unwrap_or(0.0)
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl TryFrom<Vec<f64>> for MeasurementSeries {
    type Error = AnalysisError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (ddof = 0), two-pass
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(sum_sq / values.len() as f64)
}

/// Population standard deviation (ddof = 0)
pub fn population_std(values: &[f64]) -> Option<f64> {
    population_variance(values).map(f64::sqrt)
}
