// Tukey IQR fences

use serde::Serialize;
use u_numflow::stats::quantile_sorted;

/// Fence distance in interquartile ranges
pub const IQR_FENCE: f64 = 1.5;

/// Quartiles, fences and the samples outside them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IqrOutliers {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Indices of samples strictly outside the fences
    pub outliers: Vec<usize>,
}

impl IqrOutliers {
    /// Quartiles use linear interpolation (numpy's default percentile);
    /// `None` for an empty series
    pub fn detect(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let q1 = quantile_sorted(&sorted, 0.25)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let lower_fence = q1 - IQR_FENCE * iqr;
        let upper_fence = q3 + IQR_FENCE * iqr;

        let outliers = values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v < lower_fence || v > upper_fence)
            .map(|(i, _)| i)
            .collect();

        Some(Self {
            q1,
            q3,
            iqr,
            lower_fence,
            upper_fence,
            outliers,
        })
    }
}
