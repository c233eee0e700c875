//! Distribution analysis of a pause series
//!
//! Complements the control chart with the shape of the raw series: moments
//! and a shape classification, Shapiro-Wilk normality before and after a
//! Box-Cox transform, maximum-likelihood family fits ranked by a KS test,
//! and IQR outlier fences.

mod fitting;
mod normality;
mod outliers;
mod shape;

pub use fitting::{fit_distributions, DistributionFit, FitParameter};
pub use normality::{
    box_cox_transform, shapiro_wilk, BoxCoxResult, NormalityTest, BOX_COX_LAMBDA_RANGE,
    NORMALITY_ALPHA,
};
pub use outliers::{IqrOutliers, IQR_FENCE};
pub use shape::{DistributionCharacteristics, ShapeClassification, SHAPE_THRESHOLD};

use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// Everything the distribution analysis reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub characteristics: DistributionCharacteristics,
    /// `None` when skewness or kurtosis is undefined
    pub shape: Option<ShapeClassification>,
    /// Shapiro-Wilk on the raw series
    pub normality: Option<NormalityTest>,
    /// `None` when the series cannot be transformed (no spread)
    pub box_cox: Option<BoxCoxResult>,
    /// Shapiro-Wilk on the Box-Cox transformed series
    pub transformed_normality: Option<NormalityTest>,
    /// Best KS p-value first
    pub fits: Vec<DistributionFit>,
    pub outliers: IqrOutliers,
}

/// Run every distribution analysis over `values`.
///
/// Only empty or non-finite input is an error. Analyses that are undefined
/// for the series (a constant series has no Box-Cox lambda) are reported as
/// absent.
pub fn summarize(values: &[f64]) -> Result<DistributionSummary> {
    let characteristics = DistributionCharacteristics::from_values(values)?;

    let box_cox = match box_cox_transform(values) {
        Ok(result) => Some(result),
        Err(AnalysisError::DegenerateInput(reason)) => {
            tracing::warn!("Skipping Box-Cox transform: {}", reason);
            None
        }
        Err(AnalysisError::InsufficientData { actual, .. }) => {
            tracing::warn!("Skipping Box-Cox transform: only {} values", actual);
            None
        }
        Err(e) => return Err(e),
    };
    let transformed_normality = box_cox
        .as_ref()
        .and_then(|bc| shapiro_wilk(&bc.transformed));

    let outliers = IqrOutliers::detect(values).ok_or(AnalysisError::InsufficientData {
        required: 1,
        actual: 0,
    })?;

    Ok(DistributionSummary {
        shape: characteristics.classify(),
        normality: shapiro_wilk(values),
        box_cox,
        transformed_normality,
        fits: fit_distributions(values),
        outliers,
        characteristics,
    })
}
