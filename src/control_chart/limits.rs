// Smaller-is-better control limits
//
// For pause times only the upper limit signals a real latency regression.
// The lower limit is a sanity floor and is clipped at zero because a
// duration cannot be negative.

use crate::control_chart::config::{ChartConfig, DegeneratePolicy};
use crate::error::{AnalysisError, Result};
use crate::series::{mean, population_std};
use serde::{Deserialize, Serialize};

/// Center line and control limits of the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlChartParameters {
    pub mean: f64,
    pub std_dev: f64,
    pub lower_control_limit: f64,
    pub upper_control_limit: f64,
}

impl ControlChartParameters {
    /// True when `value` lies strictly outside [LCL, UCL]
    pub fn is_out_of_control(&self, value: f64) -> bool {
        value < self.lower_control_limit || value > self.upper_control_limit
    }
}

/// Compute mean, population std and ±k·σ limits from (filtered) samples
pub fn calculate_limits(values: &[f64], config: &ChartConfig) -> Result<ControlChartParameters> {
    let (Some(mean), Some(std_dev)) = (mean(values), population_std(values)) else {
        return Err(AnalysisError::InsufficientData {
            required: 1,
            actual: 0,
        });
    };

    if std_dev == 0.0 {
        match config.degenerate_policy {
            DegeneratePolicy::Collapse => {
                tracing::warn!(
                    "Filtered samples have zero spread; control limits collapse to the mean {:.3}",
                    mean
                );
            }
            DegeneratePolicy::Reject => {
                return Err(AnalysisError::DegenerateInput(format!(
                    "filtered samples have zero standard deviation (all equal to {mean})"
                )));
            }
        }
    }

    let half_width = config.sigma_multiplier * std_dev;
    let params = ControlChartParameters {
        mean,
        std_dev,
        lower_control_limit: (mean - half_width).max(0.0),
        upper_control_limit: mean + half_width,
    };

    tracing::debug!(
        "Control limits: mean={:.3}, std_dev={:.3}, LCL={:.3}, UCL={:.3}",
        params.mean,
        params.std_dev,
        params.lower_control_limit,
        params.upper_control_limit
    );

    Ok(params)
}
