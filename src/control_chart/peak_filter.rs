// Peak-period removal via trend residuals
//
// GC pause series drift slowly (heap growth, traffic ramps) and spike during
// load peaks. Fitting a straight line and discarding samples whose residual
// z-score exceeds the cutoff removes the spikes while keeping the drift.
//
// This is a single-pass heuristic, not a robust regression: if peaks make up
// roughly half the series they drag the trend line with them and survive.

use crate::control_chart::config::{ChartConfig, DegeneratePolicy};
use crate::error::{AnalysisError, Result};
use crate::residual::ResidualAnalyzer;
use crate::series::{population_std, MeasurementSeries};
use crate::trend::TrendModel;
use serde::Serialize;

/// Samples kept after peak removal
///
/// Order is preserved and `indices` refer to positions in the original series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredSeries {
    pub values: Vec<f64>,
    pub indices: Vec<usize>,
    /// Original positions of the removed peak samples
    pub removed: Vec<usize>,
    pub trend: TrendModel,
    /// True when the residuals had no spread and nothing was filtered
    pub degenerate: bool,
}

impl FilteredSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Drop samples whose normalized trend residual exceeds `z_score_cutoff`
///
/// # Example
/// ```
/// use gcpause::control_chart::{remove_peak_data, ChartConfig};
/// use gcpause::series::MeasurementSeries;
///
/// let series = MeasurementSeries::new(vec![
///     10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 50.0,
/// ])
/// .unwrap();
/// let filtered = remove_peak_data(&series, &ChartConfig::default()).unwrap();
/// assert_eq!(filtered.removed, vec![9]);
/// ```
pub fn remove_peak_data(series: &MeasurementSeries, config: &ChartConfig) -> Result<FilteredSeries> {
    let values = series.values();
    let trend = TrendModel::fit(values)?;
    tracing::debug!(
        "Fitted trend over {} samples: slope={:.6}, intercept={:.6}",
        values.len(),
        trend.slope,
        trend.intercept
    );

    let analyzer = ResidualAnalyzer::new();
    let residuals = analyzer.calculate_residuals(values, &trend.predict_series(values.len()))?;

    let spread = population_std(&residuals).unwrap_or(0.0);
    // relative to the data so the test is unit-free; all-zero data gives 0 <= 0
    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if spread <= config.residual_tolerance * scale {
        return match config.degenerate_policy {
            DegeneratePolicy::Collapse => {
                tracing::warn!(
                    "Residual spread {:.3e} is negligible; keeping all {} samples",
                    spread,
                    values.len()
                );
                Ok(FilteredSeries {
                    values: values.to_vec(),
                    indices: (0..values.len()).collect(),
                    removed: Vec::new(),
                    trend,
                    degenerate: true,
                })
            }
            DegeneratePolicy::Reject => Err(AnalysisError::DegenerateInput(format!(
                "residuals have no spread ({spread:.3e}), cannot identify peak samples"
            ))),
        };
    }

    let z_scores = analyzer.normalize_residuals(&residuals)?;

    let mut kept_values = Vec::with_capacity(values.len());
    let mut kept_indices = Vec::with_capacity(values.len());
    let mut removed = Vec::new();
    for (i, (&value, z)) in values.iter().zip(&z_scores).enumerate() {
        if z.abs() <= config.z_score_cutoff {
            kept_values.push(value);
            kept_indices.push(i);
        } else {
            removed.push(i);
        }
    }

    if kept_values.is_empty() {
        return Err(AnalysisError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    tracing::debug!(
        "Peak removal kept {} of {} samples (cutoff |z| <= {})",
        kept_values.len(),
        values.len(),
        config.z_score_cutoff
    );

    Ok(FilteredSeries {
        values: kept_values,
        indices: kept_indices,
        removed,
        trend,
        degenerate: false,
    })
}
