//! Normal-distribution grouping of pause times
//!
//! Buckets every sample by its distance from the mean, either in whole
//! sigma bands or in bands approximating normal percentiles.

use crate::series::{mean, population_std};
use serde::Serialize;

/// |z| upper bounds for the percentile bands 0-50%, 50-84%, 84-97%
const PERCENTILE_Z_BOUNDS: [f64; 3] = [0.67, 1.0, 2.0];
const PERCENTILE_LABELS: [&str; 4] = ["0-50%", "50-84%", "84-97%", "97-100%"];

const SIGMA_LABELS: [&str; 4] = [
    "center (μ ± 1σ)",
    "first (μ ± 2σ)",
    "second (μ ± 3σ)",
    "extreme (> 3σ)",
];

/// Samples falling into one band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueGroup {
    pub label: &'static str,
    pub values: Vec<f64>,
}

/// Per-band summary for reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub label: &'static str,
    pub count: usize,
    /// Share of all samples, in percent
    pub percentage: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Group by |x - μ| in multiples of σ: ≤1σ, ≤2σ, ≤3σ, beyond
pub fn group_by_standard_deviation(values: &[f64]) -> Vec<ValueGroup> {
    let (mean, std) = center_and_spread(values);
    let mut groups = empty_groups(&SIGMA_LABELS);

    for &v in values {
        let distance = (v - mean).abs();
        let band = if distance <= std {
            0
        } else if distance <= 2.0 * std {
            1
        } else if distance <= 3.0 * std {
            2
        } else {
            3
        };
        groups[band].values.push(v);
    }

    groups
}

/// Group by |z| into bands approximating the 50 / 84 / 97 percentiles
///
/// A series without spread puts every sample in the first band.
pub fn group_by_percentage(values: &[f64]) -> Vec<ValueGroup> {
    let (mean, std) = center_and_spread(values);
    let mut groups = empty_groups(&PERCENTILE_LABELS);

    for &v in values {
        let z = if std == 0.0 { 0.0 } else { ((v - mean) / std).abs() };
        let band = PERCENTILE_Z_BOUNDS
            .iter()
            .position(|&bound| z <= bound)
            .unwrap_or(PERCENTILE_Z_BOUNDS.len());
        groups[band].values.push(v);
    }

    groups
}

/// Count, share and range of each group
pub fn summarize_groups(groups: &[ValueGroup]) -> Vec<GroupSummary> {
    let total: usize = groups.iter().map(|g| g.values.len()).sum();

    groups
        .iter()
        .map(|g| GroupSummary {
            label: g.label,
            count: g.values.len(),
            percentage: if total == 0 {
                0.0
            } else {
                g.values.len() as f64 / total as f64 * 100.0
            },
            min: g.values.iter().copied().reduce(f64::min),
            max: g.values.iter().copied().reduce(f64::max),
        })
        .collect()
}

fn center_and_spread(values: &[f64]) -> (f64, f64) {
    (
        mean(values).unwrap_or(0.0),
        population_std(values).unwrap_or(0.0),
    )
}

fn empty_groups(labels: &[&'static str; 4]) -> Vec<ValueGroup> {
    labels
        .iter()
        .map(|&label| ValueGroup {
            label,
            values: Vec::new(),
        })
        .collect()
}
