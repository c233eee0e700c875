// Subgroup chart with log-normal probability limits
//
// Pause times are right-skewed, so ±3σ limits on subgroup means are too
// tight on the high side. This chart fits a log-normal to the individual
// pauses and uses its 2.5% and 97.5% quantiles as limits for the means of
// consecutive fixed-size subgroups.

use crate::error::{AnalysisError, Result};
use crate::series::mean;
use serde::Serialize;
use u_analytics::distribution::fit_lognormal;
use u_numflow::distributions::LogNormal;
use u_numflow::stats;

/// Lower and upper tail probabilities of the limits
pub const SUBGROUP_LIMIT_PROBABILITIES: (f64, f64) = (0.025, 0.975);

pub const DEFAULT_SUBGROUP_SIZE: usize = 5;

/// Subgroup statistics and their log-normal limits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubgroupChart {
    pub subgroup_size: usize,
    pub subgroup_means: Vec<f64>,
    /// Sample standard deviation (n - 1) of each subgroup
    pub subgroup_std_devs: Vec<f64>,
    pub mean_center_line: f64,
    pub std_dev_center_line: f64,
    /// Log-normal location (mean of ln x)
    pub lognormal_mu: f64,
    /// Log-normal shape (std of ln x)
    pub lognormal_sigma: f64,
    pub lower_limit: f64,
    pub upper_limit: f64,
    /// Subgroups whose mean lies strictly outside the limits
    pub out_of_control_subgroups: Vec<usize>,
}

/// Split `values` into consecutive subgroups and chart their means.
///
/// A trailing partial subgroup is dropped. Every value must be positive
/// for the log-normal fit.
pub fn lognormal_subgroup_chart(values: &[f64], subgroup_size: usize) -> Result<SubgroupChart> {
    if subgroup_size < 2 {
        return Err(AnalysisError::InvalidConfig(format!(
            "subgroup size must be at least 2, got {subgroup_size}"
        )));
    }
    if values.len() < subgroup_size {
        return Err(AnalysisError::InsufficientData {
            required: subgroup_size,
            actual: values.len(),
        });
    }

    let fit = fit_lognormal(values).ok_or_else(|| {
        AnalysisError::DegenerateInput(
            "log-normal fit needs positive values with nonzero spread".to_string(),
        )
    })?;
    let param = |name: &str| {
        fit.parameters
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
            .ok_or_else(|| {
                AnalysisError::DegenerateInput(format!("log-normal fit has no {name} parameter"))
            })
    };
    let (mu, sigma) = (param("mu")?, param("sigma")?);
    let dist = LogNormal::new(mu, sigma)
        .map_err(|e| AnalysisError::DegenerateInput(format!("log-normal fit: {e}")))?;

    let (lower_p, upper_p) = SUBGROUP_LIMIT_PROBABILITIES;
    let quantile = |p: f64| {
        dist.quantile(p).ok_or_else(|| {
            AnalysisError::DegenerateInput(format!("log-normal quantile {p} is undefined"))
        })
    };
    let lower_limit = quantile(lower_p)?;
    let upper_limit = quantile(upper_p)?;

    let chunks = values.chunks_exact(subgroup_size);
    if !chunks.remainder().is_empty() {
        tracing::debug!(
            "Dropping {} trailing values that do not fill a subgroup",
            chunks.remainder().len()
        );
    }
    let (subgroup_means, subgroup_std_devs): (Vec<f64>, Vec<f64>) = chunks
        .map(|group| {
            (
                mean(group).unwrap_or(0.0),
                stats::std_dev(group).unwrap_or(0.0),
            )
        })
        .unzip();

    let out_of_control_subgroups = subgroup_means
        .iter()
        .enumerate()
        .filter(|(_, &m)| m < lower_limit || m > upper_limit)
        .map(|(i, _)| i)
        .collect();

    let chart = SubgroupChart {
        subgroup_size,
        mean_center_line: mean(&subgroup_means).unwrap_or(0.0),
        std_dev_center_line: mean(&subgroup_std_devs).unwrap_or(0.0),
        lognormal_mu: mu,
        lognormal_sigma: sigma,
        lower_limit,
        upper_limit,
        out_of_control_subgroups,
        subgroup_means,
        subgroup_std_devs,
    };

    tracing::debug!(
        "Subgroup chart: {} subgroups of {}, limits [{:.3}, {:.3}]",
        chart.subgroup_means.len(),
        subgroup_size,
        lower_limit,
        upper_limit
    );

    Ok(chart)
}
