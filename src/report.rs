//! Text and JSON output for a pause analysis run

use crate::control_chart::{ControlChartAnalysis, SubgroupChart};
use crate::distribution::{DistributionSummary, NormalityTest};
use crate::grouping::GroupSummary;
use anyhow::{Context, Result};
use serde::Serialize;

/// Where the measurements came from
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputSource {
    File { path: String },
    Stdin,
    GcLog { path: String, skipped_lines: usize },
    Simulated { samples: usize, seed: u64 },
}

/// Grouping results for both band schemes
#[derive(Debug, Clone, Serialize)]
pub struct GroupingReport {
    pub sigma_bands: Vec<GroupSummary>,
    pub percentile_bands: Vec<GroupSummary>,
}

/// Complete result of one run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: InputSource,
    pub control_chart: ControlChartAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgroup_chart: Option<SubgroupChart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<GroupingReport>,
}

impl AnalysisReport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize analysis report")
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!("Source: {}\n\n", self.source.describe()));
        report.push_str(&self.control_chart.to_report_string());

        if let Some(dist) = &self.distribution {
            push_distribution(&mut report, dist);
        }

        if let Some(chart) = &self.subgroup_chart {
            push_subgroup_chart(&mut report, chart);
        }

        if let Some(grouping) = &self.grouping {
            report.push_str("\n=== Sigma Bands ===\n\n");
            push_groups(&mut report, &grouping.sigma_bands);
            report.push_str("\n=== Percentile Bands ===\n\n");
            push_groups(&mut report, &grouping.percentile_bands);
        }

        report
    }
}

impl InputSource {
    fn describe(&self) -> String {
        match self {
            Self::File { path } => path.clone(),
            Self::Stdin => "stdin".to_string(),
            Self::GcLog {
                path,
                skipped_lines,
            } => format!("{} (GC log, {} lines skipped)", path, skipped_lines),
            Self::Simulated { samples, seed } => {
                format!("simulated ({} samples, seed {})", samples, seed)
            }
        }
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}", v))
}

fn fmt_normality(test: Option<&NormalityTest>) -> String {
    match test {
        Some(t) => format!(
            "W={:.4} p={:.4} ({})",
            t.w,
            t.p_value,
            if t.normal { "normal" } else { "not normal" }
        ),
        None => "n/a".to_string(),
    }
}

fn push_distribution(report: &mut String, dist: &DistributionSummary) {
    let c = &dist.characteristics;
    report.push_str("\n=== Distribution ===\n\n");
    report.push_str(&format!("Samples:         {}\n", c.count));
    report.push_str(&format!("Min / Max:       {:.4} / {:.4}\n", c.min, c.max));
    report.push_str(&format!("Mean / Median:   {:.4} / {:.4}\n", c.mean, c.median));
    report.push_str(&format!("Std dev:         {:.4}\n", c.std_dev));
    report.push_str(&format!("Skewness:        {}\n", fmt_opt(c.skewness)));
    report.push_str(&format!("Excess kurtosis: {}\n", fmt_opt(c.excess_kurtosis)));
    let shape = dist
        .shape
        .map_or_else(|| "n/a".to_string(), |s| s.labels().join(", "));
    report.push_str(&format!("Shape:           {}\n", shape));

    report.push_str(&format!(
        "Shapiro-Wilk:    {}\n",
        fmt_normality(dist.normality.as_ref())
    ));
    match &dist.box_cox {
        Some(bc) => {
            report.push_str(&format!("Box-Cox lambda:  {:.4}", bc.lambda));
            if bc.at_bound {
                report.push_str(" (at search bound)");
            }
            if bc.shift != 0.0 {
                report.push_str(&format!(" (data shifted by {})", bc.shift));
            }
            report.push('\n');
        }
        None => report.push_str("Box-Cox lambda:  n/a\n"),
    }
    report.push_str(&format!(
        "After Box-Cox:   {}\n",
        fmt_normality(dist.transformed_normality.as_ref())
    ));

    let iqr = &dist.outliers;
    report.push_str(&format!(
        "IQR fences:      [{:.4}, {:.4}]  ({} outliers)\n",
        iqr.lower_fence,
        iqr.upper_fence,
        iqr.outliers.len()
    ));

    report.push_str("\n=== Distribution Fits (by KS p-value) ===\n\n");
    if dist.fits.is_empty() {
        report.push_str("  n/a\n");
    }
    for fit in &dist.fits {
        let params: Vec<String> = fit
            .parameters
            .iter()
            .map(|p| format!("{}={:.4}", p.name, p.value))
            .collect();
        report.push_str(&format!(
            "  {:<12} p={:.4}  D={:.4}  {}\n",
            fit.distribution,
            fit.p_value,
            fit.ks_statistic,
            params.join(" ")
        ));
    }
}

fn push_subgroup_chart(report: &mut String, chart: &SubgroupChart) {
    report.push_str("\n=== Log-normal Subgroup Chart ===\n\n");
    report.push_str(&format!(
        "Subgroups:       {} of {}\n",
        chart.subgroup_means.len(),
        chart.subgroup_size
    ));
    report.push_str(&format!(
        "Mean CL:         {:.4}\n",
        chart.mean_center_line
    ));
    report.push_str(&format!(
        "Std dev CL:      {:.4}\n",
        chart.std_dev_center_line
    ));
    report.push_str(&format!(
        "Limits:          [{:.4}, {:.4}]\n",
        chart.lower_limit, chart.upper_limit
    ));
    report.push_str(&format!(
        "Out of control:  {} subgroups\n",
        chart.out_of_control_subgroups.len()
    ));
}

fn push_groups(report: &mut String, groups: &[GroupSummary]) {
    for group in groups {
        report.push_str(&format!(
            "  {:<18} {:>6}  {:>6.2}%",
            group.label, group.count, group.percentage
        ));
        if let (Some(min), Some(max)) = (group.min, group.max) {
            report.push_str(&format!("  [{:.2} .. {:.2}] ms", min, max));
        }
        report.push('\n');
    }
}
