// Smaller-is-better control chart over a GC pause series
//
// Pipeline: trend fit → residual z-scores → peak removal → limits on the
// filtered samples → grade on the original samples.

use crate::control_chart::config::ChartConfig;
use crate::control_chart::grade::{out_of_control_indices, PerformanceGrade};
use crate::control_chart::limits::{calculate_limits, ControlChartParameters};
use crate::control_chart::peak_filter::{remove_peak_data, FilteredSeries};
use crate::error::{AnalysisError, Result};
use crate::series::MeasurementSeries;
use serde::Serialize;

/// Builds control charts for one immutable measurement series
///
/// # Example
/// ```
/// use gcpause::control_chart::{ControlChartBuilder, PerformanceGrade};
/// use gcpause::series::MeasurementSeries;
///
/// let series = MeasurementSeries::new(vec![
///     10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 50.0,
/// ])
/// .unwrap();
/// let builder = ControlChartBuilder::new(series).unwrap();
/// let params = builder.calculate_smaller_is_better_control_chart().unwrap();
/// assert_eq!(params.upper_control_limit, 10.0);
/// assert_eq!(
///     builder.performance_evaluation(&params),
///     PerformanceGrade::NeedsImprovement
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ControlChartBuilder {
    series: MeasurementSeries,
    config: ChartConfig,
}

/// Everything computed for one chart, for reporting
#[derive(Debug, Clone, Serialize)]
pub struct ControlChartAnalysis {
    pub sample_count: usize,
    pub filtered: FilteredSeries,
    pub parameters: ControlChartParameters,
    /// Positions in the original series outside the limits
    pub out_of_control: Vec<usize>,
    pub out_of_control_ratio: f64,
    pub grade: PerformanceGrade,
    pub config: ChartConfig,
}

impl ControlChartBuilder {
    /// Builder with the default configuration
    pub fn new(series: MeasurementSeries) -> Result<Self> {
        Self::with_config(series, ChartConfig::default())
    }

    pub fn with_config(series: MeasurementSeries, config: ChartConfig) -> Result<Self> {
        config.validate().map_err(AnalysisError::InvalidConfig)?;
        Ok(Self { series, config })
    }

    pub fn series(&self) -> &MeasurementSeries {
        &self.series
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Samples left after dropping peak-period outliers
    pub fn remove_peak_data(&self) -> Result<FilteredSeries> {
        remove_peak_data(&self.series, &self.config)
    }

    /// Mean, std and limits from the peak-free samples
    pub fn calculate_smaller_is_better_control_chart(&self) -> Result<ControlChartParameters> {
        let filtered = self.remove_peak_data()?;
        calculate_limits(&filtered.values, &self.config)
    }

    /// Grade the ORIGINAL series against `params`
    pub fn performance_evaluation(&self, params: &ControlChartParameters) -> PerformanceGrade {
        let ratio = self.out_of_control_ratio(params);
        PerformanceGrade::from_ratio(ratio, &self.config.grade_thresholds)
    }

    /// Fraction of original samples strictly outside the limits
    pub fn out_of_control_ratio(&self, params: &ControlChartParameters) -> f64 {
        let outside = out_of_control_indices(self.series.values(), params).len();
        outside as f64 / self.series.len() as f64
    }

    /// Run the full pipeline once
    pub fn analyze(&self) -> Result<ControlChartAnalysis> {
        let filtered = self.remove_peak_data()?;
        let parameters = calculate_limits(&filtered.values, &self.config)?;
        let out_of_control = out_of_control_indices(self.series.values(), &parameters);
        let out_of_control_ratio = out_of_control.len() as f64 / self.series.len() as f64;
        let grade = PerformanceGrade::from_ratio(out_of_control_ratio, &self.config.grade_thresholds);

        tracing::info!(
            "Control chart: {} of {} samples out of control ({:.2}%), grade {}",
            out_of_control.len(),
            self.series.len(),
            out_of_control_ratio * 100.0,
            grade
        );

        Ok(ControlChartAnalysis {
            sample_count: self.series.len(),
            filtered,
            parameters,
            out_of_control,
            out_of_control_ratio,
            grade,
            config: self.config.clone(),
        })
    }
}

impl ControlChartAnalysis {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        let p = &self.parameters;

        report.push_str("=== GC Pause Control Chart (smaller is better) ===\n\n");
        report.push_str(&format!("Samples:              {}\n", self.sample_count));
        report.push_str(&format!(
            "Peak samples removed: {} (|z| > {})\n",
            self.filtered.removed.len(),
            self.config.z_score_cutoff
        ));
        report.push_str(&format!(
            "Trend:                {:.4} ms/sample, intercept {:.2} ms\n",
            self.filtered.trend.slope, self.filtered.trend.intercept
        ));
        if self.filtered.degenerate {
            report.push_str("Residuals had no spread; no samples filtered\n");
        }
        report.push('\n');

        report.push_str(&format!("Mean GC pause:        {:.2} ms\n", p.mean));
        report.push_str(&format!("Std deviation:        {:.2} ms\n", p.std_dev));
        report.push_str(&format!(
            "Lower control limit:  {:.2} ms\n",
            p.lower_control_limit
        ));
        report.push_str(&format!(
            "Upper control limit:  {:.2} ms ({}σ)\n",
            p.upper_control_limit, self.config.sigma_multiplier
        ));
        report.push('\n');

        report.push_str(&format!(
            "Out of control:       {} ({:.2}%)\n",
            self.out_of_control.len(),
            self.out_of_control_ratio * 100.0
        ));
        report.push_str(&format!("Performance grade:    {}\n", self.grade));

        report
    }
}
