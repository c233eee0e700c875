// Configuration for the smaller-is-better control chart
//
// The numeric defaults reproduce the historical pause-time analysis exactly:
// a 2σ residual cutoff, 3σ control limits and 1% / 5% / 10% grade breakpoints.
// Changing any of them changes results and should be treated as such.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How to handle zero-variance data instead of leaking NaN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// No variation means every sample is in control: keep all samples during
    /// peak removal and collapse the control limits onto the mean
    #[default]
    Collapse,
    /// Surface `AnalysisError::DegenerateInput` to the caller
    Reject,
}

/// Out-of-control ratio breakpoints for `PerformanceGrade`
///
/// A ratio strictly below `excellent` grades Excellent, strictly below `good`
/// grades Good, strictly below `acceptable` grades Acceptable, anything else
/// NeedsImprovement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeThresholds {
    pub excellent: f64,
    pub good: f64,
    pub acceptable: f64,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            excellent: 0.01,
            good: 0.05,
            acceptable: 0.10,
        }
    }
}

/// Configuration for control-chart analysis
///
/// # Example
/// ```
/// use gcpause::control_chart::ChartConfig;
///
/// let config = ChartConfig::default();
/// assert_eq!(config.z_score_cutoff, 2.0);
/// assert_eq!(config.sigma_multiplier, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Samples whose |normalized residual| exceeds this are treated as peak
    /// period data and excluded from the limit computation
    ///
    /// Default: 2.0
    pub z_score_cutoff: f64,

    /// Control limits sit at mean ± sigma_multiplier · std_dev
    ///
    /// Default: 3.0
    pub sigma_multiplier: f64,

    /// Grade breakpoints on the out-of-control ratio
    pub grade_thresholds: GradeThresholds,

    /// Zero-variance handling
    pub degenerate_policy: DegeneratePolicy,

    /// Residual spread at or below `residual_tolerance · max|value|` counts as
    /// zero. Absorbs rounding noise left by fitting an exactly linear series
    /// at any scale of the data.
    ///
    /// Default: 1e-12
    pub residual_tolerance: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            z_score_cutoff: 2.0,
            sigma_multiplier: 3.0,
            grade_thresholds: GradeThresholds::default(),
            degenerate_policy: DegeneratePolicy::Collapse,
            residual_tolerance: 1e-12,
        }
    }
}

impl ChartConfig {
    /// Load configuration from a TOML file
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// ```toml
    /// z_score_cutoff = 2.5
    /// degenerate_policy = "reject"
    ///
    /// [grade_thresholds]
    /// excellent = 0.02
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid chart configuration in {}", path.display()))
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.z_score_cutoff.is_finite() && self.z_score_cutoff > 0.0) {
            return Err(format!(
                "z_score_cutoff must be positive, got {}",
                self.z_score_cutoff
            ));
        }

        if !(self.sigma_multiplier.is_finite() && self.sigma_multiplier > 0.0) {
            return Err(format!(
                "sigma_multiplier must be positive, got {}",
                self.sigma_multiplier
            ));
        }

        let t = &self.grade_thresholds;
        if !(0.0..=1.0).contains(&t.excellent)
            || !(0.0..=1.0).contains(&t.good)
            || !(0.0..=1.0).contains(&t.acceptable)
        {
            return Err(format!(
                "grade thresholds must be in [0, 1], got {}/{}/{}",
                t.excellent, t.good, t.acceptable
            ));
        }

        if !(t.excellent <= t.good && t.good <= t.acceptable) {
            return Err(format!(
                "grade thresholds must be ascending, got {}/{}/{}",
                t.excellent, t.good, t.acceptable
            ));
        }

        if self.residual_tolerance.is_nan() || self.residual_tolerance < 0.0 {
            return Err(format!(
                "residual_tolerance must be non-negative, got {}",
                self.residual_tolerance
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert_eq!(config.z_score_cutoff, 2.0);
        assert_eq!(config.sigma_multiplier, 3.0);
        assert_eq!(config.grade_thresholds.excellent, 0.01);
        assert_eq!(config.grade_thresholds.good, 0.05);
        assert_eq!(config.grade_thresholds.acceptable, 0.10);
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Collapse);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = ChartConfig::from_toml_str(
            r#"
z_score_cutoff = 2.5
degenerate_policy = "reject"

[grade_thresholds]
excellent = 0.02
"#,
        )
        .unwrap();

        assert_eq!(config.z_score_cutoff, 2.5);
        assert_eq!(config.sigma_multiplier, 3.0);
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Reject);
        assert_eq!(config.grade_thresholds.excellent, 0.02);
        assert_eq!(config.grade_thresholds.good, 0.05);
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        let config = ChartConfig::from_toml_str("").unwrap();
        assert_eq!(config, ChartConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_unknown_policy() {
        assert!(ChartConfig::from_toml_str("degenerate_policy = \"ignore\"").is_err());
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        assert!(ChartConfig::from_toml_str("sigma_multiplier = -1.0").is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_z_score_cutoff() {
        let mut config = ChartConfig::default();
        config.z_score_cutoff = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_sigma_multiplier() {
        let mut config = ChartConfig::default();
        config.sigma_multiplier = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_thresholds_must_ascend() {
        let mut config = ChartConfig::default();
        config.grade_thresholds.good = 0.005;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_thresholds_out_of_range() {
        let mut config = ChartConfig::default();
        config.grade_thresholds.acceptable = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gcpause.toml");
        fs::write(&path, "sigma_multiplier = 2.0\n").unwrap();

        let config = ChartConfig::from_file(&path).unwrap();
        assert_eq!(config.sigma_multiplier, 2.0);
    }

    #[test]
    fn test_from_file_missing() {
        assert!(ChartConfig::from_file("/nonexistent/gcpause.toml").is_err());
    }
}
