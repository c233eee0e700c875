// Process performance grading
//
// The grade is driven by the share of ORIGINAL samples (peaks included) that
// fall outside the control limits computed from the filtered samples.

use crate::control_chart::config::GradeThresholds;
use crate::control_chart::limits::ControlChartParameters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-level ordinal grade, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerformanceGrade {
    Excellent,
    Good,
    Acceptable,
    NeedsImprovement,
}

impl PerformanceGrade {
    /// Map an out-of-control ratio to a grade using strict `<` comparisons
    ///
    /// # Example
    /// ```
    /// use gcpause::control_chart::{GradeThresholds, PerformanceGrade};
    ///
    /// let t = GradeThresholds::default();
    /// assert_eq!(PerformanceGrade::from_ratio(0.0099, &t), PerformanceGrade::Excellent);
    /// assert_eq!(PerformanceGrade::from_ratio(0.01, &t), PerformanceGrade::Good);
    /// assert_eq!(PerformanceGrade::from_ratio(0.10, &t), PerformanceGrade::NeedsImprovement);
    /// ```
    pub fn from_ratio(ratio: f64, thresholds: &GradeThresholds) -> Self {
        if ratio < thresholds.excellent {
            Self::Excellent
        } else if ratio < thresholds.good {
            Self::Good
        } else if ratio < thresholds.acceptable {
            Self::Acceptable
        } else {
            Self::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Acceptable => "Acceptable",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for PerformanceGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Positions of samples strictly outside [LCL, UCL]
pub fn out_of_control_indices(values: &[f64], params: &ControlChartParameters) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| params.is_out_of_control(v))
        .map(|(i, _)| i)
        .collect()
}

/// Fraction of samples strictly outside the limits (0.0 for no samples)
pub fn out_of_control_ratio(values: &[f64], params: &ControlChartParameters) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    out_of_control_indices(values, params).len() as f64 / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(lcl: f64, ucl: f64) -> ControlChartParameters {
        ControlChartParameters {
            mean: (lcl + ucl) / 2.0,
            std_dev: (ucl - lcl) / 6.0,
            lower_control_limit: lcl,
            upper_control_limit: ucl,
        }
    }

    #[test]
    fn test_grade_boundaries_strict() {
        let t = GradeThresholds::default();
        assert_eq!(PerformanceGrade::from_ratio(0.0, &t), PerformanceGrade::Excellent);
        assert_eq!(PerformanceGrade::from_ratio(0.00999, &t), PerformanceGrade::Excellent);
        assert_eq!(PerformanceGrade::from_ratio(0.01, &t), PerformanceGrade::Good);
        assert_eq!(PerformanceGrade::from_ratio(0.049, &t), PerformanceGrade::Good);
        assert_eq!(PerformanceGrade::from_ratio(0.05, &t), PerformanceGrade::Acceptable);
        assert_eq!(PerformanceGrade::from_ratio(0.0999, &t), PerformanceGrade::Acceptable);
        assert_eq!(
            PerformanceGrade::from_ratio(0.10, &t),
            PerformanceGrade::NeedsImprovement
        );
        assert_eq!(
            PerformanceGrade::from_ratio(1.0, &t),
            PerformanceGrade::NeedsImprovement
        );
    }

    #[test]
    fn test_ratio_arithmetic_matches_literals() {
        let p = params(0.0, 10.0);
        let mut values = vec![5.0; 99];
        values.push(50.0);
        assert_eq!(out_of_control_ratio(&values, &p), 0.01);

        let mut values = vec![5.0; 9];
        values.push(50.0);
        assert_eq!(out_of_control_ratio(&values, &p), 0.1);
    }

    #[test]
    fn test_out_of_control_indices() {
        let p = params(2.0, 8.0);
        let values = [1.0, 2.0, 5.0, 8.0, 9.0];
        assert_eq!(out_of_control_indices(&values, &p), vec![0, 4]);
    }

    #[test]
    fn test_ratio_empty() {
        assert_eq!(out_of_control_ratio(&[], &params(0.0, 1.0)), 0.0);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = GradeThresholds {
            excellent: 0.0,
            good: 0.2,
            acceptable: 0.5,
        };
        // Nothing is strictly below zero
        assert_eq!(PerformanceGrade::from_ratio(0.0, &t), PerformanceGrade::Good);
        assert_eq!(PerformanceGrade::from_ratio(0.3, &t), PerformanceGrade::Acceptable);
    }

    #[test]
    fn test_grade_ordering_and_display() {
        assert!(PerformanceGrade::Excellent < PerformanceGrade::NeedsImprovement);
        assert_eq!(PerformanceGrade::NeedsImprovement.to_string(), "Needs Improvement");
    }
}
