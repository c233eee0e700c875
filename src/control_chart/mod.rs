// Smaller-is-better control charts for GC pause times
//
// A pause series is first stripped of peak-period samples using the z-scores
// of its residuals against a least-squares trend line. Mean and population
// standard deviation of what remains give the center line and ±3σ limits.
// The process is then graded by the share of ALL samples (peaks included)
// that fall outside those limits.
//
// Upper limit violations are latency regressions. The lower limit is only a
// floor at zero.
//
// A second chart over fixed-size subgroups uses log-normal probability
// limits instead of ±3σ.

mod builder;
mod config;
mod grade;
mod limits;
mod peak_filter;
mod subgroup;

pub use builder::{ControlChartAnalysis, ControlChartBuilder};
pub use config::{ChartConfig, DegeneratePolicy, GradeThresholds};
pub use grade::{out_of_control_indices, out_of_control_ratio, PerformanceGrade};
pub use limits::{calculate_limits, ControlChartParameters};
pub use peak_filter::{remove_peak_data, FilteredSeries};
pub use subgroup::{
    lognormal_subgroup_chart, SubgroupChart, DEFAULT_SUBGROUP_SIZE, SUBGROUP_LIMIT_PROBABILITIES,
};
