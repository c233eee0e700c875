//! gcpause - Control-chart analysis of JVM garbage-collection pause times
//!
//! This library loads GC pause series (from plain measurement files or raw
//! GC logs), removes peak-period spikes using trend residuals, computes
//! smaller-is-better control limits and grades the process. Distribution
//! analyses (normality, family fits, outliers), a log-normal subgroup chart
//! and normal grouping round out the report.

pub mod cli;
pub mod control_chart;
pub mod distribution;
pub mod error;
pub mod gc_log;
pub mod grouping;
pub mod report;
pub mod residual;
pub mod series;
pub mod simulate;
pub mod trend;

pub use control_chart::{ChartConfig, ControlChartBuilder, ControlChartParameters, PerformanceGrade};
pub use error::AnalysisError;
pub use residual::ResidualAnalyzer;
pub use series::MeasurementSeries;
