//! CLI argument parsing for gcpause

use crate::control_chart::DEFAULT_SUBGROUP_SIZE;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// Built-in GC log pause patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogPreset {
    /// G1 `[Parallel Time: X ms, GC Workers: N]`
    ParallelTime,
    /// `[Times: user=.. sys=.., real=X secs]`, converted to ms
    TimesReal,
}

#[derive(Parser, Debug)]
#[command(name = "gcpause")]
#[command(version)]
#[command(about = "Smaller-is-better control chart for GC pause times", long_about = None)]
pub struct Cli {
    /// Measurement file, one pause (ms) per line; `-` or omitted reads stdin
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Treat input as raw GC log lines and extract pause times
    #[arg(short = 'g', long = "gc-log")]
    pub gc_log: bool,

    /// Built-in pause pattern used with --gc-log
    #[arg(long = "preset", value_enum, default_value = "parallel-time")]
    pub preset: LogPreset,

    /// Custom pause regex; capture group 1 is the pause in ms (implies --gc-log)
    #[arg(long = "pattern", value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Analyze N simulated pauses instead of reading input
    #[arg(long = "simulate", value_name = "N", conflicts_with_all = ["input", "gc_log", "pattern"])]
    pub simulate: Option<usize>,

    /// Seed for --simulate
    #[arg(long = "seed", value_name = "SEED", default_value = "1")]
    pub seed: u64,

    /// Chart configuration file (TOML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Residual z-score cutoff for peak removal (default: 2.0)
    #[arg(long = "z-cutoff", value_name = "Z")]
    pub z_cutoff: Option<f64>,

    /// Control limit width in standard deviations (default: 3.0)
    #[arg(long = "sigma", value_name = "K")]
    pub sigma: Option<f64>,

    /// Fail on zero-variance data instead of collapsing the limits
    #[arg(long = "strict")]
    pub strict: bool,

    /// Include sigma-band and percentile-band grouping
    #[arg(long = "groups")]
    pub groups: bool,

    /// Include distribution shape, normality tests, family fits, IQR
    /// outliers and the log-normal subgroup chart
    #[arg(long = "distribution")]
    pub distribution: bool,

    /// Subgroup size for the log-normal subgroup chart
    #[arg(long = "subgroup-size", value_name = "N", default_value_t = DEFAULT_SUBGROUP_SIZE)]
    pub subgroup_size: usize,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Whether input lines are GC log lines rather than plain numbers
    pub fn reads_gc_log(&self) -> bool {
        self.gc_log || self.pattern.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_input() {
        let cli = Cli::parse_from(["gcpause", "ygc_cost.csv"]);
        assert_eq!(cli.input, Some(PathBuf::from("ygc_cost.csv")));
        assert!(!cli.reads_gc_log());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_empty_reads_stdin() {
        let cli = Cli::parse_from(["gcpause"]);
        assert!(cli.input.is_none());
        assert!(cli.simulate.is_none());
    }

    #[test]
    fn test_cli_gc_log_flag() {
        let cli = Cli::parse_from(["gcpause", "-g", "gc.log"]);
        assert!(cli.reads_gc_log());
        assert_eq!(cli.preset, LogPreset::ParallelTime);
    }

    #[test]
    fn test_cli_preset() {
        let cli = Cli::parse_from(["gcpause", "-g", "--preset", "times-real", "gc.log"]);
        assert_eq!(cli.preset, LogPreset::TimesReal);
    }

    #[test]
    fn test_cli_pattern_implies_gc_log() {
        let cli = Cli::parse_from(["gcpause", "--pattern", r"pause=(\d+)", "gc.log"]);
        assert!(cli.reads_gc_log());
    }

    #[test]
    fn test_cli_simulate() {
        let cli = Cli::parse_from(["gcpause", "--simulate", "200", "--seed", "7"]);
        assert_eq!(cli.simulate, Some(200));
        assert_eq!(cli.seed, 7);
    }

    #[test]
    fn test_cli_simulate_conflicts_with_input() {
        assert!(Cli::try_parse_from(["gcpause", "--simulate", "10", "data.csv"]).is_err());
    }

    #[test]
    fn test_cli_seed_default() {
        let cli = Cli::parse_from(["gcpause", "--simulate", "10"]);
        assert_eq!(cli.seed, 1);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "gcpause",
            "--z-cutoff",
            "2.5",
            "--sigma",
            "2",
            "--strict",
            "--format",
            "json",
            "data.csv",
        ]);
        assert_eq!(cli.z_cutoff, Some(2.5));
        assert_eq!(cli.sigma, Some(2.0));
        assert!(cli.strict);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_analysis_sections_default_off() {
        let cli = Cli::parse_from(["gcpause", "data.csv"]);
        assert!(!cli.groups);
        assert!(!cli.distribution);
        assert!(!cli.debug);
        assert_eq!(cli.subgroup_size, 5);
    }

    #[test]
    fn test_cli_subgroup_size() {
        let cli = Cli::parse_from(["gcpause", "--distribution", "--subgroup-size", "8"]);
        assert!(cli.distribution);
        assert_eq!(cli.subgroup_size, 8);
    }
}
