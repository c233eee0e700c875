use anyhow::{Context, Result};
use clap::Parser;
use gcpause::cli::{Cli, LogPreset, OutputFormat};
use gcpause::control_chart::{
    lognormal_subgroup_chart, ChartConfig, ControlChartBuilder, DegeneratePolicy, SubgroupChart,
};
use gcpause::distribution;
use gcpause::error::AnalysisError;
use gcpause::gc_log::{self, PauseExtractor};
use gcpause::grouping::{group_by_percentage, group_by_standard_deviation, summarize_groups};
use gcpause::report::{AnalysisReport, GroupingReport, InputSource};
use gcpause::series::MeasurementSeries;
use gcpause::simulate::{simulate_gc_times, SimulationConfig};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Config file (if any) with command-line overrides applied
fn build_config(args: &Cli) -> Result<ChartConfig> {
    let mut config = match &args.config {
        Some(path) => ChartConfig::from_file(path)?,
        None => ChartConfig::default(),
    };

    if let Some(z) = args.z_cutoff {
        config.z_score_cutoff = z;
    }
    if let Some(k) = args.sigma {
        config.sigma_multiplier = k;
    }
    if args.strict {
        config.degenerate_policy = DegeneratePolicy::Reject;
    }

    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}

/// Read measurements from the requested source
fn load_measurements(args: &Cli) -> Result<(Vec<f64>, InputSource)> {
    if let Some(samples) = args.simulate {
        let config = SimulationConfig {
            samples,
            seed: args.seed,
            ..SimulationConfig::default()
        };
        return Ok((
            simulate_gc_times(&config),
            InputSource::Simulated {
                samples,
                seed: args.seed,
            },
        ));
    }

    let path = args.input.as_deref().filter(|p| *p != Path::new("-"));
    let reader = gc_log::open_input(path)?;
    let label = path.map(|p| p.display().to_string());

    if args.reads_gc_log() {
        let extractor = match (&args.pattern, args.preset) {
            (Some(pattern), _) => PauseExtractor::from_pattern(pattern)?,
            (None, LogPreset::ParallelTime) => PauseExtractor::parallel_time(),
            (None, LogPreset::TimesReal) => PauseExtractor::times_real(),
        };
        let extraction = extractor.extract_all(reader)?;
        let source = InputSource::GcLog {
            path: label.unwrap_or_else(|| "stdin".to_string()),
            skipped_lines: extraction.skipped_lines.len(),
        };
        return Ok((extraction.values, source));
    }

    let values = gc_log::parse_measurements(reader)?;
    let source = match label {
        Some(path) => InputSource::File { path },
        None => InputSource::Stdin,
    };
    Ok((values, source))
}

/// Log-normal subgroup chart; data it cannot chart is reported as absent
fn chart_subgroups(values: &[f64], subgroup_size: usize) -> Result<Option<SubgroupChart>> {
    match lognormal_subgroup_chart(values, subgroup_size) {
        Ok(chart) => Ok(Some(chart)),
        Err(e @ AnalysisError::InvalidConfig(_)) => Err(e).context("Invalid --subgroup-size"),
        Err(e) => {
            tracing::warn!("Skipping subgroup chart: {}", e);
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = build_config(&args)?;
    let (values, source) = load_measurements(&args)?;
    tracing::debug!("Loaded {} measurements", values.len());

    let series = MeasurementSeries::new(values).context("Cannot analyze measurements")?;
    let builder = ControlChartBuilder::with_config(series, config)?;
    let control_chart = builder.analyze().context("Control chart analysis failed")?;

    let values = builder.series().values();
    let (distribution, subgroup_chart) = if args.distribution {
        (
            Some(distribution::summarize(values).context("Distribution analysis failed")?),
            chart_subgroups(values, args.subgroup_size)?,
        )
    } else {
        (None, None)
    };
    let grouping = args.groups.then(|| GroupingReport {
        sigma_bands: summarize_groups(&group_by_standard_deviation(values)),
        percentile_bands: summarize_groups(&group_by_percentage(values)),
    });

    let report = AnalysisReport {
        source,
        control_chart,
        distribution,
        subgroup_chart,
        grouping,
    };

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
