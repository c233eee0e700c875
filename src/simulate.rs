//! Synthetic GC pause series
//!
//! Produces a baseline of normally distributed pauses, a slow periodic
//! swing (load cycles) and a handful of injected peak-period spikes. Useful
//! for demos and for exercising the chart without production logs.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Shape of the simulated series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub samples: usize,
    /// Mean of the baseline pause (ms)
    pub base_mean: f64,
    /// Standard deviation of the baseline pause (ms)
    pub base_std_dev: f64,
    /// Amplitude of the sinusoidal load cycle (ms)
    pub periodic_amplitude: f64,
    /// Phase step per sample (radians)
    pub periodic_step: f64,
    /// Fraction of samples that receive a peak spike
    pub peak_fraction: f64,
    /// Spike size range (ms), drawn uniformly
    pub peak_min: f64,
    pub peak_max: f64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            samples: 200,
            base_mean: 10.0,
            base_std_dev: 2.0,
            periodic_amplitude: 5.0,
            periodic_step: 0.1,
            peak_fraction: 0.1,
            peak_min: 5.0,
            peak_max: 10.0,
            seed: 1,
        }
    }
}

/// Generate a pause series; identical configs give identical series
///
/// # Example
/// ```
/// use gcpause::simulate::{simulate_gc_times, SimulationConfig};
///
/// let config = SimulationConfig { samples: 50, ..SimulationConfig::default() };
/// assert_eq!(simulate_gc_times(&config), simulate_gc_times(&config));
/// assert_eq!(simulate_gc_times(&config).len(), 50);
/// ```
pub fn simulate_gc_times(config: &SimulationConfig) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut values: Vec<f64> = (0..config.samples)
        .map(|i| {
            let base = config.base_mean + config.base_std_dev * standard_normal(&mut rng);
            let periodic = config.periodic_amplitude * (i as f64 * config.periodic_step).sin();
            base + periodic
        })
        .collect();

    let peaks = ((config.samples as f64 * config.peak_fraction).round() as usize).min(config.samples);
    if peaks > 0 {
        for i in index::sample(&mut rng, config.samples, peaks) {
            values[i] += if config.peak_max > config.peak_min {
                rng.gen_range(config.peak_min..config.peak_max)
            } else {
                config.peak_min
            };
        }
    }

    tracing::debug!(
        "Simulated {} GC pauses with {} peaks (seed {})",
        config.samples,
        peaks,
        config.seed
    );

    values
}

/// Box-Muller standard normal draw
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // 1 - u keeps the log argument in (0, 1]
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
