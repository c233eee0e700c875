//! Loading pause measurements from files and raw GC logs
//!
//! Two input shapes are supported:
//! - measurement files: one duration in milliseconds per line, `#` comments
//! - raw GC log lines: durations extracted with a regular expression whose
//!   first capture group is the pause time

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// G1 young pause marker: `[Parallel Time: 12.3 ms, GC Workers: 8]`
pub const PARALLEL_TIME_PATTERN: &str = r"\[Parallel\s+Time:\s+(.+?)\s+ms,\s+GC\s+Workers:\s+\d+\]";

/// Wall-clock pause from `[Times: user=0.05 sys=0.00, real=0.01 secs]`
pub const TIMES_REAL_PATTERN: &str = r"\[Times:\s+user=.*?\s+sys=.*?,\s+real=(.+?)\s+secs\]";

/// Extracts pause durations from GC log lines
#[derive(Debug, Clone)]
pub struct PauseExtractor {
    regex: Regex,
    /// Multiplier converting the captured number to milliseconds
    to_millis: f64,
}

/// Result of scanning a GC log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub values: Vec<f64>,
    /// 1-based line numbers that did not yield a pause time
    pub skipped_lines: Vec<usize>,
}

impl PauseExtractor {
    /// Extractor for G1 `[Parallel Time: ... ms]` entries
    pub fn parallel_time() -> Self {
        Self {
            regex: Regex::new(PARALLEL_TIME_PATTERN).expect("built-in pattern is valid"),
            to_millis: 1.0,
        }
    }

    /// Extractor for `[Times: ... real=... secs]` entries, converted to ms
    pub fn times_real() -> Self {
        Self {
            regex: Regex::new(TIMES_REAL_PATTERN).expect("built-in pattern is valid"),
            to_millis: 1000.0,
        }
    }

    /// Custom pattern; capture group 1 must hold a duration in milliseconds
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let regex =
            Regex::new(pattern).with_context(|| format!("Invalid pause pattern: {}", pattern))?;
        if regex.captures_len() < 2 {
            bail!(
                "Pause pattern must contain a capture group for the duration: {}",
                pattern
            );
        }
        Ok(Self {
            regex,
            to_millis: 1.0,
        })
    }

    /// Pause time in milliseconds from a single line
    pub fn extract(&self, line: &str) -> Option<f64> {
        let captured = self.regex.captures(line)?.get(1)?.as_str().trim();
        let value: f64 = captured.parse().ok()?;
        value.is_finite().then_some(value * self.to_millis)
    }

    /// Scan every line, skipping (and logging) lines without a pause.
    ///
    /// Lines are decoded lossily: invalid UTF-8 never aborts the scan, and a
    /// line that is nothing but garbage bytes is recorded as skipped.
    pub fn extract_all<R: BufRead>(&self, mut reader: R) -> Result<Extraction> {
        let mut extraction = Extraction::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .with_context(|| format!("Failed to read GC log line {}", line_no + 1))?;
            if read == 0 {
                break;
            }
            line_no += 1;

            let decoded = String::from_utf8_lossy(&buf);
            let line = decoded.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                continue;
            }
            match self.extract(line) {
                Some(value) => extraction.values.push(value),
                None => {
                    tracing::warn!("No pause time on GC log line {}: {}", line_no, line);
                    extraction.skipped_lines.push(line_no);
                }
            }
        }

        tracing::debug!(
            "Extracted {} pause times, skipped {} lines",
            extraction.values.len(),
            extraction.skipped_lines.len()
        );

        Ok(extraction)
    }
}

impl Default for PauseExtractor {
    fn default() -> Self {
        Self::parallel_time()
    }
}

/// Parse a measurement file: one value per line, blank and `#` lines ignored
pub fn parse_measurements<R: BufRead>(reader: R) -> Result<Vec<f64>> {
    let mut values = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", i + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let value: f64 = trimmed
            .parse()
            .with_context(|| format!("Line {}: not a number: {:?}", i + 1, trimmed))?;
        if !value.is_finite() {
            bail!("Line {}: value is not finite: {}", i + 1, trimmed);
        }
        values.push(value);
    }

    Ok(values)
}

/// Open `path` for buffered reading; `None` or `-` reads stdin
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) if p != Path::new("-") => {
            let file =
                File::open(p).with_context(|| format!("Failed to open {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}
