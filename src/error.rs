//! Error types for control-chart analysis
//!
//! The numerical core never retries and never returns partial results: every
//! failure is surfaced to the caller as one of these variants.

use thiserror::Error;

/// Errors raised by the analysis core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data: need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Length mismatch: {observed} observed values vs {predicted} predicted values")]
    LengthMismatch { observed: usize, predicted: usize },

    #[error("Non-finite value at index {index}")]
    NonFiniteValue { index: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Transform failed: {0}")]
    Transform(#[from] u_numflow::transforms::TransformError),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
