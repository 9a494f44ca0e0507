//! Error types with actionable diagnostics.
//!
//! Every fatal condition carries enough context (dataset, algorithm, metric,
//! repetition, fold) to reproduce it. Undefined metrics are not errors: they
//! travel as NaN through `MetricSet`.

use crate::config::ValidationError;
use crate::eval::Metric;
use thiserror::Error;

/// Result type alias for comparar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the comparison engine.
#[derive(Error, Debug)]
pub enum Error {
    /// A caller supplied an out-of-range or inconsistent argument.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration parsed but failed validation.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// The external classifier failed on one fold of one repetition.
    #[error(
        "Algorithm '{algorithm}' failed on dataset '{dataset}' (repetition {repetition}, fold {fold}): {message}\n  → No partial distribution was kept for this pair"
    )]
    AlgorithmEvaluation {
        dataset: String,
        algorithm: String,
        repetition: usize,
        fold: usize,
        message: String,
    },

    /// Too few defined metric values to run a t-test.
    #[error("Insufficient sample size: {valid} defined values, need at least {required}\n  → Increase repetitions or use the `zero` undefined-metric policy")]
    InsufficientSampleSize { valid: usize, required: usize },

    /// Two distributions with different repetition counts were compared.
    #[error("Inconsistent distribution lengths: {left} vs {right} repetitions")]
    InconsistentDistributionLength { left: usize, right: usize },

    /// A pairwise test failed; wraps the cause with its location.
    #[error("Pairwise test failed on dataset '{dataset}', metric {metric}, {algorithm_a} vs {algorithm_b}: {source}")]
    Pairwise {
        dataset: String,
        metric: Metric,
        algorithm_a: String,
        algorithm_b: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "E001",
            Self::ConfigError(_) => "E002",
            Self::Validation(_) => "E003",
            Self::AlgorithmEvaluation { .. } => "E010",
            Self::InsufficientSampleSize { .. } => "E020",
            Self::InconsistentDistributionLength { .. } => "E021",
            Self::Pairwise { source, .. } => source.code(),
        }
    }

    /// Wrap a pairwise failure with the cell it happened in.
    pub(crate) fn in_pair(
        self,
        dataset: &str,
        metric: Metric,
        algorithm_a: &str,
        algorithm_b: &str,
    ) -> Self {
        Self::Pairwise {
            dataset: dataset.to_string(),
            metric,
            algorithm_a: algorithm_a.to_string(),
            algorithm_b: algorithm_b.to_string(),
            source: Box::new(self),
        }
    }
}
