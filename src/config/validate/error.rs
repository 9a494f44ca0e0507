//! Validation error types

use crate::eval::Metric;

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid folds: {0} (must be >= 2)")]
    InvalidFolds(usize),

    #[error("Invalid repetitions: {0} (must be > 0)")]
    InvalidRepetitions(usize),

    #[error("Invalid significance threshold: {0} (must be in (0.0, 1.0))")]
    InvalidThreshold(f64),

    #[error("Metric list cannot be empty")]
    EmptyMetrics,

    #[error("Metric listed more than once: {0}")]
    DuplicateMetric(Metric),
}
