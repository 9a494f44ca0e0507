//! Statistical comparison engine
//!
//! Data flows strictly forward:
//! per-fold confusion counts → metric values → repetition distributions →
//! pairwise t-tests → win counts.
//!
//! ## Architecture
//!
//! - `classification`: binary confusion counts, Accuracy/Precision/Recall/F1
//! - `crossval`: datasets, the `Algorithm` capability, repeated k-fold aggregation
//! - `significance`: Welch t-test, pairwise matrices
//! - `tally`: significant wins per algorithm
//!
//! ## Example
//!
//! ```ignore
//! use comparar::eval::{aggregate, tally, CrossValidation, Metric, PairwiseMatrix, UndefinedMetricPolicy};
//!
//! let cv = CrossValidation::new(10, 10);
//! let a = aggregate(&dataset, &forest, &cv)?;
//! let b = aggregate(&dataset, &logistic, &cv)?;
//! let matrix = PairwiseMatrix::compute(dataset.name(), Metric::F1, [&a, &b], UndefinedMetricPolicy::Exclude)?;
//! println!("{}", tally(&matrix, 0.05)?);
//! ```

pub mod classification;
pub mod crossval;
pub mod significance;
pub mod tally;

pub use classification::{compute_metrics, BinaryConfusion, Metric, MetricSet};
pub use crossval::{
    aggregate, Algorithm, AlgorithmError, CrossValidation, Dataset, FnAlgorithm, Fold, KFold,
    MetricDistribution, MetricSummary, PredictorAlgorithm, UndefinedMetricPolicy,
};
pub use significance::{pairwise_test, welch_t_test, PairwiseMatrix, PairwiseTest};
pub use tally::{tally, WinTally};
