//! comparar: statistically rigorous classifier comparison.
//!
//! Runs repeated k-fold cross-validation for every (dataset, algorithm) pair,
//! turns the per-repetition confusion counts into metric distributions, runs
//! Welch t-tests between every pair of algorithms for every metric, and
//! tallies significant wins into a ranking.
//!
//! ## Architecture
//!
//! - `eval::classification`: confusion counts and Accuracy/Precision/Recall/F1
//! - `eval::crossval`: datasets, the `Algorithm` capability, k-fold splitting, aggregation
//! - `eval::significance`: Welch t-test and pairwise matrices
//! - `eval::tally`: win counts from a pairwise matrix
//! - `compare`: the driver over datasets × algorithms and the queryable report
//! - `config`: YAML configuration and validation
//!
//! ## Example
//!
//! ```no_run
//! use comparar::{BinaryConfusion, Comparison, ComparisonConfig, Dataset, FnAlgorithm, Metric};
//!
//! let dataset = Dataset::new("toy", vec![vec![0.0]; 40], (0..40).map(|i| i % 2 == 0).collect())?;
//! let report = Comparison::new(ComparisonConfig::default())
//!     .with_dataset(dataset)
//!     .with_algorithm(FnAlgorithm::new("always-right", |ds: &Dataset, _: &[usize], test: &[usize]| {
//!         let truth: Vec<bool> = test.iter().map(|&i| ds.label(i)).collect();
//!         Ok(BinaryConfusion::from_predictions(&truth, &truth))
//!     }))
//!     .run()?;
//!
//! let tally = report.tally("toy", Metric::Accuracy);
//! # Ok::<(), comparar::Error>(())
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod eval;

pub use compare::{Comparison, ComparisonReport, DatasetComparison};
pub use config::{load_config, validate_config, ComparisonConfig, ValidationError};
pub use error::{Error, Result};
pub use eval::{
    aggregate, compute_metrics, pairwise_test, tally, welch_t_test, Algorithm, AlgorithmError,
    BinaryConfusion, CrossValidation, Dataset, FnAlgorithm, Fold, KFold, Metric,
    MetricDistribution, MetricSet, MetricSummary, PairwiseMatrix, PairwiseTest,
    PredictorAlgorithm, UndefinedMetricPolicy, WinTally,
};
