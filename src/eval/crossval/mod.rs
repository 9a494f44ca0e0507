//! Repeated k-fold cross-validation
//!
//! One repetition partitions the dataset into k folds, evaluates the
//! algorithm on every held-out fold and sums the fold confusion counts.
//! Repeating with independent partitions yields the sample distribution the
//! significance tests need.

mod aggregator;
mod algorithm;
mod dataset;
mod distribution;
mod kfold;


pub use aggregator::{aggregate, CrossValidation};
pub use algorithm::{Algorithm, AlgorithmError, FnAlgorithm, PredictorAlgorithm};
pub use dataset::Dataset;
pub use distribution::{MetricDistribution, MetricSummary, UndefinedMetricPolicy};
pub use kfold::{Fold, KFold};
