//! YAML schema for comparison runs

use crate::error::{Error, Result};
use crate::eval::{CrossValidation, Metric, UndefinedMetricPolicy};
use serde::{Deserialize, Serialize};

/// Settings for a full comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    /// Folds per repetition
    pub folds: usize,

    /// Independent repetitions of the k-fold run
    pub repetitions: usize,

    /// Base seed for fold shuffling
    pub seed: u64,

    /// Keep class balance in every fold
    pub stratified: bool,

    /// Run repetitions and datasets on the rayon pool
    pub parallel: bool,

    /// Significance threshold for a win (strict `p < threshold`)
    pub threshold: f64,

    /// How undefined metric values enter the t-test
    pub undefined_policy: UndefinedMetricPolicy,

    /// Metrics to test and tally, in report order
    pub metrics: Vec<Metric>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        let cv = CrossValidation::default();
        Self {
            folds: cv.folds,
            repetitions: cv.repetitions,
            seed: cv.seed,
            stratified: cv.stratified,
            parallel: cv.parallel,
            threshold: 0.05,
            undefined_policy: UndefinedMetricPolicy::default(),
            metrics: Metric::ALL.to_vec(),
        }
    }
}

impl ComparisonConfig {
    /// Parse a YAML document without validating it
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))
    }

    /// Cross-validation settings carried by this config
    pub fn cross_validation(&self) -> CrossValidation {
        CrossValidation {
            folds: self.folds,
            repetitions: self.repetitions,
            seed: self.seed,
            stratified: self.stratified,
            parallel: self.parallel,
        }
    }

    /// Set the metrics to test
    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = Metric>) -> Self {
        self.metrics = metrics.into_iter().collect();
        self
    }

    /// Set the significance threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the undefined-metric policy
    pub fn with_undefined_policy(mut self, policy: UndefinedMetricPolicy) -> Self {
        self.undefined_policy = policy;
        self
    }

    /// Replace the cross-validation settings
    pub fn with_cross_validation(mut self, cv: CrossValidation) -> Self {
        self.folds = cv.folds;
        self.repetitions = cv.repetitions;
        self.seed = cv.seed;
        self.stratified = cv.stratified;
        self.parallel = cv.parallel;
        self
    }
}
