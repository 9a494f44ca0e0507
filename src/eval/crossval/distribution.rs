//! Per-repetition metric distributions

use crate::eval::classification::{compute_metrics, BinaryConfusion, Metric, MetricSet};
use serde::{Deserialize, Serialize};

/// How undefined (NaN) metric values enter a significance test
///
/// Applied identically to every algorithm so comparisons stay fair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndefinedMetricPolicy {
    /// Drop undefined values from the sample
    #[default]
    Exclude,
    /// Count undefined values as 0.0
    Zero,
}

impl UndefinedMetricPolicy {
    /// Apply the policy to one sample
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        match self {
            Self::Exclude => values.iter().copied().filter(|v| !v.is_nan()).collect(),
            Self::Zero => values
                .iter()
                .map(|&v| if v.is_nan() { 0.0 } else { v })
                .collect(),
        }
    }
}

/// Descriptive statistics of one metric over the repetitions
#[derive(Clone, Copy, Debug, Serialize)]
pub struct MetricSummary {
    /// Mean of the defined values
    pub mean: f64,
    /// Sample standard deviation of the defined values
    pub std: f64,
    pub min: f64,
    pub max: f64,
    /// Number of repetitions where the metric was defined
    pub defined: usize,
    /// Number of repetitions
    pub total: usize,
}

/// One `MetricSet` per repetition for a (dataset, algorithm) pair
#[derive(Clone, Debug, Serialize)]
pub struct MetricDistribution {
    dataset: String,
    algorithm: String,
    confusions: Vec<BinaryConfusion>,
    repetitions: Vec<MetricSet>,
}

impl MetricDistribution {
    /// Build from one aggregate confusion matrix per repetition
    pub fn from_confusions(
        dataset: impl Into<String>,
        algorithm: impl Into<String>,
        confusions: Vec<BinaryConfusion>,
    ) -> Self {
        let repetitions = confusions.iter().map(compute_metrics).collect();
        Self {
            dataset: dataset.into(),
            algorithm: algorithm.into(),
            confusions,
            repetitions,
        }
    }

    /// Build directly from metric values, without confusion counts
    pub fn from_metric_sets(
        dataset: impl Into<String>,
        algorithm: impl Into<String>,
        repetitions: Vec<MetricSet>,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            algorithm: algorithm.into(),
            confusions: Vec::new(),
            repetitions,
        }
    }

    /// Dataset name
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Algorithm name
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Number of repetitions
    pub fn len(&self) -> usize {
        self.repetitions.len()
    }

    /// Whether there are no repetitions
    pub fn is_empty(&self) -> bool {
        self.repetitions.is_empty()
    }

    /// Metric sets in repetition order
    pub fn repetitions(&self) -> &[MetricSet] {
        &self.repetitions
    }

    /// Aggregate confusion counts in repetition order (empty if built from metric sets)
    pub fn confusions(&self) -> &[BinaryConfusion] {
        &self.confusions
    }

    /// Raw values of one metric, NaN included
    pub fn values(&self, metric: Metric) -> Vec<f64> {
        self.repetitions.iter().map(|m| m.get(metric)).collect()
    }

    /// Values of one metric after applying the undefined-metric policy
    pub fn sample(&self, metric: Metric, policy: UndefinedMetricPolicy) -> Vec<f64> {
        policy.apply(&self.values(metric))
    }

    /// Number of repetitions where `metric` was undefined
    pub fn undefined_count(&self, metric: Metric) -> usize {
        self.repetitions
            .iter()
            .filter(|m| !m.is_defined(metric))
            .count()
    }

    /// Mean of the defined values of one metric (NaN if none)
    pub fn mean(&self, metric: Metric) -> f64 {
        self.summary(metric).mean
    }

    /// Summary statistics of one metric, undefined values skipped
    pub fn summary(&self, metric: Metric) -> MetricSummary {
        let defined = UndefinedMetricPolicy::Exclude.apply(&self.values(metric));
        let n = defined.len();
        if n == 0 {
            return MetricSummary {
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                defined: 0,
                total: self.len(),
            };
        }

        let mean = defined.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let variance =
                defined.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        MetricSummary {
            mean,
            std,
            min: defined.iter().copied().fold(f64::INFINITY, f64::min),
            max: defined.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            defined: n,
            total: self.len(),
        }
    }
}
