//! Accuracy, precision, recall and F1 from binary confusion counts

use super::confusion::BinaryConfusion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification metrics compared across algorithms
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// (TP + TN) / total
    Accuracy,
    /// TP / (TP + FP)
    Precision,
    /// TP / (TP + FN)
    Recall,
    /// Harmonic mean of precision and recall
    F1,
}

impl Metric {
    /// All metrics in reporting order
    pub const ALL: [Metric; 4] = [
        Metric::Accuracy,
        Metric::Precision,
        Metric::Recall,
        Metric::F1,
    ];

    /// Get metric name as string
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Accuracy => "Accuracy",
            Metric::Precision => "Precision",
            Metric::Recall => "Recall",
            Metric::F1 => "F1",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metric values for one confusion matrix
///
/// Each value is in [0, 1], or NaN when its denominator is zero.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MetricSet {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl MetricSet {
    /// Value of one metric
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Accuracy => self.accuracy,
            Metric::Precision => self.precision,
            Metric::Recall => self.recall,
            Metric::F1 => self.f1,
        }
    }

    /// Whether the metric had a non-zero denominator
    pub fn is_defined(&self, metric: Metric) -> bool {
        !self.get(metric).is_nan()
    }

    /// Metrics that came out undefined
    pub fn undefined(&self) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|&m| !self.is_defined(m))
            .collect()
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        f64::NAN
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Compute Accuracy, Precision, Recall and F1
///
/// A zero denominator yields NaN instead of an error; F1 is NaN whenever
/// precision or recall is, or when both are zero.
pub fn compute_metrics(cm: &BinaryConfusion) -> MetricSet {
    let accuracy = ratio(cm.tp + cm.tn, cm.total());
    let precision = ratio(cm.tp, cm.tp + cm.fp);
    let recall = ratio(cm.tp, cm.tp + cm.fn_);

    // NaN propagates through the arithmetic; only the 0/0 case needs a guard.
    let f1 = if precision + recall == 0.0 {
        f64::NAN
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    MetricSet {
        accuracy,
        precision,
        recall,
        f1,
    }
}
