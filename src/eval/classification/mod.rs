//! Binary classification metrics
//!
//! Provides:
//! - `BinaryConfusion`: named TP/TN/FP/FN counts with an explicit cell layout
//! - `Metric` / `MetricSet`: Accuracy, Precision, Recall, F1
//! - `compute_metrics`: counts → metric values, NaN where undefined

mod confusion;
mod metrics;


pub use confusion::BinaryConfusion;
pub use metrics::{compute_metrics, Metric, MetricSet};
