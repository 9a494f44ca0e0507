//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::ComparisonConfig;
use std::collections::BTreeSet;

/// Validate a comparison config
///
/// Checks:
/// - fold and repetition counts are usable
/// - the threshold is a probability strictly between 0 and 1
/// - at least one metric, none repeated
///
/// `folds <= n_samples` depends on the dataset and is checked per dataset
/// when a run starts.
pub fn validate_config(config: &ComparisonConfig) -> Result<(), ValidationError> {
    if config.folds < 2 {
        return Err(ValidationError::InvalidFolds(config.folds));
    }

    if config.repetitions == 0 {
        return Err(ValidationError::InvalidRepetitions(config.repetitions));
    }

    // NaN fails both comparisons
    if !(config.threshold > 0.0 && config.threshold < 1.0) {
        return Err(ValidationError::InvalidThreshold(config.threshold));
    }

    if config.metrics.is_empty() {
        return Err(ValidationError::EmptyMetrics);
    }

    let mut seen = BTreeSet::new();
    for &metric in &config.metrics {
        if !seen.insert(metric) {
            return Err(ValidationError::DuplicateMetric(metric));
        }
    }

    Ok(())
}
