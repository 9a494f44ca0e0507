//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::ComparisonConfig;
use crate::eval::Metric;
use proptest::prelude::*;

fn arb_metrics() -> impl Strategy<Value = Vec<Metric>> {
    Just(Metric::ALL.to_vec())
        .prop_shuffle()
        .prop_flat_map(|all| (1usize..=4).prop_map(move |n| all[..n].to_vec()))
}

fn arb_valid_config() -> impl Strategy<Value = ComparisonConfig> {
    (
        2usize..50,   // folds
        1usize..50,   // repetitions
        any::<u64>(), // seed
        any::<bool>(),
        1e-6f64..0.5, // threshold
        arb_metrics(),
    )
        .prop_map(
            |(folds, repetitions, seed, stratified, threshold, metrics)| ComparisonConfig {
                folds,
                repetitions,
                seed,
                stratified,
                threshold,
                metrics,
                ..Default::default()
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_single_fold_fails(config in arb_valid_config(), folds in 0usize..2) {
        let mut config = config;
        config.folds = folds;
        prop_assert_eq!(validate_config(&config), Err(ValidationError::InvalidFolds(folds)));
    }

    #[test]
    fn prop_threshold_out_of_range_fails(config in arb_valid_config(), threshold in 1.0f64..10.0) {
        let config = config.with_threshold(threshold);
        let invalid = matches!(validate_config(&config), Err(ValidationError::InvalidThreshold(_)));
        prop_assert!(invalid);
    }

    #[test]
    fn prop_repeated_metric_fails(config in arb_valid_config()) {
        let mut config = config;
        let first = config.metrics[0];
        config.metrics.push(first);
        prop_assert_eq!(validate_config(&config), Err(ValidationError::DuplicateMetric(first)));
    }
}
