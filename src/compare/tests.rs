//! Tests for the comparison driver and report

use super::*;
use crate::config::{ComparisonConfig, ValidationError};
use crate::error::Error;
use crate::eval::{
    AlgorithmError, CrossValidation, Dataset, FnAlgorithm, Metric, PredictorAlgorithm,
    UndefinedMetricPolicy,
};
use approx::assert_abs_diff_eq;

fn dataset(name: &str, n: usize) -> Dataset {
    Dataset::new(
        name,
        (0..n).map(|i| vec![i as f64]).collect(),
        (0..n).map(|i| i % 4 == 0).collect(),
    )
    .unwrap()
}

fn config() -> ComparisonConfig {
    ComparisonConfig::default().with_cross_validation(CrossValidation::new(5, 6))
}

fn oracle() -> impl crate::eval::Algorithm {
    PredictorAlgorithm::new("oracle", |ds: &Dataset, _train: &[usize], test: &[usize]| {
        Ok(ds.labels_at(test))
    })
}

fn always_positive() -> impl crate::eval::Algorithm {
    PredictorAlgorithm::new(
        "always-positive",
        |_ds: &Dataset, _train: &[usize], test: &[usize]| Ok(vec![true; test.len()]),
    )
}

fn always_negative() -> impl crate::eval::Algorithm {
    PredictorAlgorithm::new(
        "always-negative",
        |_ds: &Dataset, _train: &[usize], test: &[usize]| Ok(vec![false; test.len()]),
    )
}

#[test]
fn test_oracle_beats_constant_predictor() {
    let report = Comparison::new(config())
        .with_dataset(dataset("quarter", 40))
        .with_algorithm(oracle())
        .with_algorithm(always_positive())
        .run()
        .unwrap();

    assert!(report.is_complete());

    let accuracy = report.tally("quarter", Metric::Accuracy).unwrap();
    assert_eq!(accuracy.wins_of("oracle"), Some(1));
    assert_eq!(accuracy.wins_of("always-positive"), Some(0));

    // both have recall 1 in every repetition
    let recall = report.tally("quarter", Metric::Recall).unwrap();
    assert_eq!(recall.wins_of("oracle"), Some(0));
    assert_eq!(recall.wins_of("always-positive"), Some(0));

    let summary = report
        .summary("quarter", "always-positive", Metric::Accuracy)
        .unwrap();
    assert_abs_diff_eq!(summary.mean, 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.std, 0.0, epsilon = 1e-12);
    assert_eq!(summary.total, 6);

    let matrix = report.matrix("quarter", Metric::Accuracy).unwrap();
    assert_eq!(matrix.algorithms(), &["oracle", "always-positive"]);
    assert_eq!(
        report
            .distribution("quarter", "oracle")
            .map(|d| d.len()),
        Some(6)
    );
}

#[test]
fn test_failing_dataset_is_isolated() {
    let picky = FnAlgorithm::new(
        "picky",
        |ds: &Dataset, _train: &[usize], test: &[usize]| {
            if ds.name() == "broken" {
                return Err(AlgorithmError::new("cannot handle this dataset"));
            }
            let truth = ds.labels_at(test);
            Ok(crate::eval::BinaryConfusion::from_predictions(&truth, &truth))
        },
    );

    let report = Comparison::new(config())
        .with_dataset(dataset("fine", 40))
        .with_dataset(dataset("broken", 40))
        .with_algorithm(picky)
        .with_algorithm(always_positive())
        .run()
        .unwrap();

    assert!(!report.is_complete());
    assert!(report.tally("fine", Metric::F1).is_some());
    assert!(report.tally("broken", Metric::F1).is_none());
    assert!(report.failure("fine").is_none());

    match report.failure("broken") {
        Some(Error::AlgorithmEvaluation {
            algorithm,
            repetition,
            fold,
            message,
            ..
        }) => {
            assert_eq!(algorithm, "picky");
            assert!(*repetition >= 1 && *repetition <= 6);
            assert_eq!(*fold, 1);
            assert_eq!(message, "cannot handle this dataset");
        }
        other => panic!("expected AlgorithmEvaluation, got {other:?}"),
    }
}

#[test]
fn test_too_small_dataset_is_recorded() {
    let report = Comparison::new(config())
        .with_dataset(dataset("tiny", 3))
        .with_dataset(dataset("normal", 40))
        .with_algorithm(oracle())
        .run()
        .unwrap();

    assert!(matches!(
        report.failure("tiny"),
        Some(Error::InvalidParameter(_))
    ));
    assert_eq!(report.datasets().collect::<Vec<_>>(), vec!["normal"]);
}

#[test]
fn test_all_undefined_metric_fails_dataset_under_exclude() {
    // precision is undefined in every repetition for an all-negative predictor
    let report = Comparison::new(config())
        .with_dataset(dataset("quarter", 40))
        .with_algorithm(oracle())
        .with_algorithm(always_negative())
        .run()
        .unwrap();

    let err = report.failure("quarter").unwrap();
    assert_eq!(err.code(), "E020");
    assert!(matches!(
        err,
        Error::Pairwise {
            metric: Metric::Precision,
            ..
        }
    ));
}

#[test]
fn test_zero_policy_scores_undefined_as_zero() {
    let report = Comparison::new(config().with_undefined_policy(UndefinedMetricPolicy::Zero))
        .with_dataset(dataset("quarter", 40))
        .with_algorithm(oracle())
        .with_algorithm(always_negative())
        .run()
        .unwrap();

    let precision = report.tally("quarter", Metric::Precision).unwrap();
    assert_eq!(precision.wins_of("oracle"), Some(1));
    assert_eq!(precision.leaders(), vec!["oracle"]);
}

#[test]
fn test_single_algorithm_never_wins() {
    let report = Comparison::new(config())
        .with_dataset(dataset("quarter", 40))
        .with_algorithm(oracle())
        .run()
        .unwrap();

    for metric in Metric::ALL {
        let tally = report.tally("quarter", metric).unwrap();
        assert_eq!(tally.wins_of("oracle"), Some(0));
        assert_eq!(report.matrix("quarter", metric).unwrap().len(), 1);
    }
}

#[test]
fn test_only_configured_metrics_are_tested() {
    let report = Comparison::new(config().with_metrics([Metric::F1]))
        .with_dataset(dataset("quarter", 40))
        .with_algorithm(oracle())
        .with_algorithm(always_positive())
        .run()
        .unwrap();

    assert!(report.tally("quarter", Metric::F1).is_some());
    assert!(report.tally("quarter", Metric::Accuracy).is_none());
    let metrics: Vec<Metric> = report.dataset("quarter").unwrap().metrics().collect();
    assert_eq!(metrics, vec![Metric::F1]);
}

#[test]
fn test_parallel_matches_sequential() {
    let build = |parallel: bool| {
        let mut config = config();
        config.parallel = parallel;
        Comparison::new(config)
            .with_dataset(dataset("a", 40))
            .with_dataset(dataset("b", 37))
            .with_algorithm(oracle())
            .with_algorithm(always_positive())
            .run()
            .unwrap()
    };

    let parallel = build(true);
    let sequential = build(false);
    for name in ["a", "b"] {
        for algorithm in ["oracle", "always-positive"] {
            let p = parallel.distribution(name, algorithm).unwrap();
            let s = sequential.distribution(name, algorithm).unwrap();
            assert_eq!(p.confusions(), s.confusions());
        }
        assert_eq!(
            parallel.tally(name, Metric::Accuracy).unwrap().wins(),
            sequential.tally(name, Metric::Accuracy).unwrap().wins()
        );
    }
}

#[test]
fn test_registration_errors() {
    let empty = Comparison::new(config()).with_algorithm(oracle()).run();
    assert!(matches!(empty, Err(Error::InvalidParameter(_))));

    let no_algorithms = Comparison::new(config())
        .with_dataset(dataset("a", 40))
        .run();
    assert!(matches!(no_algorithms, Err(Error::InvalidParameter(_))));

    let duplicate_dataset = Comparison::new(config())
        .with_datasets([dataset("a", 40), dataset("a", 20)])
        .with_algorithm(oracle())
        .run();
    assert!(matches!(duplicate_dataset, Err(Error::InvalidParameter(_))));

    let duplicate_algorithm = Comparison::new(config())
        .with_dataset(dataset("a", 40))
        .with_algorithm(oracle())
        .with_algorithm(oracle())
        .run();
    assert!(matches!(
        duplicate_algorithm,
        Err(Error::InvalidParameter(msg)) if msg.contains("oracle")
    ));

    let blank = FnAlgorithm::new(" ", |_ds: &Dataset, _train: &[usize], _test: &[usize]| {
        Err(AlgorithmError::new("unreachable"))
    });
    let blank_name = Comparison::new(config())
        .with_dataset(dataset("a", 40))
        .with_algorithm(blank)
        .run();
    assert!(matches!(blank_name, Err(Error::InvalidParameter(_))));
}

#[test]
fn test_invalid_config_rejected_before_running() {
    let result = Comparison::new(config().with_threshold(1.0))
        .with_dataset(dataset("a", 40))
        .with_algorithm(oracle())
        .run();
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::InvalidThreshold(_)))
    ));
}

#[test]
fn test_json_report() {
    let report = Comparison::new(config().with_metrics([Metric::Accuracy]))
        .with_dataset(dataset("quarter", 40))
        .with_dataset(dataset("tiny", 2))
        .with_algorithm(oracle())
        .with_algorithm(always_negative())
        .run()
        .unwrap();

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    // undefined precision of the all-negative predictor
    let first = &value["results"]["quarter"]["distributions"]["always-negative"]["repetitions"][0];
    assert!(first["precision"].is_null());
    assert_abs_diff_eq!(first["accuracy"].as_f64().unwrap(), 0.75, epsilon = 1e-12);

    assert_eq!(value["failures"]["tiny"]["code"], "E001");
    assert!(value["results"]["quarter"]["tallies"]["accuracy"].is_object());

    // accuracy is 1.0 vs 0.75 in every repetition: both directions stay distinct
    let cells = &value["results"]["quarter"]["matrices"]["accuracy"]["cells"];
    assert_eq!(cells[0][1]["t_statistic"], "inf");
    assert_eq!(cells[1][0]["t_statistic"], "-inf");
    assert_eq!(cells[0][1]["effect_size"], "inf");
    assert_eq!(cells[0][1]["p_value"], 0.0);
    assert_eq!(cells[0][0]["t_statistic"], 0.0);
}

#[test]
fn test_markdown_report() {
    let report = Comparison::new(config())
        .with_dataset(dataset("quarter", 40))
        .with_dataset(dataset("tiny", 2))
        .with_algorithm(oracle())
        .with_algorithm(always_positive())
        .run()
        .unwrap();

    let md = report.to_markdown();
    assert!(md.contains("### quarter"));
    assert!(md.contains("| oracle | 1.0000 ± 0.0000 |"));
    assert!(md.contains("| always-positive | 0.2500 ± 0.0000 |"));
    assert!(md.contains("### Failed datasets"));
    assert!(md.contains("**tiny** [E001]"));
}
