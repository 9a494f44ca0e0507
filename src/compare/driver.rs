//! Datasets × algorithms comparison run

use super::report::{ComparisonReport, DatasetComparison};
use crate::config::{validate_config, ComparisonConfig};
use crate::error::{Error, Result};
use crate::eval::{aggregate, tally, Algorithm, Dataset, MetricDistribution, PairwiseMatrix};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::time::Instant;
use tracing::{error, info};

/// Builder and runner for a full comparison
///
/// # Example
///
/// ```no_run
/// use comparar::{Comparison, ComparisonConfig, Dataset, Metric, PredictorAlgorithm};
///
/// # fn load() -> comparar::Result<Dataset> { unimplemented!() }
/// let report = Comparison::new(ComparisonConfig::default())
///     .with_dataset(load()?)
///     .with_algorithm(PredictorAlgorithm::new("majority", |_ds: &Dataset, _train: &[usize], test: &[usize]| {
///         Ok(vec![true; test.len()])
///     }))
///     .run()?;
///
/// for dataset in report.datasets() {
///     println!("{}", report.tally(dataset, Metric::F1).unwrap());
/// }
/// # Ok::<(), comparar::Error>(())
/// ```
pub struct Comparison {
    config: ComparisonConfig,
    datasets: Vec<Dataset>,
    algorithms: Vec<Box<dyn Algorithm>>,
}

impl Comparison {
    /// Create an empty comparison
    pub fn new(config: ComparisonConfig) -> Self {
        Self {
            config,
            datasets: Vec::new(),
            algorithms: Vec::new(),
        }
    }

    /// Register a dataset
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    /// Register several datasets
    pub fn with_datasets(mut self, datasets: impl IntoIterator<Item = Dataset>) -> Self {
        self.datasets.extend(datasets);
        self
    }

    /// Register an algorithm
    pub fn with_algorithm(mut self, algorithm: impl Algorithm + 'static) -> Self {
        self.algorithms.push(Box::new(algorithm));
        self
    }

    /// Register an already boxed algorithm
    pub fn with_boxed_algorithm(mut self, algorithm: Box<dyn Algorithm>) -> Self {
        self.algorithms.push(algorithm);
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Run the comparison
    ///
    /// Configuration and registration problems fail the whole call. Anything
    /// that goes wrong inside one dataset is recorded as that dataset's
    /// failure and the other datasets still complete.
    pub fn run(&self) -> Result<ComparisonReport> {
        validate_config(&self.config)?;
        self.check_registrations()?;

        info!(
            datasets = self.datasets.len(),
            algorithms = self.algorithms.len(),
            folds = self.config.folds,
            repetitions = self.config.repetitions,
            "comparison started"
        );
        let start = Instant::now();

        let run = |dataset: &Dataset| (dataset.name().to_string(), self.compare_dataset(dataset));
        let outcomes: Vec<(String, Result<DatasetComparison>)> = if self.config.parallel {
            self.datasets.par_iter().map(run).collect()
        } else {
            self.datasets.iter().map(run).collect()
        };

        let mut report = ComparisonReport::default();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(comparison) => report.insert_result(comparison),
                Err(e) => {
                    error!(dataset = %name, code = e.code(), error = %e, "dataset failed");
                    report.insert_failure(name, e);
                }
            }
        }

        info!(
            completed = report.results().len(),
            failed = report.failures().len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "comparison complete"
        );
        Ok(report)
    }

    fn check_registrations(&self) -> Result<()> {
        if self.datasets.is_empty() {
            return Err(Error::InvalidParameter("no datasets registered".into()));
        }
        if self.algorithms.is_empty() {
            return Err(Error::InvalidParameter("no algorithms registered".into()));
        }

        let mut seen = HashSet::new();
        for dataset in &self.datasets {
            if !seen.insert(dataset.name()) {
                return Err(Error::InvalidParameter(format!(
                    "dataset '{}' registered twice",
                    dataset.name()
                )));
            }
        }

        let mut seen = HashSet::new();
        for algorithm in &self.algorithms {
            let name = algorithm.name();
            if name.trim().is_empty() {
                return Err(Error::InvalidParameter(
                    "algorithm name cannot be empty".into(),
                ));
            }
            if !seen.insert(name) {
                return Err(Error::InvalidParameter(format!(
                    "algorithm '{name}' registered twice"
                )));
            }
        }
        Ok(())
    }

    fn compare_dataset(&self, dataset: &Dataset) -> Result<DatasetComparison> {
        let cv = self.config.cross_validation();
        let evaluate = |algorithm: &dyn Algorithm| aggregate(dataset, algorithm, &cv);

        let distributions: Vec<MetricDistribution> = if self.config.parallel {
            self.algorithms
                .par_iter()
                .map(|a| evaluate(a.as_ref()))
                .collect::<Result<_>>()?
        } else {
            self.algorithms
                .iter()
                .map(|a| evaluate(a.as_ref()))
                .collect::<Result<_>>()?
        };

        let mut matrices = BTreeMap::new();
        let mut tallies = BTreeMap::new();
        for &metric in &self.config.metrics {
            let matrix = PairwiseMatrix::compute(
                dataset.name(),
                metric,
                &distributions,
                self.config.undefined_policy,
            )?;
            tallies.insert(metric, tally(&matrix, self.config.threshold)?);
            matrices.insert(metric, matrix);
        }

        Ok(DatasetComparison::new(
            dataset.name(),
            distributions,
            matrices,
            tallies,
        ))
    }
}

impl fmt::Debug for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparison")
            .field("config", &self.config)
            .field(
                "datasets",
                &self.datasets.iter().map(Dataset::name).collect::<Vec<_>>(),
            )
            .field(
                "algorithms",
                &self.algorithms.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
