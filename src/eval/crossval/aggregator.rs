//! Repeated k-fold cross-validation of one algorithm on one dataset

use super::algorithm::Algorithm;
use super::dataset::Dataset;
use super::distribution::MetricDistribution;
use super::kfold::KFold;
use crate::error::{Error, Result};
use crate::eval::classification::BinaryConfusion;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Repeated k-fold settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossValidation {
    /// Folds per repetition
    pub folds: usize,
    /// Independent repetitions of the whole k-fold run
    pub repetitions: usize,
    /// Base seed; repetition `r` shuffles with `seed + r`
    pub seed: u64,
    /// Keep class balance in every fold
    pub stratified: bool,
    /// Run repetitions on the rayon pool
    pub parallel: bool,
}

impl Default for CrossValidation {
    fn default() -> Self {
        Self {
            folds: 10,
            repetitions: 10,
            seed: 42,
            stratified: false,
            parallel: true,
        }
    }
}

impl CrossValidation {
    /// Create with the given fold and repetition counts
    pub fn new(folds: usize, repetitions: usize) -> Self {
        Self {
            folds,
            repetitions,
            ..Default::default()
        }
    }

    /// Set the base seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable stratified folds
    pub fn stratified(mut self) -> Self {
        self.stratified = true;
        self
    }

    /// Run repetitions on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check the settings against a dataset size
    pub fn validate(&self, n_samples: usize) -> Result<()> {
        if self.folds < 2 {
            return Err(Error::InvalidParameter(format!(
                "folds must be >= 2, got {}",
                self.folds
            )));
        }
        if self.folds > n_samples {
            return Err(Error::InvalidParameter(format!(
                "folds ({}) exceed the number of samples ({n_samples})",
                self.folds
            )));
        }
        if self.repetitions == 0 {
            return Err(Error::InvalidParameter("repetitions must be >= 1".into()));
        }
        Ok(())
    }

    /// RNG for one repetition (1-based)
    fn rng_for(&self, repetition: usize) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(repetition as u64))
    }
}

/// Run repeated k-fold cross-validation and collect one `MetricSet` per repetition
///
/// Any fold failure aborts the whole aggregation with
/// [`Error::AlgorithmEvaluation`]; a partial distribution is never returned.
pub fn aggregate<A>(
    dataset: &Dataset,
    algorithm: &A,
    cv: &CrossValidation,
) -> Result<MetricDistribution>
where
    A: Algorithm + ?Sized,
{
    cv.validate(dataset.n_samples())?;

    let start = Instant::now();
    let run = |repetition: usize| run_repetition(dataset, algorithm, cv, repetition);

    let outcome: Result<Vec<BinaryConfusion>> = if cv.parallel {
        (1..=cv.repetitions).into_par_iter().map(run).collect()
    } else {
        (1..=cv.repetitions).map(run).collect()
    };

    let confusions = outcome.inspect_err(|e| {
        error!(
            dataset = dataset.name(),
            algorithm = algorithm.name(),
            error = %e,
            "aggregation aborted"
        );
    })?;

    let distribution =
        MetricDistribution::from_confusions(dataset.name(), algorithm.name(), confusions);

    for metric in crate::eval::Metric::ALL {
        let undefined = distribution.undefined_count(metric);
        if undefined > 0 {
            warn!(
                dataset = dataset.name(),
                algorithm = algorithm.name(),
                %metric,
                undefined,
                "metric undefined in some repetitions"
            );
        }
    }

    info!(
        dataset = dataset.name(),
        algorithm = algorithm.name(),
        repetitions = cv.repetitions,
        folds = cv.folds,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "aggregation complete"
    );

    Ok(distribution)
}

fn run_repetition<A>(
    dataset: &Dataset,
    algorithm: &A,
    cv: &CrossValidation,
    repetition: usize,
) -> Result<BinaryConfusion>
where
    A: Algorithm + ?Sized,
{
    let mut rng = cv.rng_for(repetition);
    let kfold = KFold::new(cv.folds);
    let folds = if cv.stratified {
        kfold.split_stratified(dataset.labels(), &mut rng)
    } else {
        kfold.split(dataset.n_samples(), &mut rng)
    };

    let failure = |fold: usize, message: String| Error::AlgorithmEvaluation {
        dataset: dataset.name().to_string(),
        algorithm: algorithm.name().to_string(),
        repetition,
        fold,
        message,
    };

    let mut total = BinaryConfusion::default();
    for (index, fold) in folds.iter().enumerate() {
        let fold_number = index + 1;
        let cm = algorithm
            .evaluate(dataset, &fold.train, &fold.test)
            .map_err(|e| failure(fold_number, e.to_string()))?;

        if cm.total() != fold.test.len() as u64 {
            return Err(failure(
                fold_number,
                format!(
                    "returned {} confusion counts for {} held-out samples",
                    cm.total(),
                    fold.test.len()
                ),
            ));
        }
        total += cm;
    }

    debug!(
        dataset = dataset.name(),
        algorithm = algorithm.name(),
        repetition,
        tp = total.tp,
        tn = total.tn,
        fp = total.fp,
        fn_ = total.fn_,
        "repetition complete"
    );

    Ok(total)
}
