//! The classifier capability compared by the engine

use super::dataset::Dataset;
use crate::eval::classification::BinaryConfusion;
use std::fmt;

/// Failure reported by a classifier while training or predicting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AlgorithmError {
    message: String,
}

impl AlgorithmError {
    /// Create from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Failure message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for AlgorithmError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for AlgorithmError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// A named classifier that can be trained and evaluated on a fold
///
/// Implementations train on `train` rows and return confusion counts for the
/// `test` rows. Hyperparameter variants ("fast", "full", ...) are separate
/// instances with distinct names.
pub trait Algorithm: Send + Sync {
    /// Stable name used as the key in every result table
    fn name(&self) -> &str;

    /// Train on `train`, evaluate on `test`
    fn evaluate(
        &self,
        dataset: &Dataset,
        train: &[usize],
        test: &[usize],
    ) -> Result<BinaryConfusion, AlgorithmError>;
}

impl<A: Algorithm + ?Sized> Algorithm for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(
        &self,
        dataset: &Dataset,
        train: &[usize],
        test: &[usize],
    ) -> Result<BinaryConfusion, AlgorithmError> {
        (**self).evaluate(dataset, train, test)
    }
}

/// Algorithm backed by a closure returning confusion counts
pub struct FnAlgorithm<F> {
    name: String,
    evaluate_fn: F,
}

impl<F> FnAlgorithm<F>
where
    F: Fn(&Dataset, &[usize], &[usize]) -> Result<BinaryConfusion, AlgorithmError> + Send + Sync,
{
    /// Wrap a closure under the given name
    pub fn new(name: impl Into<String>, evaluate_fn: F) -> Self {
        Self {
            name: name.into(),
            evaluate_fn,
        }
    }
}

impl<F> Algorithm for FnAlgorithm<F>
where
    F: Fn(&Dataset, &[usize], &[usize]) -> Result<BinaryConfusion, AlgorithmError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(
        &self,
        dataset: &Dataset,
        train: &[usize],
        test: &[usize],
    ) -> Result<BinaryConfusion, AlgorithmError> {
        (self.evaluate_fn)(dataset, train, test)
    }
}

impl<F> fmt::Debug for FnAlgorithm<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAlgorithm").field("name", &self.name).finish()
    }
}

/// Algorithm backed by a closure returning one predicted label per test row
///
/// The confusion counts are derived here, against the dataset's labels, so
/// classifiers never have to agree on a matrix layout.
pub struct PredictorAlgorithm<F> {
    name: String,
    predict_fn: F,
}

impl<F> PredictorAlgorithm<F>
where
    F: Fn(&Dataset, &[usize], &[usize]) -> Result<Vec<bool>, AlgorithmError> + Send + Sync,
{
    /// Wrap a predict closure under the given name
    pub fn new(name: impl Into<String>, predict_fn: F) -> Self {
        Self {
            name: name.into(),
            predict_fn,
        }
    }
}

impl<F> Algorithm for PredictorAlgorithm<F>
where
    F: Fn(&Dataset, &[usize], &[usize]) -> Result<Vec<bool>, AlgorithmError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(
        &self,
        dataset: &Dataset,
        train: &[usize],
        test: &[usize],
    ) -> Result<BinaryConfusion, AlgorithmError> {
        let predictions = (self.predict_fn)(dataset, train, test)?;
        if predictions.len() != test.len() {
            return Err(AlgorithmError::new(format!(
                "returned {} predictions for {} test rows",
                predictions.len(),
                test.len()
            )));
        }
        Ok(BinaryConfusion::from_predictions(
            &predictions,
            &dataset.labels_at(test),
        ))
    }
}

impl<F> fmt::Debug for PredictorAlgorithm<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictorAlgorithm")
            .field("name", &self.name)
            .finish()
    }
}
