//! In-memory labeled dataset

use crate::error::{Error, Result};

/// Named, immutable tabular dataset with a binary target
///
/// Rows are addressed by index; folds are lists of row indices.
#[derive(Clone, Debug)]
pub struct Dataset {
    name: String,
    features: Vec<Vec<f64>>,
    labels: Vec<bool>,
}

impl Dataset {
    /// Create a dataset from feature rows and a binary label per row
    pub fn new(name: impl Into<String>, features: Vec<Vec<f64>>, labels: Vec<bool>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidParameter("dataset name must not be empty".into()));
        }
        if labels.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "dataset '{name}' has no samples"
            )));
        }
        if features.len() != labels.len() {
            return Err(Error::InvalidParameter(format!(
                "dataset '{name}' has {} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        Ok(Self {
            name,
            features,
            labels,
        })
    }

    /// Create a dataset from a class-index target, reducing it to binary
    ///
    /// Rows whose class equals `positive_class` become positive, all others negative.
    pub fn from_class_labels(
        name: impl Into<String>,
        features: Vec<Vec<f64>>,
        classes: &[usize],
        positive_class: usize,
    ) -> Result<Self> {
        let labels = classes.iter().map(|&c| c == positive_class).collect();
        Self::new(name, features, labels)
    }

    /// Dataset name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows
    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    /// Number of positive rows
    pub fn n_positive(&self) -> usize {
        self.labels.iter().filter(|&&l| l).count()
    }

    /// Label of one row
    pub fn label(&self, row: usize) -> bool {
        self.labels[row]
    }

    /// All labels, in row order
    pub fn labels(&self) -> &[bool] {
        &self.labels
    }

    /// Labels of the given rows
    pub fn labels_at(&self, rows: &[usize]) -> Vec<bool> {
        rows.iter().map(|&i| self.labels[i]).collect()
    }

    /// Feature values of one row
    pub fn features(&self, row: usize) -> &[f64] {
        &self.features[row]
    }

    /// All feature rows
    pub fn feature_rows(&self) -> &[Vec<f64>] {
        &self.features
    }
}
