//! Binary confusion counts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Confusion counts of a binary classifier
///
/// Cells are named rather than positional. The only place a positional layout
/// is interpreted is [`BinaryConfusion::from_layout`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinaryConfusion {
    /// Predicted positive, actually positive
    pub tp: u64,
    /// Predicted negative, actually negative
    pub tn: u64,
    /// Predicted positive, actually negative
    pub fp: u64,
    /// Predicted negative, actually positive
    #[serde(rename = "fn")]
    pub fn_: u64,
}

impl BinaryConfusion {
    /// Create from named counts
    pub const fn new(tp: u64, tn: u64, fp: u64, fn_: u64) -> Self {
        Self { tp, tn, fp, fn_ }
    }

    /// Create from a 2×2 matrix laid out as `[[tn, fp], [fn, tp]]`
    ///
    /// Rows are the true label and columns the predicted label, negative class
    /// first. This matches the layout most classifier toolkits emit.
    pub const fn from_layout(matrix: [[u64; 2]; 2]) -> Self {
        let [[tn, fp], [fn_, tp]] = matrix;
        Self { tp, tn, fp, fn_ }
    }

    /// Count predictions against ground truth, `true` being the positive class
    ///
    /// Pairs are zipped, so extra trailing entries on either side are ignored.
    pub fn from_predictions(y_pred: &[bool], y_true: &[bool]) -> Self {
        y_pred
            .iter()
            .zip(y_true)
            .fold(Self::default(), |mut cm, (&pred, &truth)| {
                match (pred, truth) {
                    (true, true) => cm.tp += 1,
                    (false, false) => cm.tn += 1,
                    (true, false) => cm.fp += 1,
                    (false, true) => cm.fn_ += 1,
                }
                cm
            })
    }

    /// Number of evaluated samples
    pub const fn total(&self) -> u64 {
        self.tp + self.tn + self.fp + self.fn_
    }

    /// Number of actually positive samples (TP + FN)
    pub const fn positives(&self) -> u64 {
        self.tp + self.fn_
    }

    /// Number of actually negative samples (TN + FP)
    pub const fn negatives(&self) -> u64 {
        self.tn + self.fp
    }

    /// Whether no sample was evaluated
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Add for BinaryConfusion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            tp: self.tp + rhs.tp,
            tn: self.tn + rhs.tn,
            fp: self.fp + rhs.fp,
            fn_: self.fn_ + rhs.fn_,
        }
    }
}

impl AddAssign for BinaryConfusion {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for BinaryConfusion {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl fmt::Display for BinaryConfusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "              Pred -    Pred +")?;
        writeln!(f, "Actual -  {:>8}  {:>8}", self.tn, self.fp)?;
        writeln!(f, "Actual +  {:>8}  {:>8}", self.fn_, self.tp)
    }
}
