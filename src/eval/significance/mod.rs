//! Pairwise significance testing
//!
//! Welch's t-test between metric distributions, organised per (dataset,
//! metric) as a square matrix over algorithm names.

mod matrix;
mod welch;


pub(crate) use matrix::border;
pub use matrix::PairwiseMatrix;
pub use welch::{pairwise_test, welch_t_test, PairwiseTest, MIN_SAMPLE_SIZE};
