//! Comparison driver
//!
//! Runs every registered algorithm on every registered dataset, builds the
//! pairwise matrix and win tally for every configured metric, and collects
//! everything into a [`ComparisonReport`] keyed by dataset name.

mod driver;
mod report;

#[cfg(test)]
mod tests;

pub use driver::Comparison;
pub use report::{ComparisonReport, DatasetComparison};
