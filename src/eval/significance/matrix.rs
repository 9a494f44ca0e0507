//! Square matrix of pairwise tests for one (dataset, metric)

use super::welch::{pairwise_test, PairwiseTest};
use crate::error::{Error, Result};
use crate::eval::classification::Metric;
use crate::eval::crossval::{MetricDistribution, UndefinedMetricPolicy};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Pairwise tests between every pair of algorithms, self-pairs included
///
/// Cell (A, B) holds the test of A against B; cell (B, A) is its reverse.
#[derive(Clone, Debug, Serialize)]
pub struct PairwiseMatrix {
    dataset: String,
    metric: Metric,
    algorithms: Vec<String>,
    cells: Vec<Vec<PairwiseTest>>,
}

impl PairwiseMatrix {
    /// Test every unordered pair of distributions for one metric
    ///
    /// All distributions must belong to `dataset` and have distinct algorithm
    /// names. Row order follows the order of `distributions`.
    pub fn compute<'a, I>(
        dataset: &str,
        metric: Metric,
        distributions: I,
        policy: UndefinedMetricPolicy,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a MetricDistribution>,
    {
        let distributions: Vec<&MetricDistribution> = distributions.into_iter().collect();

        let mut seen = HashSet::new();
        for dist in &distributions {
            if dist.dataset() != dataset {
                return Err(Error::InvalidParameter(format!(
                    "distribution for '{}' belongs to dataset '{}', not '{dataset}'",
                    dist.algorithm(),
                    dist.dataset()
                )));
            }
            if !seen.insert(dist.algorithm()) {
                return Err(Error::InvalidParameter(format!(
                    "algorithm '{}' appears twice in dataset '{dataset}'",
                    dist.algorithm()
                )));
            }
        }

        let n = distributions.len();
        let mut cells: Vec<Vec<Option<PairwiseTest>>> = vec![vec![None; n]; n];
        for i in 0..n {
            for j in i..n {
                let (a, b) = (distributions[i], distributions[j]);
                let test = pairwise_test(a, b, metric, policy)
                    .map_err(|e| e.in_pair(dataset, metric, a.algorithm(), b.algorithm()))?;
                cells[i][j] = Some(test);
                if i != j {
                    cells[j][i] = Some(test.reversed());
                }
            }
        }

        Ok(Self {
            dataset: dataset.to_string(),
            metric,
            algorithms: distributions
                .iter()
                .map(|d| d.algorithm().to_string())
                .collect(),
            cells: cells
                .into_iter()
                .map(|row| row.into_iter().flatten().collect())
                .collect(),
        })
    }

    /// Dataset name
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Metric tested
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Algorithm names in row/column order
    pub fn algorithms(&self) -> &[String] {
        &self.algorithms
    }

    /// Number of algorithms
    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    /// Whether the matrix has no algorithms
    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    /// Test of row `i` against column `j`
    pub fn cell(&self, i: usize, j: usize) -> &PairwiseTest {
        &self.cells[i][j]
    }

    /// Test of algorithm `a` against algorithm `b`
    pub fn get(&self, a: &str, b: &str) -> Option<&PairwiseTest> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(&self.cells[i][j])
    }

    /// Row index of an algorithm
    pub fn index_of(&self, algorithm: &str) -> Option<usize> {
        self.algorithms.iter().position(|a| a == algorithm)
    }

    /// Export as markdown table, cells as `t / p`
    pub fn to_markdown(&self) -> String {
        let mut md = format!("**{} — {}**\n\n| vs |", self.dataset, self.metric);
        for name in &self.algorithms {
            md.push_str(&format!(" {name} |"));
        }
        md.push_str("\n|----|");
        for _ in &self.algorithms {
            md.push_str("----------|");
        }
        md.push('\n');

        for (i, name) in self.algorithms.iter().enumerate() {
            md.push_str(&format!("| {name} |"));
            for test in &self.cells[i] {
                md.push_str(&format!(" {} |", format_cell(test)));
            }
            md.push('\n');
        }
        md
    }
}

/// `t / p` with four decimals each
fn format_cell(test: &PairwiseTest) -> String {
    format!("{:+.4} / {:.4}", test.t_statistic, test.p_value)
}

impl fmt::Display for PairwiseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} — {} (t / p)", self.dataset, self.metric)?;
        if self.algorithms.is_empty() {
            return writeln!(f, "(empty)");
        }

        let name_width = self
            .algorithms
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(5)
            .max(5);
        let cells: Vec<Vec<String>> = self
            .cells
            .iter()
            .map(|row| row.iter().map(format_cell).collect())
            .collect();
        let cell_width = cells
            .iter()
            .flatten()
            .map(String::len)
            .chain(self.algorithms.iter().map(String::len))
            .max()
            .unwrap_or(0);

        let widths: Vec<usize> = std::iter::once(name_width + 2)
            .chain(self.algorithms.iter().map(|_| cell_width + 2))
            .collect();

        writeln!(f, "{}", border('┌', '┬', '┐', &widths))?;

        write!(f, "│ {:name_width$} │", "vs")?;
        for name in &self.algorithms {
            write!(f, " {name:>cell_width$} │")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", border('├', '┼', '┤', &widths))?;

        for (name, row) in self.algorithms.iter().zip(&cells) {
            write!(f, "│ {name:name_width$} │")?;
            for cell in row {
                write!(f, " {cell:>cell_width$} │")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", border('└', '┴', '┘', &widths))
    }
}

/// Horizontal box-drawing rule over columns of the given widths
pub(crate) fn border(left: char, join: char, right: char, widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|&w| "─".repeat(w)).collect();
    format!("{left}{}{right}", segments.join(&join.to_string()))
}
