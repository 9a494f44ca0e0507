//! Win counts from a pairwise matrix

use super::classification::Metric;
use super::significance::{border, PairwiseMatrix};
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Significant wins per algorithm for one (dataset, metric)
///
/// A wins against B when t(A, B) > 0 and p(A, B) < threshold. Counts are not
/// tie-broken; `ranking` orders equal counts by name for stable output only.
#[derive(Clone, Debug, Serialize)]
pub struct WinTally {
    dataset: String,
    metric: Metric,
    threshold: f64,
    wins: BTreeMap<String, usize>,
    beaten: BTreeMap<String, Vec<String>>,
}

/// Count the wins of every algorithm in `matrix`
///
/// Every cell is checked, the diagonal included; a self-comparison has t = 0
/// and so never counts. `threshold` must lie strictly between 0 and 1.
pub fn tally(matrix: &PairwiseMatrix, threshold: f64) -> Result<WinTally> {
    // NaN fails both comparisons
    if !(threshold > 0.0 && threshold < 1.0) {
        return Err(Error::InvalidParameter(format!(
            "significance threshold must be in (0, 1), got {threshold}"
        )));
    }

    let mut wins = BTreeMap::new();
    let mut beaten = BTreeMap::new();

    for (i, name) in matrix.algorithms().iter().enumerate() {
        let opponents: Vec<String> = matrix
            .algorithms()
            .iter()
            .enumerate()
            .filter(|&(j, _)| matrix.cell(i, j).is_win(threshold))
            .map(|(_, opponent)| opponent.clone())
            .collect();
        wins.insert(name.clone(), opponents.len());
        beaten.insert(name.clone(), opponents);
    }

    Ok(WinTally {
        dataset: matrix.dataset().to_string(),
        metric: matrix.metric(),
        threshold,
        wins,
        beaten,
    })
}

impl WinTally {
    /// Dataset name
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Metric the wins were counted on
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Significance threshold used
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Win count of every algorithm, keyed by name
    pub fn wins(&self) -> &BTreeMap<String, usize> {
        &self.wins
    }

    /// Win count of one algorithm
    pub fn wins_of(&self, algorithm: &str) -> Option<usize> {
        self.wins.get(algorithm).copied()
    }

    /// Algorithms that `algorithm` beat
    pub fn beaten_by(&self, algorithm: &str) -> &[String] {
        self.beaten
            .get(algorithm)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Algorithms by descending win count, equal counts by name
    pub fn ranking(&self) -> Vec<(&str, usize)> {
        let mut ranking: Vec<(&str, usize)> =
            self.wins.iter().map(|(n, &w)| (n.as_str(), w)).collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranking
    }

    /// All algorithms sharing the highest win count
    pub fn leaders(&self) -> Vec<&str> {
        let Some(&top) = self.wins.values().max() else {
            return Vec::new();
        };
        self.wins
            .iter()
            .filter(|&(_, &w)| w == top)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Export as markdown table
    pub fn to_markdown(&self) -> String {
        let mut md = format!(
            "**{} — {} (p < {})**\n\n| Algorithm | Wins | Beats |\n|-----------|------|-------|\n",
            self.dataset, self.metric, self.threshold
        );
        for (name, wins) in self.ranking() {
            md.push_str(&format!(
                "| {name} | {wins} | {} |\n",
                self.beaten_by(name).join(", ")
            ));
        }
        md
    }
}

impl fmt::Display for WinTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} — {} wins (p < {})",
            self.dataset, self.metric, self.threshold
        )?;
        if self.wins.is_empty() {
            return writeln!(f, "(empty)");
        }

        let name_width = self.wins.keys().map(String::len).max().unwrap_or(9).max(9);
        let widths = [name_width + 2, 6];

        writeln!(f, "{}", border('┌', '┬', '┐', &widths))?;
        writeln!(f, "│ {:name_width$} │ Wins │", "Algorithm")?;
        writeln!(f, "{}", border('├', '┼', '┤', &widths))?;
        for (name, wins) in self.ranking() {
            writeln!(f, "│ {name:name_width$} │ {wins:>4} │")?;
        }
        writeln!(f, "{}", border('└', '┴', '┘', &widths))
    }
}
