//! Queryable results of a comparison run

use crate::error::Error;
use crate::eval::{Metric, MetricDistribution, MetricSummary, PairwiseMatrix, WinTally};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Everything computed for one dataset
#[derive(Clone, Debug, Serialize)]
pub struct DatasetComparison {
    dataset: String,
    /// Registration order, also the matrix row order
    algorithms: Vec<String>,
    distributions: BTreeMap<String, MetricDistribution>,
    matrices: BTreeMap<Metric, PairwiseMatrix>,
    tallies: BTreeMap<Metric, WinTally>,
}

impl DatasetComparison {
    pub(crate) fn new(
        dataset: &str,
        distributions: Vec<MetricDistribution>,
        matrices: BTreeMap<Metric, PairwiseMatrix>,
        tallies: BTreeMap<Metric, WinTally>,
    ) -> Self {
        Self {
            dataset: dataset.to_string(),
            algorithms: distributions
                .iter()
                .map(|d| d.algorithm().to_string())
                .collect(),
            distributions: distributions
                .into_iter()
                .map(|d| (d.algorithm().to_string(), d))
                .collect(),
            matrices,
            tallies,
        }
    }

    /// Dataset name
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Algorithm names in registration order
    pub fn algorithms(&self) -> &[String] {
        &self.algorithms
    }

    /// Metrics that were tested
    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.matrices.keys().copied()
    }

    pub fn distribution(&self, algorithm: &str) -> Option<&MetricDistribution> {
        self.distributions.get(algorithm)
    }

    pub fn matrix(&self, metric: Metric) -> Option<&PairwiseMatrix> {
        self.matrices.get(&metric)
    }

    pub fn tally(&self, metric: Metric) -> Option<&WinTally> {
        self.tallies.get(&metric)
    }

    /// Markdown table of `mean ± std` per algorithm and tested metric
    pub fn to_markdown(&self) -> String {
        let metrics: Vec<Metric> = self.metrics().collect();

        let mut md = format!("### {}\n\n| Algorithm |", self.dataset);
        for metric in &metrics {
            md.push_str(&format!(" {metric} |"));
        }
        md.push_str("\n|-----------|");
        for _ in &metrics {
            md.push_str("-----------------|");
        }
        md.push('\n');

        for name in &self.algorithms {
            md.push_str(&format!("| {name} |"));
            for &metric in &metrics {
                let cell = self
                    .distributions
                    .get(name)
                    .map(|d| format_summary(&d.summary(metric)))
                    .unwrap_or_default();
                md.push_str(&format!(" {cell} |"));
            }
            md.push('\n');
        }
        md
    }
}

fn format_summary(summary: &MetricSummary) -> String {
    if summary.defined == 0 {
        return "n/a".to_string();
    }
    let mut cell = format!("{:.4} ± {:.4}", summary.mean, summary.std);
    if summary.defined < summary.total {
        cell.push_str(&format!(" ({}/{})", summary.defined, summary.total));
    }
    cell
}

/// Results of a comparison run, keyed by dataset name
///
/// A dataset appears either in the results or in the failures, never both.
#[derive(Debug, Default, Serialize)]
pub struct ComparisonReport {
    results: BTreeMap<String, DatasetComparison>,
    #[serde(serialize_with = "serialize_failures")]
    failures: BTreeMap<String, Error>,
}

impl ComparisonReport {
    pub(crate) fn insert_result(&mut self, comparison: DatasetComparison) {
        self.results
            .insert(comparison.dataset().to_string(), comparison);
    }

    pub(crate) fn insert_failure(&mut self, dataset: String, error: Error) {
        self.failures.insert(dataset, error);
    }

    /// Completed datasets
    pub fn results(&self) -> &BTreeMap<String, DatasetComparison> {
        &self.results
    }

    /// Failed datasets and why
    pub fn failures(&self) -> &BTreeMap<String, Error> {
        &self.failures
    }

    /// Names of the completed datasets
    pub fn datasets(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(String::as_str)
    }

    /// Whether every dataset completed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn dataset(&self, dataset: &str) -> Option<&DatasetComparison> {
        self.results.get(dataset)
    }

    /// Per-repetition metrics of one (dataset, algorithm) pair
    pub fn distribution(&self, dataset: &str, algorithm: &str) -> Option<&MetricDistribution> {
        self.results.get(dataset)?.distribution(algorithm)
    }

    /// Pairwise test matrix of one (dataset, metric)
    pub fn matrix(&self, dataset: &str, metric: Metric) -> Option<&PairwiseMatrix> {
        self.results.get(dataset)?.matrix(metric)
    }

    /// Win tally of one (dataset, metric)
    pub fn tally(&self, dataset: &str, metric: Metric) -> Option<&WinTally> {
        self.results.get(dataset)?.tally(metric)
    }

    /// Summary statistics of one metric for one (dataset, algorithm) pair
    pub fn summary(&self, dataset: &str, algorithm: &str, metric: Metric) -> Option<MetricSummary> {
        self.distribution(dataset, algorithm)
            .map(|d| d.summary(metric))
    }

    /// Why a dataset failed, if it did
    pub fn failure(&self, dataset: &str) -> Option<&Error> {
        self.failures.get(dataset)
    }

    /// Serialize to pretty JSON; undefined metric values become `null`
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Markdown report: means table and win tallies per dataset, then failures
    pub fn to_markdown(&self) -> String {
        let mut md = String::from("## Classifier comparison\n\n");
        for comparison in self.results.values() {
            md.push_str(&comparison.to_markdown());
            md.push('\n');
            for tally in comparison.tallies.values() {
                md.push_str(&tally.to_markdown());
                md.push('\n');
            }
        }

        if !self.failures.is_empty() {
            md.push_str("### Failed datasets\n\n");
            for (dataset, error) in &self.failures {
                md.push_str(&format!("- **{dataset}** [{}]: {error}\n", error.code()));
            }
        }
        md
    }
}

#[derive(Serialize)]
struct FailureRecord {
    code: &'static str,
    message: String,
}

fn serialize_failures<S>(failures: &BTreeMap<String, Error>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(failures.iter().map(|(dataset, error)| {
        (
            dataset,
            FailureRecord {
                code: error.code(),
                message: error.to_string(),
            },
        )
    }))
}
