//! Welch's unequal-variance two-sample t-test

use crate::error::{Error, Result};
use crate::eval::classification::Metric;
use crate::eval::crossval::{MetricDistribution, UndefinedMetricPolicy};
use serde::{Serialize, Serializer};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Smallest sample a t-test accepts
pub const MIN_SAMPLE_SIZE: usize = 2;

/// Outcome of testing sample A against sample B
///
/// A positive `t_statistic` means A's mean is higher.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PairwiseTest {
    /// Welch t statistic
    #[serde(serialize_with = "serialize_unbounded")]
    pub t_statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Welch–Satterthwaite degrees of freedom
    pub degrees_of_freedom: f64,
    /// Signed Cohen's d using the mean of the two variances
    #[serde(serialize_with = "serialize_unbounded")]
    pub effect_size: f64,
}

impl PairwiseTest {
    /// The same test seen from B's side: t and d negated, p unchanged
    pub fn reversed(&self) -> Self {
        Self {
            t_statistic: -self.t_statistic,
            p_value: self.p_value,
            degrees_of_freedom: self.degrees_of_freedom,
            effect_size: -self.effect_size,
        }
    }

    /// Whether A is significantly better than B at `threshold`
    pub fn is_win(&self, threshold: f64) -> bool {
        self.t_statistic > 0.0 && self.p_value < threshold
    }
}

/// Infinite values as `"inf"` / `"-inf"` so their sign survives JSON
fn serialize_unbounded<S>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_infinite() {
        serializer.serialize_str(if value.is_sign_positive() { "inf" } else { "-inf" })
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Sample mean and unbiased variance; a constant sample has exactly zero variance
fn mean_and_variance(sample: &[f64]) -> (f64, f64) {
    if let Some((&first, rest)) = sample.split_first() {
        if rest.iter().all(|&v| v == first) {
            return (first, 0.0);
        }
    }

    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let variance = sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance)
}

/// Perform Welch's t-test for two independent samples
///
/// When both samples are constant the standard error is zero: equal means
/// give t = 0 and p = 1, different means give t = ±∞ and p = 0. The effect
/// size follows t in that case: 0 for equal means, ±∞ otherwise.
pub fn welch_t_test(sample_a: &[f64], sample_b: &[f64]) -> Result<PairwiseTest> {
    let smallest = sample_a.len().min(sample_b.len());
    if smallest < MIN_SAMPLE_SIZE {
        return Err(Error::InsufficientSampleSize {
            valid: smallest,
            required: MIN_SAMPLE_SIZE,
        });
    }
    if sample_a.iter().chain(sample_b).any(|v| !v.is_finite()) {
        return Err(Error::InvalidParameter(
            "t-test samples must be finite; apply an undefined-metric policy first".into(),
        ));
    }

    let n_a = sample_a.len() as f64;
    let n_b = sample_b.len() as f64;
    let (mean_a, var_a) = mean_and_variance(sample_a);
    let (mean_b, var_b) = mean_and_variance(sample_b);

    let diff = mean_a - mean_b;
    let pooled_std = ((var_a + var_b) / 2.0).sqrt();
    let effect_size = if pooled_std > 0.0 {
        diff / pooled_std
    } else if diff == 0.0 {
        0.0
    } else {
        f64::INFINITY.copysign(diff)
    };

    let se_a = var_a / n_a;
    let se_b = var_b / n_b;
    let se = (se_a + se_b).sqrt();

    if se == 0.0 {
        let degrees_of_freedom = n_a + n_b - 2.0;
        let (t_statistic, p_value) = if diff == 0.0 {
            (0.0, 1.0)
        } else {
            (f64::INFINITY.copysign(diff), 0.0)
        };
        return Ok(PairwiseTest {
            t_statistic,
            p_value,
            degrees_of_freedom,
            effect_size,
        });
    }

    let t_statistic = diff / se;
    let degrees_of_freedom =
        (se_a + se_b).powi(2) / (se_a.powi(2) / (n_a - 1.0) + se_b.powi(2) / (n_b - 1.0));

    let t_dist = StudentsT::new(0.0, 1.0, degrees_of_freedom).map_err(|e| {
        Error::InvalidParameter(format!(
            "invalid t distribution (df = {degrees_of_freedom}): {e}"
        ))
    })?;
    let upper_tail = 1.0 - t_dist.cdf(t_statistic.abs());
    let p_value = (2.0 * upper_tail).clamp(0.0, 1.0);

    Ok(PairwiseTest {
        t_statistic,
        p_value,
        degrees_of_freedom,
        effect_size,
    })
}

/// Test two algorithms' distributions of one metric against each other
///
/// The distributions must have the same number of repetitions. Undefined
/// values are handled by `policy` before testing; fewer than two remaining
/// values on either side is an error.
pub fn pairwise_test(
    dist_a: &MetricDistribution,
    dist_b: &MetricDistribution,
    metric: Metric,
    policy: UndefinedMetricPolicy,
) -> Result<PairwiseTest> {
    if dist_a.len() != dist_b.len() {
        return Err(Error::InconsistentDistributionLength {
            left: dist_a.len(),
            right: dist_b.len(),
        });
    }

    let sample_a = dist_a.sample(metric, policy);
    let sample_b = dist_b.sample(metric, policy);
    welch_t_test(&sample_a, &sample_b)
}
