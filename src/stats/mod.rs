//! Statistics kernel - assumption checks, hypothesis tests, and effect sizes.
//!
//! Every function here is pure: slices of `f64` (or categorical label pairs)
//! in, a test result out. DataFrame handling lives in the pipeline layer;
//! this module knows nothing about polars.

pub mod contingency;
pub mod correlation;
pub mod normality;
pub mod regression;
pub mod ttest;
pub mod variance;

pub use contingency::*;
pub use correlation::*;
pub use normality::*;
pub use regression::*;
pub use ttest::*;
pub use variance::*;

use statrs::distribution::{ContinuousCDF, StudentsT};
use thiserror::Error;

/// Errors produced by the statistics kernel.
///
/// The pipeline maps these onto per-pair `Failed` outcomes; they never
/// abort a batch of pairwise tests.
#[derive(Debug, Error)]
pub enum StatError {
    /// Not enough observations to run the test at all.
    #[error("too few observations: need at least {required}, got {actual}")]
    TooFewObservations { required: usize, actual: usize },

    /// Data is statistically degenerate (zero variance, singular table, ...).
    #[error("degenerate data: {0}")]
    Degenerate(String),

    /// Structural problem with the input (mismatched lengths, wrong group count).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Arithmetic mean. Caller guarantees a non-empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance (n - 1 denominator). Caller guarantees len >= 2.
pub(crate) fn sample_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64
}

/// Median of an unsorted slice. Caller guarantees a non-empty slice.
pub(crate) fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Reject samples holding NaN or infinities. Every kernel entry point calls
/// this before touching a distribution; statrs CDFs panic on non-finite
/// arguments rather than returning an error.
pub(crate) fn require_finite(values: &[f64]) -> Result<(), StatError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(StatError::InvalidInput(
            "sample contains non-finite values".to_string(),
        ));
    }
    Ok(())
}

/// Two-tailed p-value from a t-statistic with `df` degrees of freedom.
pub(crate) fn two_tailed_t(t: f64, df: f64) -> Result<f64, StatError> {
    if !t.is_finite() {
        return Err(StatError::InvalidInput(format!(
            "non-finite t statistic: {t}"
        )));
    }
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|_| StatError::Degenerate(format!("invalid degrees of freedom: {df}")))?;
    Ok(clamp_p(2.0 * (1.0 - dist.cdf(t.abs()))))
}

/// Clamp a probability into [0, 1] against floating-point drift.
pub(crate) fn clamp_p(p: f64) -> f64 {
    p.clamp(0.0, 1.0)
}
