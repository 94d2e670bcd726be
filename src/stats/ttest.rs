//! Two-sample mean-comparison tests and their effect size.
//!
//! Student's t-test assumes equal group variances; Welch's form corrects the
//! standard error and degrees of freedom when that assumption fails. Cohen's d
//! uses the pooled standard deviation in both cases so effect sizes stay
//! comparable across the two forms.

use super::{mean, require_finite, sample_variance, two_tailed_t, StatError};

/// Outcome of a two-sample mean comparison.
#[derive(Debug, Clone, Copy)]
pub struct MeanComparison {
    /// The t statistic.
    pub statistic: f64,
    /// Degrees of freedom used for the p-value.
    pub df: f64,
    /// Two-tailed probability under the null of equal means.
    pub p_value: f64,
    /// Cohen's d standardized mean difference.
    pub cohens_d: f64,
}

fn validate_groups(a: &[f64], b: &[f64]) -> Result<(), StatError> {
    for g in [a, b] {
        if g.len() < 2 {
            return Err(StatError::TooFewObservations {
                required: 2,
                actual: g.len(),
            });
        }
        require_finite(g)?;
    }
    Ok(())
}

/// Pooled standard deviation of two groups (n - 1 weighting).
fn pooled_sd(a: &[f64], b: &[f64]) -> f64 {
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    (((n1 - 1.0) * sample_variance(a) + (n2 - 1.0) * sample_variance(b)) / (n1 + n2 - 2.0)).sqrt()
}

/// Cohen's d for two independent groups.
pub fn cohens_d(a: &[f64], b: &[f64]) -> Result<f64, StatError> {
    validate_groups(a, b)?;
    let sd = pooled_sd(a, b);
    if sd <= 0.0 {
        return Err(StatError::Degenerate(
            "pooled standard deviation is zero".to_string(),
        ));
    }
    Ok((mean(a) - mean(b)) / sd)
}

/// Student's two-sample t-test (equal variances assumed).
pub fn students_t_test(a: &[f64], b: &[f64]) -> Result<MeanComparison, StatError> {
    validate_groups(a, b)?;
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let sd = pooled_sd(a, b);
    if sd <= 0.0 {
        return Err(StatError::Degenerate(
            "both groups have zero variance".to_string(),
        ));
    }
    let se = sd * (1.0 / n1 + 1.0 / n2).sqrt();
    let t = (mean(a) - mean(b)) / se;
    let df = n1 + n2 - 2.0;
    Ok(MeanComparison {
        statistic: t,
        df,
        p_value: two_tailed_t(t, df)?,
        cohens_d: (mean(a) - mean(b)) / sd,
    })
}

/// Welch's two-sample t-test (unequal variances allowed).
///
/// Degrees of freedom follow the Welch-Satterthwaite approximation.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<MeanComparison, StatError> {
    validate_groups(a, b)?;
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (v1, v2) = (sample_variance(a), sample_variance(b));
    let se_sq = v1 / n1 + v2 / n2;
    if se_sq <= 0.0 {
        return Err(StatError::Degenerate(
            "both groups have zero variance".to_string(),
        ));
    }
    let t = (mean(a) - mean(b)) / se_sq.sqrt();
    let df = se_sq * se_sq
        / ((v1 / n1) * (v1 / n1) / (n1 - 1.0) + (v2 / n2) * (v2 / n2) / (n2 - 1.0));
    let d = cohens_d(a, b)?;
    Ok(MeanComparison {
        statistic: t,
        df,
        p_value: two_tailed_t(t, df)?,
        cohens_d: d,
    })
}
