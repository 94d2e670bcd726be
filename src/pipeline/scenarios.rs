//! Scenario handlers - one per variable-type combination.
//!
//! Each handler pulls its two columns out of the DataFrame, drops incomplete
//! rows, runs the assumption checks its test requires, and returns a single
//! outcome. Handlers never print and never touch sibling pairs; any
//! statistical failure propagates as an error for the dispatcher to record.

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Result};
use polars::prelude::*;

use super::dispatch::{EffectSize, TestOutcome};
use crate::stats;

/// Significance level used by the assumption gates (normality, variance
/// homogeneity). Distinct from the report's significance marker threshold.
const ASSUMPTION_ALPHA: f64 = 0.05;

/// Classic minimum expected cell count for the chi-square test.
const MIN_EXPECTED_COUNT: f64 = 5.0;

/// Values of a coerced numeric column, null-preserving.
///
/// Coercion already maps non-finite text to null, but a frame built directly
/// from floats can still carry NaN or infinities; those fail the pair here
/// instead of reaching a distribution CDF.
fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let col = df.column(name)?;
    let ca = col
        .f64()
        .map_err(|_| anyhow!("column '{name}' was not coerced to numeric"))?;
    let values: Vec<Option<f64>> = ca.iter().collect();
    if values.iter().flatten().any(|v| !v.is_finite()) {
        bail!("column '{name}' contains non-finite values");
    }
    Ok(values)
}

/// Values of a categorical column as text labels, null-preserving.
fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let col = df.column(name)?;
    let casted = col.cast(&DataType::String)?;
    let ca = casted.str()?;
    Ok(ca.iter().map(|opt| opt.map(|s| s.to_string())).collect())
}

/// Keep only rows where both numeric columns are present.
fn complete_numeric_pairs(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip()
}

/// Continuous vs binary: assumption-gated mean comparison.
///
/// Shapiro-Wilk within each group gates the parametric path; Levene decides
/// between Student's and Welch's t-test.
pub(crate) fn continuous_vs_binary(
    df: &DataFrame,
    continuous: &str,
    binary: &str,
) -> Result<Option<TestOutcome>> {
    let values = numeric_values(df, continuous)?;
    let labels = text_values(df, binary)?;

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (value, label) in values.iter().zip(labels.iter()) {
        if let (Some(v), Some(l)) = (value, label) {
            groups.entry(l.clone()).or_default().push(*v);
        }
    }
    if groups.len() != 2 {
        bail!(
            "grouping column '{binary}' has {} non-missing level(s), expected exactly 2",
            groups.len()
        );
    }
    let mut iter = groups.into_iter();
    let (_, group_a) = iter
        .next()
        .ok_or_else(|| anyhow!("missing first group"))?;
    let (_, group_b) = iter
        .next()
        .ok_or_else(|| anyhow!("missing second group"))?;

    let worst_normality = stats::shapiro_wilk(&group_a)?
        .p_value
        .min(stats::shapiro_wilk(&group_b)?.p_value);
    if worst_normality <= ASSUMPTION_ALPHA {
        return Ok(Some(TestOutcome::Skipped {
            test: "parametric mean-comparison test".to_string(),
            reason: format!(
                "normality violated in at least one group (worst Shapiro-Wilk p = {worst_normality:.4})"
            ),
        }));
    }

    let variance = stats::levene(&[&group_a, &group_b])?;
    let equal_variances = variance.p_value > ASSUMPTION_ALPHA;
    let comparison = if equal_variances {
        stats::students_t_test(&group_a, &group_b)?
    } else {
        stats::welch_t_test(&group_a, &group_b)?
    };
    let test = if equal_variances {
        "Student's t-test"
    } else {
        "Welch's t-test"
    };
    let note = format!(
        "normality held in both groups (worst Shapiro-Wilk p = {:.4}); variances {} (Levene p = {:.4})",
        worst_normality,
        if equal_variances {
            "judged equal"
        } else {
            "judged unequal, Welch correction applied"
        },
        variance.p_value
    );

    Ok(Some(TestOutcome::Executed {
        test: test.to_string(),
        p_value: comparison.p_value,
        effect_size: EffectSize::new("Cohen's d", comparison.cohens_d),
        note,
    }))
}

/// Continuous vs continuous: simple linear regression of the second column
/// on the first; slope p-value and R².
pub(crate) fn continuous_vs_continuous(
    df: &DataFrame,
    x_name: &str,
    y_name: &str,
) -> Result<Option<TestOutcome>> {
    let xs = numeric_values(df, x_name)?;
    let ys = numeric_values(df, y_name)?;
    let (x, y) = complete_numeric_pairs(&xs, &ys);

    let fit = stats::simple_ols(&x, &y)?;
    Ok(Some(TestOutcome::Executed {
        test: "linear regression".to_string(),
        p_value: fit.slope_p_value,
        effect_size: EffectSize::new("R²", fit.r_squared),
        note: format!(
            "slope of '{y_name}' on '{x_name}' over {} complete rows; regression assumptions are not independently verified",
            x.len()
        ),
    }))
}

/// Categorical vs categorical: chi-square test of independence, gated on the
/// expected-frequency rule.
pub(crate) fn categorical_vs_categorical(
    df: &DataFrame,
    left: &str,
    right: &str,
) -> Result<Option<TestOutcome>> {
    let a = text_values(df, left)?;
    let b = text_values(df, right)?;
    let pairs: Vec<(String, String)> = a
        .into_iter()
        .zip(b)
        .filter_map(|(x, y)| Some((x?, y?)))
        .collect();
    if pairs.is_empty() {
        bail!("no complete observations for '{left}' and '{right}'");
    }

    let test = stats::chi_square_independence(&pairs)?;
    if test.min_expected < MIN_EXPECTED_COUNT {
        return Ok(Some(TestOutcome::Skipped {
            test: "chi-square test of independence".to_string(),
            reason: format!(
                "expected cell counts below {MIN_EXPECTED_COUNT:.0} (minimum = {:.2})",
                test.min_expected
            ),
        }));
    }

    Ok(Some(TestOutcome::Executed {
        test: "chi-square test of independence".to_string(),
        p_value: test.p_value,
        effect_size: EffectSize::new("Cramér's V", test.cramers_v),
        note: format!(
            "expected-count assumption satisfied (minimum = {:.2}, df = {})",
            test.min_expected, test.df
        ),
    }))
}

/// Continuous vs ordinal: Spearman rank correlation. A pair with zero
/// complete rows produces no record at all.
pub(crate) fn continuous_vs_ordinal(
    df: &DataFrame,
    continuous: &str,
    ordinal: &str,
) -> Result<Option<TestOutcome>> {
    let xs = numeric_values(df, continuous)?;
    let ys = numeric_values(df, ordinal)?;
    let (x, y) = complete_numeric_pairs(&xs, &ys);
    if x.is_empty() {
        return Ok(None);
    }

    let correlation = stats::spearman(&x, &y)?;
    Ok(Some(TestOutcome::Executed {
        test: "Spearman rank correlation".to_string(),
        p_value: correlation.p_value,
        effect_size: EffectSize::new("Spearman's rho", correlation.rho),
        note: "nonparametric rank correlation, the appropriate choice for ordinal data".to_string(),
    }))
}
