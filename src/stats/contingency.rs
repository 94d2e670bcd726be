//! Chi-square test of independence on a two-way contingency table.

use std::collections::BTreeMap;

use statrs::distribution::{ChiSquared, ContinuousCDF};

use super::{clamp_p, StatError};

/// Outcome of a chi-square independence test.
#[derive(Debug, Clone)]
pub struct IndependenceTest {
    /// Pearson chi-square statistic.
    pub statistic: f64,
    /// Degrees of freedom, (rows - 1) * (cols - 1).
    pub df: usize,
    /// Probability of a statistic this large under independence.
    pub p_value: f64,
    /// Smallest expected cell count; the classic rule requires >= 5.
    pub min_expected: f64,
    /// Cramér's V effect size, in [0, 1].
    pub cramers_v: f64,
}

/// Build a contingency table and run the Pearson chi-square test of
/// independence over paired categorical observations.
///
/// `BTreeMap` keeps category order deterministic, so repeated runs over the
/// same data produce identical tables and statistics.
pub fn chi_square_independence(pairs: &[(String, String)]) -> Result<IndependenceTest, StatError> {
    if pairs.is_empty() {
        return Err(StatError::TooFewObservations {
            required: 1,
            actual: 0,
        });
    }

    let mut counts: BTreeMap<&str, BTreeMap<&str, f64>> = BTreeMap::new();
    let mut col_totals: BTreeMap<&str, f64> = BTreeMap::new();
    for (row, col) in pairs {
        *counts
            .entry(row.as_str())
            .or_default()
            .entry(col.as_str())
            .or_insert(0.0) += 1.0;
        *col_totals.entry(col.as_str()).or_insert(0.0) += 1.0;
    }

    let n_rows = counts.len();
    let n_cols = col_totals.len();
    if n_rows < 2 || n_cols < 2 {
        return Err(StatError::Degenerate(format!(
            "contingency table is {n_rows}x{n_cols}, need at least 2x2"
        )));
    }

    let total = pairs.len() as f64;
    let row_totals: BTreeMap<&str, f64> = counts
        .iter()
        .map(|(row, cols)| (*row, cols.values().sum()))
        .collect();

    let mut statistic = 0.0;
    let mut min_expected = f64::INFINITY;
    for (row, row_total) in &row_totals {
        for (col, col_total) in &col_totals {
            let expected = row_total * col_total / total;
            min_expected = min_expected.min(expected);
            let observed = counts
                .get(row)
                .and_then(|cols| cols.get(col))
                .copied()
                .unwrap_or(0.0);
            statistic += (observed - expected) * (observed - expected) / expected;
        }
    }

    let df = (n_rows - 1) * (n_cols - 1);
    let dist = ChiSquared::new(df as f64)
        .map_err(|_| StatError::Degenerate("invalid chi-square degrees of freedom".to_string()))?;
    let p_value = clamp_p(1.0 - dist.cdf(statistic));
    let cramers_v = (statistic / (total * (n_rows.min(n_cols) - 1) as f64)).sqrt();

    Ok(IndependenceTest {
        statistic,
        df,
        p_value,
        min_expected,
        cramers_v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(spec: &[(&str, &str, usize)]) -> Vec<(String, String)> {
        spec.iter()
            .flat_map(|(r, c, n)| {
                std::iter::repeat((r.to_string(), c.to_string())).take(*n)
            })
            .collect()
    }

    #[test]
    fn balanced_2x2_matches_hand_computation() {
        // Table [[10, 20], [20, 10]]: every expected cell is 15,
        // chi2 = 4 * 25/15 = 6.6667, df 1, V = sqrt(6.6667 / 60) = 0.3333.
        let pairs = table(&[("a", "x", 10), ("a", "y", 20), ("b", "x", 20), ("b", "y", 10)]);
        let result = chi_square_independence(&pairs).unwrap();
        assert!((result.statistic - 20.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.df, 1);
        assert!((result.min_expected - 15.0).abs() < 1e-9);
        assert!((result.cramers_v - 1.0 / 3.0).abs() < 1e-9);
        assert!((result.p_value - 0.00982).abs() < 1e-4, "p = {}", result.p_value);
    }

    #[test]
    fn independent_columns_have_large_p() {
        let pairs = table(&[("a", "x", 15), ("a", "y", 15), ("b", "x", 15), ("b", "y", 15)]);
        let result = chi_square_independence(&pairs).unwrap();
        assert!((result.statistic).abs() < 1e-9);
        assert!(result.p_value > 0.99);
    }

    #[test]
    fn sparse_table_reports_small_min_expected() {
        // Row totals 4/16, col totals 10/10: smallest expected cell is 2.
        let pairs = table(&[("a", "x", 2), ("a", "y", 2), ("b", "x", 8), ("b", "y", 8)]);
        let result = chi_square_independence(&pairs).unwrap();
        assert!((result.min_expected - 2.0).abs() < 1e-9);
    }

    #[test]
    fn single_category_is_degenerate() {
        let pairs = table(&[("a", "x", 5), ("a", "y", 5)]);
        assert!(matches!(
            chi_square_independence(&pairs),
            Err(StatError::Degenerate(_))
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            chi_square_independence(&[]),
            Err(StatError::TooFewObservations { .. })
        ));
    }
}
