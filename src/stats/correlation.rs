//! Spearman rank correlation.
//!
//! Ranks both variables with average ranks for ties, correlates the ranks,
//! and derives a two-tailed p-value from the t approximation with n - 2
//! degrees of freedom.

use super::{mean, require_finite, two_tailed_t, StatError};

/// Outcome of a rank-correlation test.
#[derive(Debug, Clone, Copy)]
pub struct RankCorrelation {
    /// Spearman's rho, in [-1, 1].
    pub rho: f64,
    /// Two-tailed probability under the null of no monotone association.
    pub p_value: f64,
}

/// Assign 1-based ranks, averaging ranks across ties.
pub fn rank_with_ties(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        // Find the run of tied values starting at sorted position i
        let mut j = i + 1;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        let avg_rank = (i + j + 1) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg_rank;
        }
        i = j;
    }
    ranks
}

/// Spearman rank correlation between two paired samples.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<RankCorrelation, StatError> {
    if x.len() != y.len() {
        return Err(StatError::InvalidInput(format!(
            "paired samples differ in length: {} vs {}",
            x.len(),
            y.len()
        )));
    }
    let n = x.len();
    if n < 3 {
        return Err(StatError::TooFewObservations {
            required: 3,
            actual: n,
        });
    }
    require_finite(x)?;
    require_finite(y)?;

    let rx = rank_with_ties(x);
    let ry = rank_with_ties(y);

    let (mx, my) = (mean(&rx), mean(&ry));
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in rx.iter().zip(ry.iter()) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx) * (a - mx);
        syy += (b - my) * (b - my);
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return Err(StatError::Degenerate(
            "a variable is constant after ranking".to_string(),
        ));
    }

    let rho = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);

    // t approximation breaks down at |rho| = 1; the association is exact there.
    let p_value = if (1.0 - rho * rho) <= f64::EPSILON {
        0.0
    } else {
        let t = rho * ((n - 2) as f64 / (1.0 - rho * rho)).sqrt();
        two_tailed_t(t, (n - 2) as f64)?
    };

    Ok(RankCorrelation { rho, p_value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_receive_average_ranks() {
        assert_eq!(rank_with_ties(&[10.0, 20.0, 20.0, 30.0]), vec![1.0, 2.5, 2.5, 4.0]);
    }

    #[test]
    fn perfect_monotone_association() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [10.0, 100.0, 1000.0, 10000.0, 100000.0];
        let result = spearman(&x, &y).unwrap();
        assert!((result.rho - 1.0).abs() < 1e-12);
        assert_eq!(result.p_value, 0.0);
    }

    #[test]
    fn perfect_inverse_association() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [5.0, 4.0, 3.0, 2.0, 1.0];
        let result = spearman(&x, &y).unwrap();
        assert!((result.rho + 1.0).abs() < 1e-12);
    }

    #[test]
    fn unrelated_data_has_large_p() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let y = [3.0, 8.0, 1.0, 6.0, 2.0, 7.0, 4.0, 5.0];
        let result = spearman(&x, &y).unwrap();
        assert!(result.rho.abs() < 0.5);
        assert!(result.p_value > 0.05);
    }

    #[test]
    fn constant_variable_is_degenerate() {
        let x = [1.0, 1.0, 1.0, 1.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        assert!(matches!(spearman(&x, &y), Err(StatError::Degenerate(_))));
    }

    #[test]
    fn non_finite_pairs_are_invalid() {
        let x = [1.0, 2.0, f64::NAN, 4.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        assert!(matches!(spearman(&x, &y), Err(StatError::InvalidInput(_))));
        assert!(matches!(spearman(&y, &x), Err(StatError::InvalidInput(_))));
    }

    #[test]
    fn mismatched_lengths_are_invalid() {
        assert!(matches!(
            spearman(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(StatError::InvalidInput(_))
        ));
    }
}
