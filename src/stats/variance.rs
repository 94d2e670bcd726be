//! Levene's test for equality of variances.
//!
//! Uses the median-centered (Brown-Forsythe) form, the robust default of the
//! common scientific stacks: absolute deviations from the group median fed
//! into a one-way ANOVA, with an F(k-1, N-k) reference distribution.

use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use super::{clamp_p, mean, median, require_finite, StatError};

/// Outcome of a variance-homogeneity test.
#[derive(Debug, Clone, Copy)]
pub struct VarianceTest {
    /// The Levene W statistic.
    pub statistic: f64,
    /// Probability of a W this large under the null of equal variances.
    pub p_value: f64,
}

/// Levene's test (median-centered) across two or more groups.
pub fn levene(groups: &[&[f64]]) -> Result<VarianceTest, StatError> {
    let k = groups.len();
    if k < 2 {
        return Err(StatError::InvalidInput(format!(
            "variance comparison needs at least 2 groups, got {k}"
        )));
    }
    for (i, g) in groups.iter().enumerate() {
        if g.len() < 2 {
            return Err(StatError::InvalidInput(format!(
                "group {i} has {} observations, need at least 2",
                g.len()
            )));
        }
        require_finite(g)?;
    }

    let n_total: usize = groups.iter().map(|g| g.len()).sum();
    if n_total <= k {
        return Err(StatError::TooFewObservations {
            required: k + 1,
            actual: n_total,
        });
    }

    // Absolute deviations from the group median
    let z: Vec<Vec<f64>> = groups
        .iter()
        .map(|g| {
            let med = median(g);
            g.iter().map(|v| (v - med).abs()).collect()
        })
        .collect();

    let z_group_means: Vec<f64> = z.iter().map(|zg| mean(zg)).collect();
    let z_grand_mean =
        z.iter().flatten().sum::<f64>() / n_total as f64;

    let between: f64 = z
        .iter()
        .zip(z_group_means.iter())
        .map(|(zg, zm)| zg.len() as f64 * (zm - z_grand_mean) * (zm - z_grand_mean))
        .sum();
    let within: f64 = z
        .iter()
        .zip(z_group_means.iter())
        .map(|(zg, zm)| zg.iter().map(|v| (v - zm) * (v - zm)).sum::<f64>())
        .sum();

    if within <= 0.0 {
        return Err(StatError::Degenerate(
            "zero within-group spread, variances cannot be compared".to_string(),
        ));
    }

    let df1 = (k - 1) as f64;
    let df2 = (n_total - k) as f64;
    let w = (df2 / df1) * (between / within);

    let f_dist = FisherSnedecor::new(df1, df2)
        .map_err(|_| StatError::Degenerate("invalid F degrees of freedom".to_string()))?;
    let p_value = clamp_p(1.0 - f_dist.cdf(w));

    Ok(VarianceTest {
        statistic: w,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similar_spreads_are_not_flagged() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [11.2, 12.1, 13.0, 13.9, 14.8, 16.1];
        let result = levene(&[&a, &b]).unwrap();
        assert!(result.p_value > 0.05, "p = {}", result.p_value);
    }

    #[test]
    fn wildly_different_spreads_are_flagged() {
        let a = [9.9, 10.0, 10.1, 9.95, 10.05, 10.0, 9.98, 10.02];
        let b = [-50.0, 60.0, -45.0, 70.0, -80.0, 30.0, -20.0, 90.0];
        let result = levene(&[&a, &b]).unwrap();
        assert!(result.p_value < 0.01, "p = {}", result.p_value);
    }

    #[test]
    fn single_group_is_invalid() {
        let a = [1.0, 2.0, 3.0];
        assert!(matches!(levene(&[&a]), Err(StatError::InvalidInput(_))));
    }

    #[test]
    fn non_finite_observations_are_invalid() {
        let a = [1.0, 2.0, f64::NAN, 4.0];
        let b = [1.0, 2.0, 3.0, 4.0];
        assert!(matches!(levene(&[&a, &b]), Err(StatError::InvalidInput(_))));
    }

    #[test]
    fn constant_groups_are_degenerate() {
        let a = [1.0, 1.0, 1.0];
        let b = [2.0, 2.0, 2.0];
        assert!(matches!(levene(&[&a, &b]), Err(StatError::Degenerate(_))));
    }
}
