//! Shapiro-Wilk normality test.
//!
//! Implements the AS R94 algorithm (Royston 1995): approximate normal-order
//! statistic weights with polynomial corrections for the two largest
//! coefficients, then a normalizing transformation of W to a standard normal
//! z for the p-value. Matches the behavior of the widely used scientific
//! stacks for 3 <= n <= 5000.

use statrs::distribution::{ContinuousCDF, Normal};

use super::{clamp_p, mean, require_finite, StatError};

/// Outcome of a normality test.
#[derive(Debug, Clone, Copy)]
pub struct NormalityTest {
    /// The W statistic, in (0, 1]; values near 1 are consistent with normality.
    pub statistic: f64,
    /// Probability of observing a W this small under the null of normality.
    pub p_value: f64,
}

// Polynomial corrections for the largest and second-largest weights (AS R94).
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];

fn poly(coefs: &[f64], x: f64) -> f64 {
    coefs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Shapiro-Wilk test of the null hypothesis that `sample` is drawn from a
/// normal distribution.
///
/// Errors with [`StatError::TooFewObservations`] for n < 3 and
/// [`StatError::Degenerate`] when all observations are identical.
pub fn shapiro_wilk(sample: &[f64]) -> Result<NormalityTest, StatError> {
    let n = sample.len();
    if n < 3 {
        return Err(StatError::TooFewObservations {
            required: 3,
            actual: n,
        });
    }
    require_finite(sample)?;

    let mut x = sample.to_vec();
    x.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    if x[n - 1] - x[0] <= 0.0 {
        return Err(StatError::Degenerate(
            "all observations are identical".to_string(),
        ));
    }

    let std_normal = Normal::new(0.0, 1.0)
        .map_err(|_| StatError::Degenerate("standard normal unavailable".to_string()))?;

    // Expected normal order statistics (Blom approximation).
    let nf = n as f64;
    let m: Vec<f64> = (1..=n)
        .map(|i| std_normal.inverse_cdf((i as f64 - 0.375) / (nf + 0.25)))
        .collect();
    let ssq_m: f64 = m.iter().map(|v| v * v).sum();

    // Weight vector with Royston's polynomial adjustment of the tail weights.
    let mut a = vec![0.0; n];
    if n == 3 {
        a[2] = std::f64::consts::FRAC_1_SQRT_2;
        a[0] = -a[2];
    } else {
        let rsn = ssq_m.sqrt();
        let u = 1.0 / nf.sqrt();
        a[n - 1] = poly(&C1, u) + m[n - 1] / rsn;
        let phi = if n > 5 {
            a[n - 2] = poly(&C2, u) + m[n - 2] / rsn;
            (ssq_m - 2.0 * m[n - 1] * m[n - 1] - 2.0 * m[n - 2] * m[n - 2])
                / (1.0 - 2.0 * a[n - 1] * a[n - 1] - 2.0 * a[n - 2] * a[n - 2])
        } else {
            (ssq_m - 2.0 * m[n - 1] * m[n - 1]) / (1.0 - 2.0 * a[n - 1] * a[n - 1])
        };
        let sqrt_phi = phi.sqrt();

        a[0] = -a[n - 1];
        let lower = if n > 5 {
            a[1] = -a[n - 2];
            2
        } else {
            1
        };
        for i in lower..(n - lower) {
            a[i] = m[i] / sqrt_phi;
        }
    }

    // W = (sum a_i x_(i))^2 / sum (x_i - mean)^2
    let xb = mean(&x);
    let numerator: f64 = a.iter().zip(x.iter()).map(|(ai, xi)| ai * xi).sum();
    let denominator: f64 = x.iter().map(|xi| (xi - xb) * (xi - xb)).sum();
    let w = (numerator * numerator / denominator).min(1.0);

    let p_value = shapiro_p_value(w, n, &std_normal);
    Ok(NormalityTest {
        statistic: w,
        p_value: clamp_p(p_value),
    })
}

/// Royston's normalizing transformation of W, with the exact small-sample
/// form for n = 3.
fn shapiro_p_value(w: f64, n: usize, std_normal: &Normal) -> f64 {
    let nf = n as f64;
    if n == 3 {
        let pi6 = 6.0 / std::f64::consts::PI;
        let stqr = (0.75_f64).sqrt().asin();
        return (pi6 * (w.sqrt().asin() - stqr)).clamp(0.0, 1.0);
    }

    let lw = (1.0 - w).ln();
    let z = if n <= 11 {
        let gamma = -2.273 + 0.459 * nf;
        let mu = 0.5440 - 0.39978 * nf + 0.025054 * nf * nf - 0.0006714 * nf * nf * nf;
        let sigma = (1.3822 - 0.77857 * nf + 0.062767 * nf * nf - 0.0020322 * nf * nf * nf).exp();
        (-(gamma - lw).ln() - mu) / sigma
    } else {
        let ln_n = nf.ln();
        let mu = -1.5861 - 0.31082 * ln_n - 0.083751 * ln_n * ln_n + 0.0038915 * ln_n.powi(3);
        let sigma = (-0.4803 - 0.082676 * ln_n + 0.0030302 * ln_n * ln_n).exp();
        (lw - mu) / sigma
    };
    1.0 - std_normal.cdf(z)
}
