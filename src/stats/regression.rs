//! Simple ordinary least squares regression of y on x.

use super::{mean, require_finite, two_tailed_t, StatError};

/// Outcome of a simple linear regression fit.
#[derive(Debug, Clone, Copy)]
pub struct RegressionFit {
    /// Slope of the fitted line.
    pub slope: f64,
    /// Intercept of the fitted line.
    pub intercept: f64,
    /// Two-tailed p-value of the slope coefficient (t, n - 2 df).
    pub slope_p_value: f64,
    /// Coefficient of determination, in [0, 1].
    pub r_squared: f64,
}

/// Fit `y = intercept + slope * x` by least squares.
///
/// Requires at least 3 complete pairs and a non-constant predictor.
pub fn simple_ols(x: &[f64], y: &[f64]) -> Result<RegressionFit, StatError> {
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

    let (mx, my) = (mean(x), mean(y));
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        sxx += (a - mx) * (a - mx);
        sxy += (a - mx) * (b - my);
        syy += (b - my) * (b - my);
    }
    if sxx <= 0.0 {
        return Err(StatError::Degenerate(
            "predictor has zero variance".to_string(),
        ));
    }
    if syy <= 0.0 {
        return Err(StatError::Degenerate(
            "response has zero variance".to_string(),
        ));
    }

    let slope = sxy / sxx;
    let intercept = my - slope * mx;

    let sse = (syy - slope * sxy).max(0.0);
    let r_squared = (1.0 - sse / syy).clamp(0.0, 1.0);

    let df = (n - 2) as f64;
    // Perfect fit: the slope standard error collapses to zero
    let slope_p_value = if sse <= f64::EPSILON * syy {
        0.0
    } else {
        let se = (sse / df / sxx).sqrt();
        two_tailed_t(slope / se, df)?
    };

    Ok(RegressionFit {
        slope,
        intercept,
        slope_p_value,
        r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_linear_relation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let fit = simple_ols(&x, &y).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert_eq!(fit.slope_p_value, 0.0);
    }

    #[test]
    fn noisy_relation_matches_hand_computation() {
        // sxx = 10, sxy = 8, syy = 10 -> slope 0.8, r2 0.64,
        // se = sqrt(3.6 / 3 / 10), t = 2.3094, df 3, p ~ 0.1041
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let fit = simple_ols(&x, &y).unwrap();
        assert!((fit.slope - 0.8).abs() < 1e-12);
        assert!((fit.r_squared - 0.64).abs() < 1e-12);
        assert!((fit.slope_p_value - 0.1041).abs() < 1e-3, "p = {}", fit.slope_p_value);
    }

    #[test]
    fn constant_predictor_is_degenerate() {
        let x = [2.0, 2.0, 2.0, 2.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        assert!(matches!(simple_ols(&x, &y), Err(StatError::Degenerate(_))));
    }

    #[test]
    fn constant_response_is_degenerate() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [7.0, 7.0, 7.0, 7.0];
        assert!(matches!(simple_ols(&x, &y), Err(StatError::Degenerate(_))));
    }

    #[test]
    fn non_finite_pairs_are_rejected() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, f64::INFINITY, 6.0, 8.0];
        assert!(matches!(simple_ols(&x, &y), Err(StatError::InvalidInput(_))));
    }

    #[test]
    fn too_few_pairs_are_rejected() {
        assert!(matches!(
            simple_ols(&[1.0, 2.0], &[3.0, 4.0]),
            Err(StatError::TooFewObservations { .. })
        ));
    }
}
