//! Evaluation metrics for regression models.
//!
//! Includes goodness-of-fit metrics (R², MSE, RMSE) and the penalized
//! model-comparison scores used by best-subset selection (adjusted R²,
//! AIC, BIC).

use crate::primitives::Vector;

/// Computes the coefficient of determination (R²).
///
/// R² = 1 - (`SS_res` / `SS_tot`)
///
/// where `SS_res` is the residual sum of squares and `SS_tot` is the total
/// sum of squares.
///
/// # Examples
///
/// ```
/// use elegir::metrics::r_squared;
/// use elegir::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// let r2 = r_squared(&y_pred, &y_true);
/// assert!(r2 > 0.9);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths.
#[must_use]
pub fn r_squared(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");

    let y_mean = y_true.mean();

    let ss_res = residual_sum_of_squares(y_pred, y_true);
    let ss_tot: f32 = y_true.as_slice().iter().map(|t| (t - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return 0.0;
    }

    1.0 - (ss_res / ss_tot)
}

/// Computes the residual sum of squares, RSS = `Σ(y_true` - `y_pred)²`.
///
/// # Panics
///
/// Panics if vectors have different lengths.
#[must_use]
pub fn residual_sum_of_squares(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");

    y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum()
}

/// Computes the Mean Squared Error (MSE).
///
/// MSE = (1/n) * `Σ(y_true` - `y_pred)²`
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn mse(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> f32 {
    assert!(!y_true.is_empty(), "Vectors cannot be empty");
    residual_sum_of_squares(y_pred, y_true) / y_true.len() as f32
}

/// Computes the Root Mean Squared Error (RMSE).
///
/// RMSE = sqrt(MSE)
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn rmse(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> f32 {
    mse(y_pred, y_true).sqrt()
}

/// Computes adjusted R² for a model with `k` predictors fit on `n` samples.
///
/// adjusted R² = 1 - (1 - R²) * (n - 1) / (n - k - 1)
///
/// Penalizes predictor count: adding an uninformative predictor lowers the
/// adjusted score even though plain R² can only rise.
///
/// # Panics
///
/// Panics if `n <= k + 1` (non-positive residual degrees of freedom).
#[must_use]
pub fn adjusted_r_squared(r2: f32, n: usize, k: usize) -> f32 {
    assert!(n > k + 1, "Need n > k + 1 for adjusted R²");
    1.0 - (1.0 - r2) * (n as f32 - 1.0) / (n as f32 - k as f32 - 1.0)
}

/// Lower bound applied to RSS inside [`aic`] and [`bic`].
///
/// An f32 OLS fit of an exactly linear response leaves residuals at
/// rounding-noise scale; any RSS at or below this floor is treated as an
/// exact fit.
pub const RSS_FLOOR: f32 = 1e-6;

/// Computes the Akaike Information Criterion from the residual sum of squares.
///
/// AIC = n * ln(RSS / n) + 2 * d
///
/// under the Gaussian likelihood, with d = k + 1 fitted parameters (`k`
/// slopes plus the intercept). Lower is better. Additive constants shared
/// by all candidate models are omitted, so only differences between AIC
/// values are meaningful.
///
/// RSS is floored at [`RSS_FLOOR`]: below that level the residuals are
/// rounding noise, and flooring keeps the logarithm finite and lets
/// exact-interpolation models compare by their parameter penalty instead
/// of log-of-noise.
#[must_use]
pub fn aic(rss: f32, n: usize, k: usize) -> f32 {
    let d = (k + 1) as f32;
    let n = n as f32;
    n * (rss.max(RSS_FLOOR) / n).ln() + 2.0 * d
}

/// Computes the Bayesian Information Criterion from the residual sum of squares.
///
/// BIC = n * ln(RSS / n) + ln(n) * d
///
/// with d = k + 1 fitted parameters and RSS floored at [`RSS_FLOOR`], as
/// for [`aic`]. The ln(n) penalty grows with sample size, so BIC prefers
/// smaller models than AIC once n > e².
#[must_use]
pub fn bic(rss: f32, n: usize, k: usize) -> f32 {
    let d = (k + 1) as f32;
    let n_f = n as f32;
    n_f * (rss.max(RSS_FLOOR) / n_f).ln() + n_f.ln() * d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_r_squared_perfect_fit() {
        let y = Vector::from_slice(&[1.0, 2.0, 3.0]);
        assert!((r_squared(&y, &y) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_r_squared_mean_prediction_is_zero() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let y_pred = Vector::from_slice(&[2.0, 2.0, 2.0]);
        assert!(r_squared(&y_pred, &y_true).abs() < 1e-6);
    }

    #[test]
    fn test_r_squared_constant_target() {
        let y_true = Vector::from_slice(&[5.0, 5.0, 5.0]);
        let y_pred = Vector::from_slice(&[4.0, 5.0, 6.0]);
        assert_eq!(r_squared(&y_pred, &y_true), 0.0);
    }

    #[test]
    fn test_rss() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let y_pred = Vector::from_slice(&[1.0, 1.0, 5.0]);
        // (0)² + (1)² + (2)² = 5
        assert!((residual_sum_of_squares(&y_pred, &y_true) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_mse_and_rmse() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let y_pred = Vector::from_slice(&[1.0, 2.0, 3.0, 6.0]);
        assert!((mse(&y_pred, &y_true) - 1.0).abs() < 1e-6);
        assert!((rmse(&y_pred, &y_true) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_adjusted_r_squared_penalizes_size() {
        // Same R², more predictors -> lower adjusted R²
        let small = adjusted_r_squared(0.9, 20, 2);
        let large = adjusted_r_squared(0.9, 20, 6);
        assert!(small > large);
    }

    #[test]
    fn test_adjusted_r_squared_closed_form() {
        let adj = adjusted_r_squared(0.8, 10, 3);
        let expected = 1.0 - (1.0 - 0.8) * 9.0 / 6.0;
        assert!((adj - expected).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "n > k + 1")]
    fn test_adjusted_r_squared_degenerate_dof_panics() {
        let _ = adjusted_r_squared(0.5, 4, 3);
    }

    #[test]
    fn test_aic_closed_form() {
        let n = 20;
        let k = 3;
        let rss = 12.5_f32;
        let expected = 20.0 * (rss / 20.0).ln() + 2.0 * 4.0;
        assert!((aic(rss, n, k) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_bic_closed_form() {
        let n = 20;
        let k = 3;
        let rss = 12.5_f32;
        let expected = 20.0 * (rss / 20.0).ln() + (20.0_f32).ln() * 4.0;
        assert!((bic(rss, n, k) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_bic_penalty_exceeds_aic_for_large_n() {
        // ln(20) > 2, so with equal RSS the BIC penalty per parameter is larger
        let rss = 5.0;
        let diff_k = bic(rss, 20, 4) - bic(rss, 20, 2);
        let diff_k_aic = aic(rss, 20, 4) - aic(rss, 20, 2);
        assert!(diff_k > diff_k_aic);
    }

    #[test]
    fn test_aic_zero_rss_is_finite() {
        let value = aic(0.0, 10, 2);
        assert!(value.is_finite());
    }
}
