//! Model interpretation: fold a fitted PCR model back onto the original
//! features.
//!
//! A PCR model predicts from component scores, which obscures how each
//! original feature contributes. Multiplying the retained loading vectors
//! by the regression coefficients recovers an equivalent linear
//! combination over the original (standardized) features, directly
//! comparable with subset-selection coefficients.

use crate::error::{ElegirError, Result};
use crate::pcr::PcrResult;
use serde::{Deserialize, Serialize};

/// Effective per-feature weights reconstructed from a PCR model.
///
/// Weights live in the standardized-feature basis: a weight is the change
/// in predicted response per standard deviation of its feature. The
/// intercept is carried over from the regressor unchanged; with centered
/// inputs it is the training-response mean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructedCoefficients {
    weights: Vec<(String, f32)>,
    intercept: f32,
}

impl ReconstructedCoefficients {
    /// Returns the (feature name, weight) pairs in feature order.
    #[must_use]
    pub fn weights(&self) -> &[(String, f32)] {
        &self.weights
    }

    /// Returns the intercept.
    #[must_use]
    pub fn intercept(&self) -> f32 {
        self.intercept
    }

    /// Looks up the weight for a feature name.
    #[must_use]
    pub fn weight(&self, name: &str) -> Option<f32> {
        self.weights
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| *w)
    }

    /// Rescales the weights so the largest-magnitude weight becomes ±1,
    /// preserving signs. Useful for relative-importance comparison.
    ///
    /// All-zero weights are returned unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let max_abs = self
            .weights
            .iter()
            .map(|(_, w)| w.abs())
            .fold(0.0_f32, f32::max);

        if max_abs == 0.0 {
            return self.clone();
        }

        Self {
            weights: self
                .weights
                .iter()
                .map(|(n, w)| (n.clone(), w / max_abs))
                .collect(),
            intercept: self.intercept,
        }
    }
}

/// Reconstructs effective per-feature weights from a fitted PCR model.
///
/// The weight of original feature j is the dot product of column j of the
/// retained loading matrix with the regression coefficients:
/// w = loadingsᵀ β. At full rank this recovers the standardized OLS
/// coefficients exactly, since full-rank PCA is a rotation.
///
/// # Errors
///
/// Returns [`ElegirError::DimensionMismatch`] if `feature_names` doesn't
/// match the loading matrix width.
///
/// # Example
///
/// ```
/// use elegir::interpret::reconstruct;
/// use elegir::pcr::PcrPipeline;
/// use elegir::primitives::{Matrix, Vector};
///
/// let train_x = Matrix::from_vec(8, 2, vec![
///     1.0, 2.0, 2.0, 1.0, 3.0, 4.0, 4.0, 3.0,
///     5.0, 6.0, 6.0, 5.0, 7.0, 8.0, 8.0, 7.0,
/// ]).unwrap();
/// let train_y = Vector::from_slice(&[3.0, 3.0, 7.0, 7.0, 11.0, 11.0, 15.0, 15.0]);
/// let test_x = Matrix::from_vec(2, 2, vec![9.0, 10.0, 10.0, 9.0]).unwrap();
/// let test_y = Vector::from_slice(&[19.0, 19.0]);
///
/// let table = PcrPipeline::new(2, 4)
///     .evaluate(&train_x, &train_y, &test_x, &test_y)
///     .unwrap();
///
/// let coefs = reconstruct(&table[1], &["a", "b"]).unwrap();
/// assert_eq!(coefs.weights().len(), 2);
/// ```
pub fn reconstruct(
    result: &PcrResult,
    feature_names: &[&str],
) -> Result<ReconstructedCoefficients> {
    let (n_components, n_features) = result.components.shape();

    if feature_names.len() != n_features {
        return Err(ElegirError::dimension_mismatch(
            "feature names",
            n_features,
            feature_names.len(),
        ));
    }
    if result.coefficients.len() != n_components {
        return Err(ElegirError::dimension_mismatch(
            "coefficients",
            n_components,
            result.coefficients.len(),
        ));
    }

    let weights = feature_names
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let mut w = 0.0;
            for c in 0..n_components {
                w += result.components.get(c, j) * result.coefficients[c];
            }
            ((*name).to_string(), w)
        })
        .collect();

    Ok(ReconstructedCoefficients {
        weights,
        intercept: result.intercept,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Matrix, Vector};

    fn synthetic_result() -> PcrResult {
        // Two components over three features with simple loadings
        PcrResult {
            n_components: 2,
            mean: vec![0.0; 3],
            std: vec![1.0; 3],
            components: Matrix::from_vec(2, 3, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]).unwrap(),
            intercept: 5.0,
            coefficients: Vector::from_slice(&[2.0, -3.0]),
            r_squared: 1.0,
            cv_r_squared: 1.0,
            mse: 0.0,
            cv_mse: 0.0,
        }
    }

    #[test]
    fn test_reconstruct_axis_aligned_loadings() {
        let coefs = reconstruct(&synthetic_result(), &["a", "b", "c"]).unwrap();

        assert_eq!(coefs.weight("a"), Some(2.0));
        assert_eq!(coefs.weight("b"), Some(-3.0));
        assert_eq!(coefs.weight("c"), Some(0.0));
        assert_eq!(coefs.intercept(), 5.0);
    }

    #[test]
    fn test_reconstruct_mixed_loadings() {
        let result = PcrResult {
            components: Matrix::from_vec(2, 2, vec![0.6, 0.8, 0.8, -0.6]).unwrap(),
            coefficients: Vector::from_slice(&[1.0, 2.0]),
            n_components: 2,
            mean: vec![0.0; 2],
            std: vec![1.0; 2],
            intercept: 0.0,
            r_squared: 0.0,
            cv_r_squared: 0.0,
            mse: 0.0,
            cv_mse: 0.0,
        };

        let coefs = reconstruct(&result, &["a", "b"]).unwrap();
        // w_a = 0.6*1 + 0.8*2 = 2.2, w_b = 0.8*1 - 0.6*2 = -0.4
        assert!((coefs.weight("a").unwrap() - 2.2).abs() < 1e-6);
        assert!((coefs.weight("b").unwrap() + 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_wrong_name_count_errors() {
        let result = synthetic_result();
        assert!(matches!(
            reconstruct(&result, &["a", "b"]),
            Err(ElegirError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_normalized_preserves_sign_and_scales_max_to_one() {
        let coefs = reconstruct(&synthetic_result(), &["a", "b", "c"]).unwrap();
        let normalized = coefs.normalized();

        // Largest magnitude is |-3| -> becomes -1
        assert!((normalized.weight("b").unwrap() + 1.0).abs() < 1e-6);
        assert!((normalized.weight("a").unwrap() - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(normalized.weight("c"), Some(0.0));
        // Intercept unaffected by weight rescaling
        assert_eq!(normalized.intercept(), 5.0);
    }

    #[test]
    fn test_normalized_all_zero_is_identity() {
        let result = PcrResult {
            components: Matrix::from_vec(1, 2, vec![1.0, 0.0]).unwrap(),
            coefficients: Vector::from_slice(&[0.0]),
            n_components: 1,
            mean: vec![0.0; 2],
            std: vec![1.0; 2],
            intercept: 1.0,
            r_squared: 0.0,
            cv_r_squared: 0.0,
            mse: 0.0,
            cv_mse: 0.0,
        };
        let coefs = reconstruct(&result, &["a", "b"]).unwrap();
        let normalized = coefs.normalized();
        assert_eq!(normalized.weight("a"), Some(0.0));
        assert_eq!(normalized.weight("b"), Some(0.0));
    }

    #[test]
    fn test_weight_missing_name() {
        let coefs = reconstruct(&synthetic_result(), &["a", "b", "c"]).unwrap();
        assert_eq!(coefs.weight("missing"), None);
    }
}
