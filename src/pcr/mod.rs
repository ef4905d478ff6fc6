//! Principal-component regression pipeline.
//!
//! Standardizes predictors with training statistics, projects them onto
//! principal components fitted from training data only, and regresses the
//! response on the leading component scores, reporting held-out and
//! cross-validated accuracy for every component count.

use crate::decomposition::PCA;
use crate::error::{ElegirError, Result};
use crate::linear_model::LinearRegression;
use crate::metrics::{mse, r_squared};
use crate::model_selection::{cross_validate, KFold};
use crate::preprocessing::StandardScaler;
use crate::primitives::{Matrix, Vector};
use crate::traits::{Estimator, Transformer};
use serde::{Deserialize, Serialize};

/// One row of the PCR trade-off table: the fitted transform, the regressor
/// over the leading `n_components` scores, and its accuracy metrics.
///
/// Because the predictors are standardized (centered) before regression,
/// the fitted `intercept` equals the mean of the training response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcrResult {
    /// Number of leading components used.
    pub n_components: usize,
    /// Per-feature mean from the training split.
    pub mean: Vec<f32>,
    /// Per-feature standard deviation from the training split.
    pub std: Vec<f32>,
    /// Retained loading vectors, one component per row (n_components × p).
    pub components: Matrix<f32>,
    /// Fitted regression intercept (the training-response mean).
    pub intercept: f32,
    /// Fitted regression coefficients over the component scores.
    pub coefficients: Vector<f32>,
    /// R² on the held-out test split.
    pub r_squared: f32,
    /// Mean cross-validated R² over the training folds.
    pub cv_r_squared: f32,
    /// MSE on the held-out test split.
    pub mse: f32,
    /// Mean cross-validated MSE over the training folds.
    pub cv_mse: f32,
}

/// Principal-component regression pipeline.
///
/// # Train/test separation
///
/// Standardization statistics and principal components come from the
/// training split alone; the identical transform is applied to the test
/// split. Test rows never influence the transform, the components, or the
/// fitted regressors, so the held-out metrics stay honest.
///
/// # Cross-validation scheme
///
/// PCA is held fixed across folds: the training scores are computed once,
/// and only the linear regressor is refit on each fold's training portion.
///
/// # Example
///
/// ```
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
/// assert_eq!(table.len(), 2);
/// assert!(table[1].r_squared > 0.99);
/// ```
#[derive(Debug, Clone)]
pub struct PcrPipeline {
    max_components: usize,
    cv_folds: usize,
    random_state: Option<u64>,
}

impl PcrPipeline {
    /// Creates a pipeline evaluating component counts 1..=`max_components`
    /// with `cv_folds`-fold cross-validation.
    #[must_use]
    pub fn new(max_components: usize, cv_folds: usize) -> Self {
        Self {
            max_components,
            cv_folds,
            random_state: None,
        }
    }

    /// Seeds the fold shuffling. Without a seed, folds are contiguous.
    /// Fold assignment is deterministic either way.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Runs the pipeline, returning one [`PcrResult`] per component count,
    /// ordered by count ascending. The full table is returned; no row is
    /// discarded.
    ///
    /// # Errors
    ///
    /// - [`ElegirError::InvalidComponentCount`] if `max_components` is 0 or
    ///   exceeds the feature count.
    /// - [`ElegirError::InsufficientData`] if the training split is smaller
    ///   than `cv_folds` or than `max_components + 1`; `cv_folds` below 2 is
    ///   rejected as an invalid parameter.
    /// - [`ElegirError::DimensionMismatch`] if train/test widths or row
    ///   counts disagree.
    /// - [`ElegirError::SingularSystem`] naming the component count whose
    ///   fit failed.
    pub fn evaluate(
        &self,
        train_x: &Matrix<f32>,
        train_y: &Vector<f32>,
        test_x: &Matrix<f32>,
        test_y: &Vector<f32>,
    ) -> Result<Vec<PcrResult>> {
        let (n_train, n_features) = train_x.shape();
        let (n_test, test_features) = test_x.shape();

        if test_features != n_features {
            return Err(ElegirError::dimension_mismatch(
                "test features",
                n_features,
                test_features,
            ));
        }
        if n_train != train_y.len() {
            return Err(ElegirError::dimension_mismatch(
                "training samples",
                n_train,
                train_y.len(),
            ));
        }
        if n_test != test_y.len() {
            return Err(ElegirError::dimension_mismatch(
                "test samples",
                n_test,
                test_y.len(),
            ));
        }
        if self.max_components < 1 || self.max_components > n_features {
            return Err(ElegirError::InvalidComponentCount {
                requested: self.max_components,
                n_features,
            });
        }
        if self.cv_folds < 2 {
            return Err(format!("cv_folds must be at least 2, got {}", self.cv_folds).into());
        }
        if n_train < self.cv_folds {
            return Err(ElegirError::insufficient_data(
                n_train,
                self.cv_folds,
                &format!("{}-fold cross-validation", self.cv_folds),
            ));
        }
        if n_train < self.max_components + 1 {
            return Err(ElegirError::insufficient_data(
                n_train,
                self.max_components + 1,
                &format!("regression on {} components", self.max_components),
            ));
        }

        // Training statistics only; the same transform is applied to test
        let mut scaler = StandardScaler::new();
        let train_scaled = scaler.fit_transform(train_x)?;
        let test_scaled = scaler.transform(test_x)?;

        // One PCA fit at max_components; leading-k truncation is exact
        // because components are variance-ordered
        let mut pca = PCA::new(self.max_components);
        pca.fit(&train_scaled)?;
        let train_scores = pca.transform(&train_scaled)?;
        let test_scores = pca.transform(&test_scaled)?;

        let components = pca
            .components()
            .expect("PCA fitted above")
            .clone();

        let kfold = match self.random_state {
            Some(seed) => KFold::new(self.cv_folds).with_random_state(seed),
            None => KFold::new(self.cv_folds),
        };

        let mut table = Vec::with_capacity(self.max_components);

        for k in 1..=self.max_components {
            let train_k = train_scores.leading_columns(k);
            let test_k = test_scores.leading_columns(k);

            let mut model = LinearRegression::new();
            model
                .fit(&train_k, train_y)
                .map_err(|err| component_context(err, k))?;

            let y_pred = model.predict(&test_k);
            let plain_r2 = r_squared(&y_pred, test_y);
            let plain_mse = mse(&y_pred, test_y);

            let cv = cross_validate(&LinearRegression::new(), &train_k, train_y, &kfold)
                .map_err(|err| component_context(err, k))?;

            table.push(PcrResult {
                n_components: k,
                mean: scaler.mean().to_vec(),
                std: scaler.std().to_vec(),
                components: leading_rows(&components, k),
                intercept: model.intercept(),
                coefficients: model.coefficients().clone(),
                r_squared: plain_r2,
                cv_r_squared: cv.mean_r_squared(),
                mse: plain_mse,
                cv_mse: cv.mean_mse(),
            });
        }

        Ok(table)
    }
}

/// Rewrites a singular-system error to name the component count.
fn component_context(err: ElegirError, k: usize) -> ElegirError {
    match err {
        ElegirError::SingularSystem { .. } => ElegirError::SingularSystem {
            context: format!("component count k={k}"),
        },
        other => other,
    }
}

/// Copies the first `k` rows of a row-major matrix.
fn leading_rows(m: &Matrix<f32>, k: usize) -> Matrix<f32> {
    let (_, cols) = m.shape();
    Matrix::from_vec(k, cols, m.as_slice()[..k * cols].to_vec())
        .expect("slice length matches k * cols")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 20 rows, 3 predictors, y = 2*x1 - x2 exactly.
    fn noiseless_data() -> (Matrix<f32>, Vector<f32>) {
        let n = 20;
        let mut x_data = Vec::with_capacity(n * 3);
        let mut y_data = Vec::with_capacity(n);
        for i in 0..n {
            let x1 = (i as f32) * 0.5;
            let x2 = ((i * 7 + 3) % 11) as f32;
            let x3 = ((i * 5 + 1) % 13) as f32;
            x_data.extend_from_slice(&[x1, x2, x3]);
            y_data.push(2.0 * x1 - x2);
        }
        (
            Matrix::from_vec(n, 3, x_data).unwrap(),
            Vector::from_vec(y_data),
        )
    }

    fn split_at(
        x: &Matrix<f32>,
        y: &Vector<f32>,
        n_train: usize,
    ) -> (Matrix<f32>, Vector<f32>, Matrix<f32>, Vector<f32>) {
        let (n, p) = x.shape();
        let train_x =
            Matrix::from_vec(n_train, p, x.as_slice()[..n_train * p].to_vec()).unwrap();
        let test_x =
            Matrix::from_vec(n - n_train, p, x.as_slice()[n_train * p..].to_vec()).unwrap();
        let train_y = y.slice(0, n_train);
        let test_y = y.slice(n_train, n);
        (train_x, train_y, test_x, test_y)
    }

    #[test]
    fn test_full_table_is_returned() {
        let (x, y) = noiseless_data();
        let (train_x, train_y, test_x, test_y) = split_at(&x, &y, 15);

        let table = PcrPipeline::new(3, 5)
            .evaluate(&train_x, &train_y, &test_x, &test_y)
            .unwrap();

        assert_eq!(table.len(), 3);
        for (i, row) in table.iter().enumerate() {
            assert_eq!(row.n_components, i + 1);
            assert_eq!(row.coefficients.len(), i + 1);
            assert_eq!(row.components.shape(), (i + 1, 3));
            assert_eq!(row.mean.len(), 3);
            assert_eq!(row.std.len(), 3);
        }
    }

    #[test]
    fn test_full_rank_reconstructs_exact_fit() {
        let (x, y) = noiseless_data();
        let (train_x, train_y, test_x, test_y) = split_at(&x, &y, 15);

        let table = PcrPipeline::new(3, 5)
            .evaluate(&train_x, &train_y, &test_x, &test_y)
            .unwrap();

        // Full-rank PCA is a rotation: k = p recovers the exact fit
        let full = &table[2];
        assert!(
            (full.r_squared - 1.0).abs() < 1e-3,
            "full-rank R² should be 1.0, got {}",
            full.r_squared
        );
        assert!(full.mse < 1e-2);
    }

    #[test]
    fn test_intercept_is_training_response_mean() {
        let (x, y) = noiseless_data();
        let (train_x, train_y, test_x, test_y) = split_at(&x, &y, 15);

        let table = PcrPipeline::new(3, 5)
            .evaluate(&train_x, &train_y, &test_x, &test_y)
            .unwrap();

        for row in &table {
            assert!(
                (row.intercept - train_y.mean()).abs() < 1e-3,
                "intercept {} should equal training mean {}",
                row.intercept,
                train_y.mean()
            );
        }
    }

    #[test]
    fn test_tampering_with_test_rows_leaves_training_side_unchanged() {
        let (x, y) = noiseless_data();
        let (train_x, train_y, test_x, test_y) = split_at(&x, &y, 15);

        let table = PcrPipeline::new(3, 5)
            .evaluate(&train_x, &train_y, &test_x, &test_y)
            .unwrap();

        // Corrupt every test row badly
        let (n_test, p) = test_x.shape();
        let corrupted_x =
            Matrix::from_vec(n_test, p, test_x.as_slice().iter().map(|v| v * 100.0 + 7.0).collect())
                .unwrap();
        let corrupted_y = Vector::from_vec(test_y.as_slice().iter().map(|v| -v).collect());

        let tampered = PcrPipeline::new(3, 5)
            .evaluate(&train_x, &train_y, &corrupted_x, &corrupted_y)
            .unwrap();

        // Everything learned from training data is bit-identical
        for (row, trow) in table.iter().zip(tampered.iter()) {
            assert_eq!(row.mean, trow.mean);
            assert_eq!(row.std, trow.std);
            assert_eq!(row.components.as_slice(), trow.components.as_slice());
            assert_eq!(row.intercept, trow.intercept);
            assert_eq!(row.coefficients.as_slice(), trow.coefficients.as_slice());
            assert_eq!(row.cv_r_squared, trow.cv_r_squared);
            assert_eq!(row.cv_mse, trow.cv_mse);
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let (x, y) = noiseless_data();
        let (train_x, train_y, test_x, test_y) = split_at(&x, &y, 15);

        let run1 = PcrPipeline::new(3, 5)
            .with_random_state(42)
            .evaluate(&train_x, &train_y, &test_x, &test_y)
            .unwrap();
        let run2 = PcrPipeline::new(3, 5)
            .with_random_state(42)
            .evaluate(&train_x, &train_y, &test_x, &test_y)
            .unwrap();

        for (a, b) in run1.iter().zip(run2.iter()) {
            assert_eq!(a.cv_r_squared, b.cv_r_squared);
            assert_eq!(a.cv_mse, b.cv_mse);
            assert_eq!(a.r_squared, b.r_squared);
        }
    }

    #[test]
    fn test_zero_components_errors() {
        let (x, y) = noiseless_data();
        let (train_x, train_y, test_x, test_y) = split_at(&x, &y, 15);

        let result = PcrPipeline::new(0, 5).evaluate(&train_x, &train_y, &test_x, &test_y);
        assert!(matches!(
            result,
            Err(ElegirError::InvalidComponentCount { .. })
        ));
    }

    #[test]
    fn test_too_many_components_errors() {
        let (x, y) = noiseless_data();
        let (train_x, train_y, test_x, test_y) = split_at(&x, &y, 15);

        let result = PcrPipeline::new(4, 5).evaluate(&train_x, &train_y, &test_x, &test_y);
        assert!(matches!(
            result,
            Err(ElegirError::InvalidComponentCount { .. })
        ));
    }

    #[test]
    fn test_too_few_training_rows_for_folds_errors() {
        let (x, y) = noiseless_data();
        let (train_x, train_y, test_x, test_y) = split_at(&x, &y, 4);

        let result = PcrPipeline::new(3, 5).evaluate(&train_x, &train_y, &test_x, &test_y);
        assert!(matches!(
            result,
            Err(ElegirError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_mismatched_test_width_errors() {
        let (x, y) = noiseless_data();
        let (train_x, train_y, _, test_y) = split_at(&x, &y, 15);
        let narrow_test = Matrix::from_vec(5, 2, vec![0.0; 10]).unwrap();

        let result = PcrPipeline::new(3, 5).evaluate(&train_x, &train_y, &narrow_test, &test_y);
        assert!(matches!(
            result,
            Err(ElegirError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_cv_folds_below_two_errors() {
        let (x, y) = noiseless_data();
        let (train_x, train_y, test_x, test_y) = split_at(&x, &y, 15);

        let result = PcrPipeline::new(3, 1).evaluate(&train_x, &train_y, &test_x, &test_y);
        assert!(result.is_err());
    }

    #[test]
    fn test_leading_rows() {
        let m = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let top = leading_rows(&m, 2);
        assert_eq!(top.shape(), (2, 2));
        assert_eq!(top.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }
}
