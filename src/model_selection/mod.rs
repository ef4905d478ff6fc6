//! Model selection utilities for cross-validation and train/test splitting.
//!
//! This module provides tools for:
//! - Train/test splitting
//! - K-Fold cross-validation
//! - Cross-validation reporting both R² and MSE per fold
//!
//! All stochastic steps are seeded: given the same `random_state`, fold
//! assignment and splits are identical across runs.

use crate::error::{ElegirError, Result};
use crate::metrics::{mse, r_squared};
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;

/// Per-fold metrics from cross-validation.
#[derive(Debug, Clone)]
pub struct CrossValidationResult {
    /// R² score for each validation fold
    pub r_squared: Vec<f32>,
    /// Mean squared error for each validation fold
    pub mse: Vec<f32>,
}

impl CrossValidationResult {
    /// Mean R² across folds.
    #[must_use]
    pub fn mean_r_squared(&self) -> f32 {
        mean(&self.r_squared)
    }

    /// Mean MSE across folds.
    #[must_use]
    pub fn mean_mse(&self) -> f32 {
        mean(&self.mse)
    }

    /// Standard deviation of the per-fold R² scores.
    #[must_use]
    pub fn std_r_squared(&self) -> f32 {
        if self.r_squared.is_empty() {
            return 0.0;
        }
        let mean = self.mean_r_squared();
        let variance = self
            .r_squared
            .iter()
            .map(|&score| (score - mean).powi(2))
            .sum::<f32>()
            / self.r_squared.len() as f32;
        variance.sqrt()
    }
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Run cross-validation on an estimator.
///
/// Trains a fresh clone of the model on each fold's training portion and
/// evaluates R² and MSE on the held-out fold.
///
/// # Example
///
/// ```rust
/// use elegir::prelude::*;
/// use elegir::model_selection::{cross_validate, KFold};
///
/// let x = Matrix::from_vec(50, 1, (0..50).map(|i| i as f32).collect()).unwrap();
/// let y = Vector::from_vec((0..50).map(|i| 2.0 * i as f32).collect());
///
/// let model = LinearRegression::new();
/// let kfold = KFold::new(5);
///
/// let results = cross_validate(&model, &x, &y, &kfold).unwrap();
/// assert!(results.mean_r_squared() > 0.99);
/// ```
///
/// # Errors
///
/// Returns an error if any fold's fit fails.
pub fn cross_validate<E>(
    estimator: &E,
    x: &Matrix<f32>,
    y: &Vector<f32>,
    cv: &KFold,
) -> Result<CrossValidationResult>
where
    E: Estimator + Clone,
{
    let n_samples = x.shape().0;
    if n_samples < cv.n_splits {
        return Err(ElegirError::insufficient_data(
            n_samples,
            cv.n_splits,
            "k-fold cross-validation",
        ));
    }

    let splits = cv.split(n_samples);

    let mut fold_r2 = Vec::with_capacity(splits.len());
    let mut fold_mse = Vec::with_capacity(splits.len());

    for (train_idx, test_idx) in splits {
        let (x_train, y_train) = extract_samples(x, y, &train_idx);
        let (x_test, y_test) = extract_samples(x, y, &test_idx);

        let mut fold_model = estimator.clone();
        fold_model.fit(&x_train, &y_train)?;

        let y_pred = fold_model.predict(&x_test);
        fold_r2.push(r_squared(&y_pred, &y_test));
        fold_mse.push(mse(&y_pred, &y_test));
    }

    Ok(CrossValidationResult {
        r_squared: fold_r2,
        mse: fold_mse,
    })
}

/// Extracts the rows at `indices` from a matrix/vector pair.
pub(crate) fn extract_samples(
    x: &Matrix<f32>,
    y: &Vector<f32>,
    indices: &[usize],
) -> (Matrix<f32>, Vector<f32>) {
    let n_features = x.shape().1;
    let mut x_data = Vec::with_capacity(indices.len() * n_features);
    let mut y_data = Vec::with_capacity(indices.len());

    for &idx in indices {
        for j in 0..n_features {
            x_data.push(x.get(idx, j));
        }
        y_data.push(y.as_slice()[idx]);
    }

    let x_subset =
        Matrix::from_vec(indices.len(), n_features, x_data).expect("Failed to create matrix");
    let y_subset = Vector::from_vec(y_data);

    (x_subset, y_subset)
}

/// K-Fold cross-validator.
///
/// Splits data into K consecutive folds. Each fold is used once as test set
/// while the remaining K-1 folds form the training set. Folds are contiguous
/// by default; with a `random_state` the sample order is shuffled first, and
/// the same seed always yields the same folds.
///
/// # Example
///
/// ```rust
/// use elegir::model_selection::KFold;
///
/// let kfold = KFold::new(5);
/// let splits = kfold.split(10);
/// assert_eq!(splits.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    random_state: Option<u64>,
}

impl KFold {
    /// Create a new K-Fold cross-validator.
    ///
    /// # Arguments
    ///
    /// * `n_splits` - Number of folds. Must be at least 2.
    #[must_use]
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: false,
            random_state: None,
        }
    }

    /// Enable shuffling before splitting into folds.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set random state for reproducible shuffling.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self.shuffle = true; // Shuffle is implied when random_state is set
        self
    }

    /// Returns the number of folds.
    #[must_use]
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Generate train/test indices for each fold.
    ///
    /// Returns a vector of (train_indices, test_indices) tuples. The
    /// remainder of `n_samples / n_splits` is spread over the leading
    /// folds, so every sample lands in exactly one test fold.
    #[must_use]
    pub fn split(&self, n_samples: usize) -> Vec<(Vec<usize>, Vec<usize>)> {
        let indices = shuffle_indices(n_samples, self.shuffle, self.random_state);

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut result = Vec::with_capacity(self.n_splits);
        let mut start = 0;

        for i in 0..self.n_splits {
            let current_fold_size = if i < remainder {
                fold_size + 1
            } else {
                fold_size
            };

            let end = start + current_fold_size;

            let test_indices: Vec<usize> = indices[start..end].to_vec();

            let mut train_indices = Vec::with_capacity(n_samples - current_fold_size);
            train_indices.extend_from_slice(&indices[..start]);
            train_indices.extend_from_slice(&indices[end..]);

            result.push((train_indices, test_indices));

            start = end;
        }

        result
    }
}

/// Produces the sample order for splitting, shuffled when requested.
fn shuffle_indices(n_samples: usize, shuffle: bool, random_state: Option<u64>) -> Vec<usize> {
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    let mut indices: Vec<usize> = (0..n_samples).collect();

    if shuffle {
        if let Some(seed) = random_state {
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            indices.shuffle(&mut rng);
        } else {
            let mut rng = rand::thread_rng();
            indices.shuffle(&mut rng);
        }
    }

    indices
}

/// Validates inputs for `train_test_split`.
fn validate_split_inputs(
    x: &Matrix<f32>,
    y: &Vector<f32>,
    test_size: f32,
) -> Result<(usize, usize)> {
    if test_size <= 0.0 || test_size >= 1.0 {
        return Err(format!("test_size must be between 0 and 1, got {test_size}").into());
    }

    let (n_samples, _) = x.shape();
    if n_samples != y.len() {
        return Err(ElegirError::dimension_mismatch(
            "samples",
            n_samples,
            y.len(),
        ));
    }

    let n_test = (n_samples as f32 * test_size).round() as usize;
    let n_train = n_samples - n_test;

    if n_test == 0 || n_train == 0 {
        return Err(format!(
            "Split would result in empty train or test set (n_train={n_train}, n_test={n_test})"
        )
        .into());
    }

    Ok((n_train, n_test))
}

/// Split arrays into random train and test subsets.
///
/// # Arguments
///
/// * `x` - Feature matrix
/// * `y` - Target vector
/// * `test_size` - Proportion of dataset to include in test split (0.0 to 1.0)
/// * `random_state` - Optional random seed for reproducibility
///
/// # Returns
///
/// Tuple of (x_train, x_test, y_train, y_test)
///
/// # Errors
///
/// Returns an error if `test_size` is out of range, dimensions mismatch, or
/// either side of the split would be empty.
///
/// # Example
///
/// ```rust
/// use elegir::model_selection::train_test_split;
/// use elegir::primitives::{Matrix, Vector};
///
/// let x = Matrix::from_vec(10, 2, (0..20).map(|i| i as f32).collect()).unwrap();
/// let y = Vector::from_slice(&[0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
///
/// let (x_train, x_test, _, _) = train_test_split(&x, &y, 0.2, Some(42)).unwrap();
/// assert_eq!(x_train.shape().0, 8);
/// assert_eq!(x_test.shape().0, 2);
/// ```
#[allow(clippy::type_complexity)]
pub fn train_test_split(
    x: &Matrix<f32>,
    y: &Vector<f32>,
    test_size: f32,
    random_state: Option<u64>,
) -> Result<(Matrix<f32>, Matrix<f32>, Vector<f32>, Vector<f32>)> {
    let (n_train, _) = validate_split_inputs(x, y, test_size)?;
    let n_samples = x.shape().0;

    let indices = shuffle_indices(n_samples, true, random_state);
    let train_indices = &indices[..n_train];
    let test_indices = &indices[n_train..];

    let (x_train, y_train) = extract_samples(x, y, train_indices);
    let (x_test, y_test) = extract_samples(x, y, test_indices);

    Ok((x_train, x_test, y_train, y_test))
}
