//! Matrix decomposition: principal component analysis.
//!
//! The PCA here backs principal-component regression: components are
//! computed once from training data and reused, never refit on test data.

use crate::error::{ElegirError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;

/// Principal Component Analysis (PCA).
///
/// Projects data onto the orthogonal directions of maximum variance,
/// computed by eigendecomposition of the covariance matrix. Components are
/// ordered by descending explained variance.
///
/// # Sign convention
///
/// An eigenvector is only defined up to sign, so each component is flipped
/// until its largest-magnitude loading is positive (lowest feature index
/// wins ties). Two runs over the same data therefore produce identical
/// loadings, and downstream regression coefficients are reproducible.
///
/// # Example
///
/// ```
/// use elegir::decomposition::PCA;
/// use elegir::traits::Transformer;
/// use elegir::primitives::Matrix;
///
/// let data = Matrix::from_vec(4, 3, vec![
///     1.0, 2.0, 3.0,
///     4.0, 5.0, 6.0,
///     7.0, 8.0, 9.0,
///     10.0, 11.0, 12.0,
/// ]).expect("valid matrix dimensions");
///
/// let mut pca = PCA::new(2);
/// let transformed = pca.fit_transform(&data).expect("fit_transform should succeed");
/// assert_eq!(transformed.shape(), (4, 2));
/// ```
#[derive(Debug, Clone)]
pub struct PCA {
    /// Number of components to keep.
    n_components: usize,
    /// Mean of each feature (computed during fit).
    mean: Option<Vec<f32>>,
    /// Principal components (eigenvectors), one per row.
    components: Option<Matrix<f32>>,
    /// Variance explained by each component.
    explained_variance: Option<Vec<f32>>,
    /// Ratio of variance explained by each component.
    explained_variance_ratio: Option<Vec<f32>>,
}

impl PCA {
    /// Creates a new PCA transformer keeping `n_components` components.
    #[must_use]
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            mean: None,
            components: None,
            explained_variance: None,
            explained_variance_ratio: None,
        }
    }

    /// Returns the variance explained by each component.
    #[must_use]
    pub fn explained_variance(&self) -> Option<&[f32]> {
        self.explained_variance.as_deref()
    }

    /// Returns the ratio of variance explained by each component.
    #[must_use]
    pub fn explained_variance_ratio(&self) -> Option<&[f32]> {
        self.explained_variance_ratio.as_deref()
    }

    /// Returns the principal components as a (n_components × n_features)
    /// matrix, one loading vector per row.
    #[must_use]
    pub fn components(&self) -> Option<&Matrix<f32>> {
        self.components.as_ref()
    }

    /// Returns the per-feature mean used for centering.
    #[must_use]
    pub fn mean(&self) -> Option<&[f32]> {
        self.mean.as_deref()
    }

    /// Flips each component so its largest-magnitude loading is positive.
    fn fix_component_signs(components: &mut [f32], n_components: usize, n_features: usize) {
        for c in 0..n_components {
            let row = &mut components[c * n_features..(c + 1) * n_features];
            let mut pivot = 0;
            for (j, value) in row.iter().enumerate() {
                if value.abs() > row[pivot].abs() {
                    pivot = j;
                }
            }
            if row[pivot] < 0.0 {
                for value in row.iter_mut() {
                    *value = -*value;
                }
            }
        }
    }
}

impl Transformer for PCA {
    fn fit(&mut self, x: &Matrix<f32>) -> Result<()> {
        use nalgebra::{DMatrix, SymmetricEigen};

        let (n_samples, n_features) = x.shape();

        if self.n_components < 1 || self.n_components > n_features {
            return Err(ElegirError::InvalidComponentCount {
                requested: self.n_components,
                n_features,
            });
        }
        if n_samples < 2 {
            return Err(ElegirError::insufficient_data(
                n_samples,
                2,
                "covariance estimation",
            ));
        }

        // Compute mean
        let mut mean = vec![0.0; n_features];
        for (j, mean_j) in mean.iter_mut().enumerate() {
            let mut sum = 0.0;
            for i in 0..n_samples {
                sum += x.get(i, j);
            }
            *mean_j = sum / n_samples as f32;
        }

        // Center the data
        let mut centered = vec![0.0; n_samples * n_features];
        for i in 0..n_samples {
            for j in 0..n_features {
                centered[i * n_features + j] = x.get(i, j) - mean[j];
            }
        }

        // Covariance matrix: Σ = (X^T X) / (n-1)
        let mut cov = vec![0.0; n_features * n_features];
        for i in 0..n_features {
            for j in 0..n_features {
                let mut sum = 0.0;
                for k in 0..n_samples {
                    sum += centered[k * n_features + i] * centered[k * n_features + j];
                }
                cov[i * n_features + j] = sum / (n_samples - 1) as f32;
            }
        }

        let cov_matrix = DMatrix::from_row_slice(n_features, n_features, &cov);
        let eigen = SymmetricEigen::new(cov_matrix);

        let eigenvalues = eigen.eigenvalues;
        let eigenvectors = eigen.eigenvectors;

        // Sort by eigenvalue (descending)
        let mut indices: Vec<usize> = (0..n_features).collect();
        indices.sort_by(|&a, &b| {
            eigenvalues[b]
                .partial_cmp(&eigenvalues[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut components_data = vec![0.0; self.n_components * n_features];
        let mut explained_variance = vec![0.0; self.n_components];

        for (i, &idx) in indices.iter().take(self.n_components).enumerate() {
            explained_variance[i] = eigenvalues[idx];
            for j in 0..n_features {
                components_data[i * n_features + j] = eigenvectors[(j, idx)];
            }
        }

        Self::fix_component_signs(&mut components_data, self.n_components, n_features);

        let total_variance: f32 = eigenvalues.iter().copied().sum();
        let explained_variance_ratio: Vec<f32> = explained_variance
            .iter()
            .map(|&v| if total_variance > 0.0 { v / total_variance } else { 0.0 })
            .collect();

        self.mean = Some(mean);
        self.components = Some(Matrix::from_vec(
            self.n_components,
            n_features,
            components_data,
        )?);
        self.explained_variance = Some(explained_variance);
        self.explained_variance_ratio = Some(explained_variance_ratio);

        Ok(())
    }

    fn transform(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        let components = self
            .components
            .as_ref()
            .ok_or_else(|| ElegirError::from("PCA not fitted"))?;
        let mean = self
            .mean
            .as_ref()
            .ok_or_else(|| ElegirError::from("PCA not fitted"))?;

        let (n_samples, n_features) = x.shape();

        if n_features != mean.len() {
            return Err(ElegirError::dimension_mismatch(
                "features",
                mean.len(),
                n_features,
            ));
        }

        // Project onto principal components: X_pca = (X - mean) @ components^T
        let mut result = vec![0.0; n_samples * self.n_components];

        for i in 0..n_samples {
            for j in 0..self.n_components {
                let mut value = 0.0;
                for k in 0..n_features {
                    value += (x.get(i, k) - mean[k]) * components.get(j, k);
                }
                result[i * self.n_components + j] = value;
            }
        }

        Matrix::from_vec(n_samples, self.n_components, result).map_err(Into::into)
    }
}
