//! Exhaustive best-subset regression selection.
//!
//! Enumerates every predictor subset up to a maximum size, fits an OLS
//! model per subset, and retains the best-scoring model per subset size.
//!
//! The search is exhaustive: p predictors yield 2^p - 1 candidate subsets,
//! so cost doubles with every added predictor. That is acceptable for the
//! small clinical tables this crate targets (8 predictors = 255 fits) and
//! remains practical up to roughly 15-20 predictors; beyond that a
//! branch-and-bound search would be needed, which this module does not
//! attempt.

use crate::data::Dataset;
use crate::error::{ElegirError, Result};
use crate::linear_model::LinearRegression;
use crate::metrics::{adjusted_r_squared, aic, bic, r_squared, residual_sum_of_squares};
use crate::primitives::Vector;
use crate::traits::Estimator;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Score used to rank candidate subsets of the same size.
///
/// RSS, AIC and BIC rank lower-is-better; adjusted R² higher-is-better.
/// For a fixed subset size every criterion except RSS is a monotone
/// transform of RSS, so they agree within a size; the enum matters when a
/// caller re-ranks across sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionCriterion {
    /// Residual sum of squares (default).
    #[default]
    Rss,
    /// Akaike information criterion.
    Aic,
    /// Bayesian information criterion.
    Bic,
    /// Adjusted R².
    AdjustedRSquared,
}

/// A fitted candidate model retained by the search: the best subset of its
/// size under the selection criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateModel {
    /// Number of predictors in the subset.
    pub size: usize,
    /// Predictor names, lexicographically ordered.
    pub predictors: Vec<String>,
    /// Fitted intercept.
    pub intercept: f32,
    /// Fitted coefficients, aligned with `predictors`.
    pub coefficients: Vector<f32>,
    /// Residual sum of squares.
    pub rss: f32,
    /// Coefficient of determination.
    pub r_squared: f32,
    /// R² penalized for predictor count.
    pub adjusted_r_squared: f32,
    /// Akaike information criterion.
    pub aic: f32,
    /// Bayesian information criterion.
    pub bic: f32,
}

/// Exhaustive best-subset selector.
///
/// # Determinism
///
/// Predictor names are sorted lexicographically and subsets of each size
/// are enumerated in lexicographic combination order. Ties on the
/// criterion keep the first subset in that order. The per-subset fits run
/// in parallel, but the reduction compares enumeration indices, so the
/// retained table is identical to a sequential run.
///
/// # Example
///
/// ```
/// use elegir::data::Dataset;
/// use elegir::primitives::Vector;
/// use elegir::subset_selection::BestSubsetSelector;
///
/// let ds = Dataset::new(vec![
///     ("x1".to_string(), Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])),
///     ("x2".to_string(), Vector::from_slice(&[2.0, 1.0, 4.0, 3.0, 6.0, 5.0])),
///     ("y".to_string(), Vector::from_slice(&[5.0, 4.0, 11.0, 10.0, 17.0, 16.0])),
/// ], "y").unwrap();
///
/// let table = BestSubsetSelector::new(2).select(&ds).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table[0].size, 1);
/// assert_eq!(table[1].size, 2);
/// ```
#[derive(Debug, Clone)]
pub struct BestSubsetSelector {
    max_size: usize,
    criterion: SelectionCriterion,
}

impl BestSubsetSelector {
    /// Creates a selector searching subset sizes 1..=`max_size`.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            criterion: SelectionCriterion::default(),
        }
    }

    /// Sets the criterion used to rank subsets within a size.
    #[must_use]
    pub fn with_criterion(mut self, criterion: SelectionCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Runs the exhaustive search, returning the best model per subset
    /// size, ordered by size ascending.
    ///
    /// # Errors
    ///
    /// - [`ElegirError::InvalidSubsetSize`] if `max_size` is 0 or exceeds
    ///   the feature count.
    /// - [`ElegirError::InsufficientData`] if the dataset has too few rows
    ///   for the largest requested model's degrees of freedom.
    /// - [`ElegirError::SingularSystem`] naming the offending subset if any
    ///   candidate's design matrix is collinear. Nothing is silently
    ///   skipped: a singular subset fails the whole run.
    pub fn select(&self, dataset: &Dataset) -> Result<Vec<CandidateModel>> {
        let n_features = dataset.n_features();
        let n_samples = dataset.n_rows();

        if self.max_size < 1 || self.max_size > n_features {
            return Err(ElegirError::InvalidSubsetSize {
                max_size: self.max_size,
                n_features,
            });
        }

        // Residual degrees of freedom must stay positive at the largest size
        if n_samples <= self.max_size + 1 {
            return Err(ElegirError::insufficient_data(
                n_samples,
                self.max_size + 2,
                &format!("best-subset selection with max_size={}", self.max_size),
            ));
        }

        let mut names: Vec<&str> = dataset.feature_names();
        names.sort_unstable();

        let y = dataset.response();

        let mut table = Vec::with_capacity(self.max_size);

        for size in 1..=self.max_size {
            let combos = combinations(names.len(), size);

            let candidates: Vec<CandidateModel> = combos
                .par_iter()
                .map(|combo| {
                    let subset: Vec<&str> = combo.iter().map(|&i| names[i]).collect();
                    fit_candidate(dataset, &subset, y)
                })
                .collect::<Result<_>>()?;

            let best = candidates
                .into_iter()
                .enumerate()
                .min_by(|(ia, a), (ib, b)| {
                    let ka = criterion_key(self.criterion, a);
                    let kb = criterion_key(self.criterion, b);
                    ka.partial_cmp(&kb)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(ia.cmp(ib))
                })
                .map(|(_, model)| model)
                .expect("at least one combination per size");

            table.push(best);
        }

        Ok(table)
    }
}

/// Maps a candidate onto a lower-is-better ranking key.
fn criterion_key(criterion: SelectionCriterion, model: &CandidateModel) -> f32 {
    match criterion {
        SelectionCriterion::Rss => model.rss,
        SelectionCriterion::Aic => model.aic,
        SelectionCriterion::Bic => model.bic,
        SelectionCriterion::AdjustedRSquared => -model.adjusted_r_squared,
    }
}

/// Fits OLS on one predictor subset and derives its scores.
fn fit_candidate(dataset: &Dataset, subset: &[&str], y: &Vector<f32>) -> Result<CandidateModel> {
    let x = dataset.feature_matrix(subset)?;
    let n = dataset.n_rows();
    let k = subset.len();

    let mut model = LinearRegression::new();
    model.fit(&x, y).map_err(|err| match err {
        ElegirError::SingularSystem { .. } => ElegirError::SingularSystem {
            context: format!("predictor subset [{}]", subset.join(", ")),
        },
        other => other,
    })?;

    let y_pred = model.predict(&x);
    let rss = residual_sum_of_squares(&y_pred, y);
    let r2 = r_squared(&y_pred, y);

    Ok(CandidateModel {
        size: k,
        predictors: subset.iter().map(|s| (*s).to_string()).collect(),
        intercept: model.intercept(),
        coefficients: model.coefficients().clone(),
        rss,
        r_squared: r2,
        adjusted_r_squared: adjusted_r_squared(r2, n, k),
        aic: aic(rss, n, k),
        bic: bic(rss, n, k),
    })
}

/// Enumerates all k-combinations of `0..n` in lexicographic order.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    let mut current: Vec<usize> = (0..k).collect();

    loop {
        result.push(current.clone());

        // Advance the rightmost index that still has room
        let mut i = k;
        loop {
            if i == 0 {
                return result;
            }
            i -= 1;
            if current[i] < n - (k - i) {
                break;
            }
        }
        current[i] += 1;
        for j in i + 1..k {
            current[j] = current[j - 1] + 1;
        }
    }
}
