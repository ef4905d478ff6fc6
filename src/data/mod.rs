//! `Dataset` module for named-column tabular data.
//!
//! Provides the immutable table both analysis pipelines consume. Parsing
//! and cleaning happen upstream; a `Dataset` is assumed complete (no
//! missing values) once constructed.

use crate::error::{ElegirError, Result};
use crate::primitives::{Matrix, Vector};

/// An immutable table of named numeric columns with a designated response.
///
/// Created once at load time and read-only thereafter: there are no column
/// mutators, so every selector or pipeline run sees the same data.
///
/// # Examples
///
/// ```
/// use elegir::data::Dataset;
/// use elegir::primitives::Vector;
///
/// let columns = vec![
///     ("age".to_string(), Vector::from_slice(&[50.0, 60.0, 70.0])),
///     ("weight".to_string(), Vector::from_slice(&[80.0, 72.0, 90.0])),
///     ("lpsa".to_string(), Vector::from_slice(&[1.2, 2.1, 3.3])),
/// ];
/// let ds = Dataset::new(columns, "lpsa").expect("valid dataset");
/// assert_eq!(ds.n_rows(), 3);
/// assert_eq!(ds.n_features(), 2);
/// assert_eq!(ds.feature_names(), vec!["age", "weight"]);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<(String, Vector<f32>)>,
    response: String,
    n_rows: usize,
}

impl Dataset {
    /// Creates a new `Dataset` from named columns, designating one as the
    /// response.
    ///
    /// # Errors
    ///
    /// Returns an error if columns are empty, have unequal lengths, carry
    /// empty or duplicate names, or the response column is missing. A
    /// dataset needs at least one feature besides the response.
    pub fn new(columns: Vec<(String, Vector<f32>)>, response: &str) -> Result<Self> {
        if columns.len() < 2 {
            return Err("Dataset needs a response column and at least one feature".into());
        }

        let n_rows = columns[0].1.len();
        if n_rows == 0 {
            return Err("Dataset columns cannot be empty".into());
        }

        for (name, col) in &columns {
            if col.len() != n_rows {
                return Err(ElegirError::dimension_mismatch(
                    "column length",
                    n_rows,
                    col.len(),
                ));
            }
            if name.is_empty() {
                return Err("Column names cannot be empty".into());
            }
        }

        let mut names: Vec<&str> = columns.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        for i in 1..names.len() {
            if names[i] == names[i - 1] {
                return Err("Duplicate column names not allowed".into());
            }
        }

        if !columns.iter().any(|(n, _)| n == response) {
            return Err(format!("Response column '{response}' not found").into());
        }

        Ok(Self {
            columns,
            response: response.to_string(),
            n_rows,
        })
    }

    /// Returns the number of rows (observations).
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Returns the number of feature columns (excludes the response).
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.columns.len() - 1
    }

    /// Returns the feature names in insertion order (excludes the response).
    #[must_use]
    pub fn feature_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|(n, _)| n.as_str())
            .filter(|n| *n != self.response)
            .collect()
    }

    /// Returns the name of the designated response column.
    #[must_use]
    pub fn response_name(&self) -> &str {
        &self.response
    }

    /// Returns the response column.
    #[must_use]
    pub fn response(&self) -> &Vector<f32> {
        self.columns
            .iter()
            .find(|(n, _)| n == &self.response)
            .map(|(_, v)| v)
            .expect("response column validated at construction")
    }

    /// Returns a feature column by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist or is the response.
    pub fn feature(&self, name: &str) -> Result<&Vector<f32>> {
        if name == self.response {
            return Err(format!("'{name}' is the response, not a feature").into());
        }
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| format!("Feature column '{name}' not found").into())
    }

    /// Builds a row-major design matrix from the named features, in the
    /// given order.
    ///
    /// # Errors
    ///
    /// Returns an error if any name is missing, duplicated, or names the
    /// response.
    pub fn feature_matrix(&self, names: &[&str]) -> Result<Matrix<f32>> {
        if names.is_empty() {
            return Err("Must select at least one feature".into());
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(format!("Feature '{name}' selected twice").into());
            }
        }

        let selected: Vec<&Vector<f32>> = names
            .iter()
            .map(|name| self.feature(name))
            .collect::<Result<_>>()?;

        let mut data = Vec::with_capacity(self.n_rows * selected.len());
        for row in 0..self.n_rows {
            for col in &selected {
                data.push(col[row]);
            }
        }

        Matrix::from_vec(self.n_rows, selected.len(), data).map_err(Into::into)
    }

    /// Returns descriptive statistics for all columns, response included.
    #[must_use]
    pub fn describe(&self) -> Vec<ColumnStats> {
        self.columns
            .iter()
            .map(|(name, col)| {
                let mean = col.mean();
                let std = col.variance().sqrt();

                let mut sorted: Vec<f32> = col.as_slice().to_vec();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

                let min = sorted.first().copied().unwrap_or(0.0);
                let max = sorted.last().copied().unwrap_or(0.0);
                let median = if sorted.len() % 2 == 0 {
                    (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
                } else {
                    sorted[sorted.len() / 2]
                };

                ColumnStats {
                    name: name.clone(),
                    count: col.len(),
                    mean,
                    std,
                    min,
                    median,
                    max,
                }
            })
            .collect()
    }
}

/// Descriptive statistics for a column.
#[derive(Debug, Clone)]
pub struct ColumnStats {
    /// Column name.
    pub name: String,
    /// Number of elements.
    pub count: usize,
    /// Mean value.
    pub mean: f32,
    /// Standard deviation.
    pub std: f32,
    /// Minimum value.
    pub min: f32,
    /// Median value.
    pub median: f32,
    /// Maximum value.
    pub max: f32,
}
