//! Error types for elegir operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for elegir operations.
///
/// Every failure identifies the offending input (the requested subset size,
/// the predictor subset whose design matrix was singular, the component count
/// that exceeded the feature space) so a caller can diagnose a run without
/// re-executing it.
///
/// # Examples
///
/// ```
/// use elegir::error::ElegirError;
///
/// let err = ElegirError::InvalidSubsetSize {
///     max_size: 12,
///     n_features: 8,
/// };
/// assert!(err.to_string().contains("max_size"));
/// ```
#[derive(Debug)]
pub enum ElegirError {
    /// Requested subset size is outside the valid range [1, n_features].
    InvalidSubsetSize {
        /// Requested maximum subset size
        max_size: usize,
        /// Number of available predictors
        n_features: usize,
    },

    /// Requested component count is outside the valid range [1, n_features].
    InvalidComponentCount {
        /// Requested number of components
        requested: usize,
        /// Number of available features
        n_features: usize,
    },

    /// Not enough observations for the requested degrees of freedom or folds.
    InsufficientData {
        /// Number of observations available
        n_samples: usize,
        /// Minimum number of observations required
        required: usize,
        /// What the observations were needed for
        context: String,
    },

    /// Singular or non-positive-definite system during an OLS fit.
    SingularSystem {
        /// The predictor subset or component count that produced the system
        context: String,
    },

    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for ElegirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElegirError::InvalidSubsetSize {
                max_size,
                n_features,
            } => {
                write!(
                    f,
                    "Invalid subset size: max_size = {max_size}, must be between 1 and {n_features}"
                )
            }
            ElegirError::InvalidComponentCount {
                requested,
                n_features,
            } => {
                write!(
                    f,
                    "Invalid component count: requested {requested}, must be between 1 and {n_features}"
                )
            }
            ElegirError::InsufficientData {
                n_samples,
                required,
                context,
            } => {
                write!(
                    f,
                    "Insufficient data: {n_samples} observations, need at least {required} for {context}"
                )
            }
            ElegirError::SingularSystem { context } => {
                write!(f, "Singular system: cannot solve OLS for {context}")
            }
            ElegirError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            ElegirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ElegirError {}

impl From<&str> for ElegirError {
    fn from(msg: &str) -> Self {
        ElegirError::Other(msg.to_string())
    }
}

impl From<String> for ElegirError {
    fn from(msg: String) -> Self {
        ElegirError::Other(msg)
    }
}

impl ElegirError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an insufficient data error
    #[must_use]
    pub fn insufficient_data(n_samples: usize, required: usize, context: &str) -> Self {
        Self::InsufficientData {
            n_samples,
            required,
            context: context.to_string(),
        }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for ElegirError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<ElegirError> for &str {
    fn eq(&self, other: &ElegirError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, ElegirError>;
