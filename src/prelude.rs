//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use elegir::prelude::*;
//! ```

pub use crate::data::Dataset;
pub use crate::interpret::{reconstruct, ReconstructedCoefficients};
pub use crate::linear_model::LinearRegression;
pub use crate::metrics::{mse, r_squared, rmse};
pub use crate::pcr::{PcrPipeline, PcrResult};
pub use crate::primitives::{Matrix, Vector};
pub use crate::subset_selection::{BestSubsetSelector, CandidateModel, SelectionCriterion};
pub use crate::traits::{Estimator, Transformer};
