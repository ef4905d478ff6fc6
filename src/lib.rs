//! Elegir: linear model selection for small tabular datasets.
//!
//! Elegir implements the two classical answers to "which predictors
//! matter?" for multiple regression: exhaustive best-subset selection
//! scored by RSS/AIC/BIC/adjusted-R², and principal-component regression
//! evaluated over every component count with a held-out split and k-fold
//! cross-validation. A small interpretation layer folds PCR models back
//! onto the original features so both answers can be compared directly.
//!
//! # Quick Start
//!
//! ```
//! use elegir::prelude::*;
//!
//! // A tiny table: y = 2*x1 - x2, x3 irrelevant
//! let ds = Dataset::new(vec![
//!     ("x1".to_string(), Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0])),
//!     ("x2".to_string(), Vector::from_slice(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0])),
//!     ("x3".to_string(), Vector::from_slice(&[2.0, 7.0, 1.0, 8.0, 2.0, 8.0, 1.0, 8.0])),
//!     ("y".to_string(), Vector::from_slice(&[-1.0, 3.0, 2.0, 7.0, 5.0, 3.0, 12.0, 10.0])),
//! ], "y").unwrap();
//!
//! // Best subset of each size 1..=3
//! let table = BestSubsetSelector::new(3).select(&ds).unwrap();
//! assert_eq!(table.len(), 3);
//! assert_eq!(table[1].predictors, vec!["x1", "x2"]);
//! assert!(table[1].rss < 1e-3);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`data`]: Immutable named-column Dataset with a designated response
//! - [`linear_model`]: Ordinary least squares regression
//! - [`metrics`]: R², MSE, adjusted R², AIC, BIC
//! - [`model_selection`]: Train/test splitting and k-fold cross-validation
//! - [`preprocessing`]: Standardization with train-only statistics
//! - [`decomposition`]: Principal component analysis
//! - [`subset_selection`]: Exhaustive best-subset regression search
//! - [`pcr`]: Principal-component regression pipeline
//! - [`interpret`]: Fold PCR models back onto original features
//!
//! # Scope
//!
//! Everything runs synchronously in memory over `f32` columns. The subset
//! search is exhaustive and exponential in the predictor count; it is
//! meant for the handful-of-features regime (a 97-row, 8-predictor
//! clinical table is the design center), not for wide data.

pub mod data;
pub mod decomposition;
pub mod error;
pub mod interpret;
pub mod linear_model;
pub mod metrics;
pub mod model_selection;
pub mod pcr;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod subset_selection;
pub mod traits;
