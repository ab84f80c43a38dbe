//! inference — standard errors for fitted likelihood models.
//!
//! Purpose
//! -------
//! Provide the post-estimation layer behind the diagnostic summary:
//! observed information from finite-difference Hessians, the IID
//! outer-product-of-gradients score covariance, and classical or sandwich
//! standard errors computed with an eigen-based pseudoinverse (`nalgebra`).
//!
//! Conventions
//! -----------
//! - Inputs and outputs are on the average log-likelihood scale.
//! - Errors are reported as [`InferenceError`].

pub mod errors;
pub mod hessian;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{InferenceError, InferenceResult};
pub use self::hessian::{avg_scores_cov, calc_standard_errors};

pub mod prelude {
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::hessian::{avg_scores_cov, calc_standard_errors};
}
