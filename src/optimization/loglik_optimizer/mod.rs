//! loglik_optimizer — argmin-powered maximum-likelihood driver.
//!
//! Purpose
//! -------
//! Maximize a model's log-likelihood `ℓ(θ)` with L-BFGS. A model implements
//! [`LogLikelihood`] once and calls [`maximize`]; solver construction,
//! finite-difference gradients, and outcome normalization live here.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] exposes `c(θ) = -ℓ(θ)` to argmin.
//! - [`maximize`] validates the start, builds the solver from
//!   [`traits::LineSearcher`], runs it via [`run::run_lbfgs`], and returns an
//!   [`OptimOutcome`].
//! - [`finite_diff`] supplies gradients when the model has none, and the
//!   Hessians used for standard errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Models report invalid states as [`OptError`](crate::optimization::errors::OptError)
//!   values; the adapter turns them into argmin errors and back.
//! - [`OptimOutcome::converged`] is true only for tolerance-based
//!   termination; hitting `max_iter` is reported as not converged.
//!
//! Conventions
//! -----------
//! - [`Theta`] is unconstrained; constraints are the model's business.
//! - User-facing values are log-likelihoods, never costs.
//!
//! Downstream usage
//! ----------------
//! - `volatility::models::gjr_garch::GjrGarchModel` implements
//!   [`LogLikelihood`] on the average log-likelihood and calls [`maximize`].
//!
//! Testing notes
//! -------------
//! - `api` tests fit a Gaussian on a fixed sample with both line searches;
//!   the remaining submodules test their own checks.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, FnEvalMap, Grad, Hessian, Theta, DEFAULT_LBFGS_MEM};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
