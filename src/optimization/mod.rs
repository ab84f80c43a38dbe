//! optimization — likelihood maximization, stable transforms, error surface.
//!
//! Purpose
//! -------
//! Host the numerical machinery the volatility estimator sits on: an
//! argmin-backed L-BFGS maximizer for log-likelihoods, the reparameterization
//! helpers that keep GJR-GARCH coefficients admissible for every optimizer
//! iterate, and one error type (`OptError`) that all of it reports through.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer` maximizes an average log-likelihood `ℓ(θ)` over an
//!   unconstrained `θ ∈ ℝᵏ`, with finite-difference gradients when a model
//!   does not supply one, and finite-difference Hessians for inference.
//! - `numerical_stability` provides overflow-safe softplus / logistic /
//!   softmax maps (and their inverses) used to translate between `θ` and
//!   model-space coefficients.
//! - `errors` normalizes argmin failures, tolerance mistakes and model
//!   parameter errors into `OptError`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Solvers see only unconstrained vectors; admissibility (positivity,
//!   stationarity, ν > 2) is guaranteed by the transforms, not by the solver.
//! - Every failure is an `OptError` value; nothing in this module panics on
//!   bad numerical input.
//!
//! Conventions
//! -----------
//! - Maximization of `ℓ(θ)` is implemented as minimization of `c(θ) = -ℓ(θ)`;
//!   user-facing values (`OptimOutcome::value`) are log-likelihoods.
//! - This layer does not log; callers report progress (see the `obs_slog`
//!   feature for argmin's own observer).
//!
//! Downstream usage
//! ----------------
//! - `volatility::models::gjr_garch` implements `LogLikelihood` and calls
//!   `maximize`.
//! - `inference` consumes `finite_diff::compute_hessian` for standard errors.
//!
//! Testing notes
//! -------------
//! - Submodules carry unit tests for tolerance validation, solver wiring,
//!   finite differences and transform round trips.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
