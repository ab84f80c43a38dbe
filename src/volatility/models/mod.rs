//! models — estimation of the AR(1)-GJR-GARCH(1,1,1)-t model.
//!
//! Purpose
//! -------
//! Sit on top of `volatility::core` and wire the likelihood to the generic
//! L-BFGS optimizer, then package the result as an immutable
//! [`FittedGarch`] with a diagnostic [`FitSummary`].
//!
//! Key behaviors
//! -------------
//! - [`GjrGarchModel`] implements [`LogLikelihood`] (average log-likelihood
//!   in θ-space) and provides `fit`.
//! - [`FittedGarch`] exposes the fitted parameters, terminal state, the
//!   one-step variance update, the innovation sampler and simulation.
//! - [`model_internals`] holds the model-space objective, per-observation
//!   scores and terminal-state extraction used for inference.
//!
//! Invariants & assumptions
//! ------------------------
//! - A `FittedGarch` only exists for a converged run with stationary
//!   parameters.
//! - Scratch buffers are single-owner; one model must not be shared across
//!   threads while fitting.
//!
//! Testing notes
//! -------------
//! - [`gjr_garch`] tests fit simulated samples end to end; [`summary`] tests
//!   both standard-error flavors; [`model_internals`] checks scores against
//!   the averaged objective.
//!
//! [`LogLikelihood`]: crate::optimization::loglik_optimizer::LogLikelihood

pub mod gjr_garch;
pub mod model_internals;
pub mod summary;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::gjr_garch::{fit, FittedGarch, GjrGarchModel, MIN_RETURNS};
pub use self::model_internals::{calculate_scores, n_eff};
pub use self::summary::{CoefRow, FitSummary};

pub mod prelude {
    pub use super::gjr_garch::{fit, FittedGarch, GjrGarchModel};
    pub use super::summary::FitSummary;
}
