//! numerical_stability — guarded transforms for parameter reparameterization.
//!
//! Purpose
//! -------
//! Let the optimizer work in ℝᵏ while model coefficients stay admissible:
//! softplus for positivity, logistic for bounded ranges, and a scaled
//! softmax with an implicit slack for the GJR-GARCH stationarity simplex.
//!
//! Conventions
//! -----------
//! - Every forward map has a matching inverse used for starting values.
//! - Constants ([`STATIONARITY_MARGIN`], [`EIGEN_EPS`], [`LOGIT_EPS`]) are
//!   shared by the model and inference layers.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    safe_logistic, safe_logit, safe_softmax, safe_softmax_inv, safe_softplus, safe_softplus_inv,
    EIGEN_EPS, LOGIT_EPS, STATIONARITY_MARGIN,
};

pub mod prelude {
    pub use super::transformations::{
        safe_logistic, safe_logit, safe_softmax, safe_softmax_inv, safe_softplus,
        safe_softplus_inv, EIGEN_EPS, STATIONARITY_MARGIN,
    };
}
