//! Errors for the GJR-GARCH volatility stack (data validation, option
//! checks, recursion invariants, estimation and simulation failures).
//!
//! This module defines a model error type, [`GarchError`], and a parameter
//! error type, [`ParamError`], used by the data layer, the estimator and the
//! path simulator. Both implement `Display`/`Error`.
//!
//! ## Conventions
//! - **Indices are 0-based.** Price indices refer to the input series,
//!   variance indices `t` to the residual series (one shorter than the
//!   returns because of the AR(1) lag).
//! - Optimizer/backend errors are normalized to
//!   [`GarchError::ConvergenceFailed`] with a human-readable status; option
//!   mistakes surface as [`GarchError::InvalidOptimizerConfig`].
use crate::{inference::errors::InferenceError, optimization::errors::OptError};

/// Result alias for volatility-model operations that may produce [`GarchError`].
pub type GarchResult<T> = Result<T, GarchError>;

/// Result alias for parameter construction/validation paths.
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for the volatility model.
#[derive(Debug, Clone, PartialEq)]
pub enum GarchError {
    // ---- Input/data validation ----
    /// Too few observations for the requested operation.
    InsufficientData { len: usize, required: usize },

    /// A price is non-positive or non-finite.
    InvalidPrice { index: usize, value: f64 },

    /// A return is NaN/±inf.
    NonFiniteReturn { index: usize, value: f64 },

    /// Dates were supplied but their count differs from the price count.
    DateLengthMismatch { prices: usize, dates: usize },

    /// Dates must be strictly increasing.
    NonIncreasingDates { index: usize },

    /// Return scale must be finite and > 0.
    InvalidScale { value: f64 },

    // ---- Options validation ----
    /// Variance guards must be finite with 0 < min < max.
    InvalidVarianceGuards { min: f64, max: f64, reason: &'static str },

    /// VarianceInit::Fixed(v) must be finite and > 0.
    InvalidVarianceInit { value: f64 },

    /// Optimizer options were rejected before the run started.
    InvalidOptimizerConfig { text: String },

    // ---- Model/recursion invariants ----
    /// Variance recursion produced a non-finite σ²_t.
    InvalidVariance { t: usize, value: f64 },

    /// Parameter mapping or validation failed.
    InvalidParams(ParamError),

    // ---- Estimation ----
    /// The optimizer did not reach a converged, stationary solution.
    ConvergenceFailed { status: String },

    /// Standard errors could not be computed.
    Inference(InferenceError),

    // ---- Simulation ----
    /// Simulation settings are out of range (e.g. zero horizon or paths).
    InvalidSimParameter { name: &'static str, value: f64, reason: &'static str },
}

impl std::error::Error for GarchError {}

impl std::fmt::Display for GarchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            GarchError::InsufficientData { len, required } => {
                write!(f, "Insufficient data: got {len} observations, need at least {required}")
            }
            GarchError::InvalidPrice { index, value } => {
                write!(f, "Invalid price at index {index}: {value} (must be finite and > 0)")
            }
            GarchError::NonFiniteReturn { index, value } => {
                write!(f, "Non-finite return at index {index}: {value}")
            }
            GarchError::DateLengthMismatch { prices, dates } => {
                write!(f, "Date count {dates} does not match price count {prices}")
            }
            GarchError::NonIncreasingDates { index } => {
                write!(f, "Dates must be strictly increasing (violation at index {index})")
            }
            GarchError::InvalidScale { value } => {
                write!(f, "Invalid return scale {value}: must be finite and > 0")
            }

            // ---- Options validation ----
            GarchError::InvalidVarianceGuards { min, max, reason } => {
                write!(f, "Invalid variance guards (min={min}, max={max}): {reason}")
            }
            GarchError::InvalidVarianceInit { value } => {
                write!(f, "Invalid fixed pre-sample variance {value}: must be finite and > 0")
            }
            GarchError::InvalidOptimizerConfig { text } => {
                write!(f, "Invalid optimizer configuration: {text}")
            }

            // ---- Model/recursion invariants ----
            GarchError::InvalidVariance { t, value } => {
                write!(f, "Conditional variance at t={t} is invalid: {value}")
            }
            GarchError::InvalidParams(err) => write!(f, "Invalid parameters: {err}"),

            // ---- Estimation ----
            GarchError::ConvergenceFailed { status } => {
                write!(f, "Estimation failed to converge: {status}")
            }
            GarchError::Inference(err) => write!(f, "{err}"),

            // ---- Simulation ----
            GarchError::InvalidSimParameter { name, value, reason } => {
                write!(f, "Invalid simulation parameter {name}={value}: {reason}")
            }
        }
    }
}

/// Parameter-level errors raised while mapping θ or validating coefficients.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    // ---- θ vector ----
    /// θ has the wrong number of coordinates.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// θ contains a non-finite coordinate.
    InvalidThetaInput { index: usize, value: f64 },

    // ---- Coefficients ----
    /// μ must be finite.
    InvalidMu { value: f64 },

    /// φ must satisfy |φ| < 1.
    InvalidAr { value: f64 },

    /// ω must be finite and > 0.
    InvalidOmega { value: f64 },

    /// α must be finite and ≥ 0.
    InvalidAlpha { value: f64 },

    /// γ must be finite with α + γ ≥ 0.
    InvalidLeverage { alpha: f64, gamma: f64 },

    /// β must be finite and ≥ 0.
    InvalidBeta { value: f64 },

    /// ν must lie in the admissible Student-t range.
    InvalidDegreesOfFreedom { value: f64 },

    // ---- Stationarity ----
    /// α + γ/2 + β must stay below 1 − margin.
    StationarityViolated { persistence: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Theta entry {index} is not finite: {value}")
            }
            ParamError::InvalidMu { value } => write!(f, "mu must be finite, got {value}"),
            ParamError::InvalidAr { value } => write!(f, "phi must satisfy |phi| < 1, got {value}"),
            ParamError::InvalidOmega { value } => {
                write!(f, "omega must be finite and > 0, got {value}")
            }
            ParamError::InvalidAlpha { value } => {
                write!(f, "alpha must be finite and >= 0, got {value}")
            }
            ParamError::InvalidLeverage { alpha, gamma } => {
                write!(f, "gamma must be finite with alpha + gamma >= 0 (alpha={alpha}, gamma={gamma})")
            }
            ParamError::InvalidBeta { value } => {
                write!(f, "beta must be finite and >= 0, got {value}")
            }
            ParamError::InvalidDegreesOfFreedom { value } => {
                write!(f, "nu must lie in (2.05, 500], got {value}")
            }
            ParamError::StationarityViolated { persistence } => {
                write!(f, "Non-stationary variance: alpha + gamma/2 + beta = {persistence}")
            }
        }
    }
}

impl From<ParamError> for GarchError {
    fn from(err: ParamError) -> Self {
        GarchError::InvalidParams(err)
    }
}

impl From<InferenceError> for GarchError {
    fn from(err: InferenceError) -> Self {
        GarchError::Inference(err)
    }
}

impl From<OptError> for GarchError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::InvalidTolGrad { .. }
            | OptError::InvalidTolCost { .. }
            | OptError::InvalidMaxIter { .. }
            | OptError::NoTolerancesProvided
            | OptError::InvalidLineSearch { .. }
            | OptError::InvalidLBFGSMem { .. } => {
                GarchError::InvalidOptimizerConfig { text: err.to_string() }
            }
            OptError::InsufficientSample { len, required } => {
                GarchError::InsufficientData { len, required }
            }
            other => GarchError::ConvergenceFailed { status: other.to_string() },
        }
    }
}
