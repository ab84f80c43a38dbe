//! Error surface for the optimization layer.
//!
//! `OptError` collects configuration mistakes (tolerances, line search,
//! L-BFGS memory), numerical failures (non-finite costs, gradients,
//! Hessians), argmin backend errors and the model-side failures that can
//! occur while a log-likelihood is being evaluated.
use argmin::core::{ArgminError, Error};

use crate::volatility::errors::{GarchError, ParamError};

/// Result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// The model has no analytic gradient; finite differences are used.
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite.
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- MLEOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad { tol: f64, reason: &'static str },

    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost { tol: f64, reason: &'static str },

    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// At least one stopping rule must be provided.
    NoTolerancesProvided,

    /// Unknown line searcher name.
    InvalidLineSearch { name: String, reason: &'static str },

    /// L-BFGS memory needs to be at least 1.
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost { value: f64 },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    /// The solver finished without a best parameter.
    MissingThetaHat,

    // ---- Argmin ----
    /// Wrapper for `ArgminError::InvalidParameter`.
    InvalidParameter { text: String },
    /// Wrapper for `ArgminError::NotImplemented`.
    NotImplemented { text: String },
    /// Wrapper for `ArgminError::NotInitialized`.
    NotInitialized { text: String },
    /// Wrapper for `ArgminError::ConditionViolated`.
    ConditionViolated { text: String },
    /// Wrapper for `ArgminError::CheckpointNotFound`.
    CheckPointNotFound { text: String },
    /// Wrapper for `ArgminError::PotentialBug`.
    PotentialBug { text: String },
    /// Wrapper for `ArgminError::ImpossibleError`.
    ImpossibleError { text: String },
    /// Any other error raised inside an argmin run.
    BackendError { text: String },

    // ---- Finite differences ----
    /// Hessian matrix dimensions do not match parameter dimensions.
    HessianDimMismatch { expected: usize, found: (usize, usize) },

    /// Hessian values need to be finite.
    InvalidHessian { row: usize, col: usize, value: f64 },

    // ---- Likelihood evaluation ----
    /// The variance recursion produced a non-finite or non-positive value.
    InvalidVariance { t: usize, value: f64 },

    /// The likelihood was asked to evaluate too short a sample.
    InsufficientSample { len: usize, required: usize },

    // ---- Parameter mapping ----
    /// Variance coefficients imply α + γ/2 + β ≥ 1.
    StationarityViolated { persistence: f64 },

    /// θ has the wrong number of coordinates.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// θ contains a non-finite coordinate.
    InvalidThetaInput { index: usize, value: f64 },

    /// A model-space coefficient violates its admissible range.
    InvalidModelParam { name: &'static str, value: f64, reason: &'static str },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => write!(f, "Analytic gradient not implemented"),
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MLEOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => write!(f, "No stopping rule provided"),
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => write!(f, "Non-finite cost value: {value}"),

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimate at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => write!(f, "Solver returned no best parameter"),

            // ---- Argmin ----
            OptError::InvalidParameter { text } => write!(f, "Invalid parameter: {text}"),
            OptError::NotImplemented { text } => write!(f, "Not implemented: {text}"),
            OptError::NotInitialized { text } => write!(f, "Not initialized: {text}"),
            OptError::ConditionViolated { text } => write!(f, "Condition violated: {text}"),
            OptError::CheckPointNotFound { text } => write!(f, "Checkpoint not found: {text}"),
            OptError::PotentialBug { text } => write!(f, "Potential bug: {text}"),
            OptError::ImpossibleError { text } => write!(f, "Impossible error: {text}"),
            OptError::BackendError { text } => write!(f, "Backend error: {text}"),

            // ---- Finite differences ----
            OptError::HessianDimMismatch { expected, found } => write!(
                f,
                "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
            ),
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }

            // ---- Likelihood evaluation ----
            OptError::InvalidVariance { t, value } => {
                write!(f, "Invalid conditional variance at t = {t}: {value}")
            }
            OptError::InsufficientSample { len, required } => {
                write!(f, "Sample of length {len} is too short; at least {required} required")
            }

            // ---- Parameter mapping ----
            OptError::StationarityViolated { persistence } => write!(
                f,
                "Model not stationary: alpha + gamma/2 + beta = {persistence}, which is >= 1"
            ),
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            OptError::InvalidModelParam { name, value, reason } => {
                write!(f, "Invalid {name} = {value}: {reason}")
            }

            // ---- Fallback ----
            OptError::UnknownError => write!(f, "Unknown error"),
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast::<ArgminError>() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => match err.downcast::<OptError>() {
                Ok(inner) => inner,
                Err(other) => OptError::BackendError { text: other.to_string() },
            },
        }
    }
}

impl From<ParamError> for OptError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::StationarityViolated { persistence } => {
                OptError::StationarityViolated { persistence }
            }
            ParamError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidThetaInput { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
            ParamError::InvalidOmega { value } => OptError::InvalidModelParam {
                name: "omega",
                value,
                reason: "must be finite and > 0",
            },
            ParamError::InvalidAlpha { value } => OptError::InvalidModelParam {
                name: "alpha",
                value,
                reason: "must be finite and >= 0",
            },
            ParamError::InvalidLeverage { gamma, .. } => OptError::InvalidModelParam {
                name: "gamma",
                value: gamma,
                reason: "must be finite with alpha + gamma >= 0",
            },
            ParamError::InvalidBeta { value } => OptError::InvalidModelParam {
                name: "beta",
                value,
                reason: "must be finite and >= 0",
            },
            ParamError::InvalidAr { value } => OptError::InvalidModelParam {
                name: "phi",
                value,
                reason: "must satisfy |phi| < 1",
            },
            ParamError::InvalidMu { value } => OptError::InvalidModelParam {
                name: "mu",
                value,
                reason: "must be finite",
            },
            ParamError::InvalidDegreesOfFreedom { value } => OptError::InvalidModelParam {
                name: "nu",
                value,
                reason: "must lie in (2.05, 500]",
            },
        }
    }
}

impl From<GarchError> for OptError {
    fn from(err: GarchError) -> Self {
        match err {
            GarchError::InvalidVariance { t, value } => OptError::InvalidVariance { t, value },
            GarchError::InsufficientData { len, required } => {
                OptError::InsufficientSample { len, required }
            }
            GarchError::InvalidParams(param_err) => param_err.into(),
            _ => OptError::UnknownError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Mapping of argmin errors (including wrapped OptErrors) into OptError.
    // - Mapping of parameter and model errors raised during evaluation.
    //
    // They intentionally DO NOT cover:
    // - Display wording beyond a smoke check.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // An OptError that travelled through argmin as `argmin::core::Error`
    // should come back out unchanged.
    //
    // Given
    // -----
    // - `OptError::NonFiniteCost` converted into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - `OptError::from` recovers the same variant and payload.
    fn from_argmin_error_recovers_wrapped_opt_error() {
        // Arrange
        let original = OptError::NonFiniteCost { value: f64::INFINITY };
        let wrapped: Error = original.clone().into();

        // Act
        let back = OptError::from(wrapped);

        // Assert
        assert_eq!(back, original);
    }

    #[test]
    // Purpose
    // -------
    // Argmin's own error kinds should map onto the matching wrappers.
    //
    // Given
    // -----
    // - `ArgminError::ConditionViolated` with a message.
    //
    // Expect
    // ------
    // - `OptError::ConditionViolated` carrying the same message.
    fn from_argmin_error_maps_condition_violated() {
        // Arrange
        let err: Error = ArgminError::ConditionViolated { text: "descent".to_string() }.into();

        // Act
        let mapped = OptError::from(err);

        // Assert
        assert_eq!(mapped, OptError::ConditionViolated { text: "descent".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // Stationarity failures raised by the parameter layer keep their payload.
    //
    // Given
    // -----
    // - `ParamError::StationarityViolated { persistence: 1.02 }`.
    //
    // Expect
    // ------
    // - `OptError::StationarityViolated { persistence: 1.02 }` with a
    //   message mentioning the persistence.
    fn from_param_error_keeps_stationarity_payload() {
        // Arrange
        let err = ParamError::StationarityViolated { persistence: 1.02 };

        // Act
        let mapped = OptError::from(err);

        // Assert
        assert_eq!(mapped, OptError::StationarityViolated { persistence: 1.02 });
        assert!(mapped.to_string().contains("1.02"));
    }

    #[test]
    // Purpose
    // -------
    // A variance failure inside the likelihood maps to `InvalidVariance`.
    //
    // Given
    // -----
    // - `GarchError::InvalidVariance { t: 3, value: NaN }`.
    //
    // Expect
    // ------
    // - `OptError::InvalidVariance` at t = 3.
    fn from_garch_error_maps_invalid_variance() {
        // Arrange
        let err = GarchError::InvalidVariance { t: 3, value: f64::NAN };

        // Act
        let mapped = OptError::from(err);

        // Assert
        match mapped {
            OptError::InvalidVariance { t, value } => {
                assert_eq!(t, 3);
                assert!(value.is_nan());
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
