//! Error type for post-estimation inference.
//!
//! `InferenceError` covers malformed score matrices and wraps optimizer
//! failures raised while differentiating the likelihood (non-finite
//! Hessians, objective errors at perturbed points).
use crate::optimization::errors::OptError;

#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Scores ----
    /// No observations were supplied for the score covariance.
    EmptyScores,

    /// Score columns do not match the number of parameters.
    ScoreDimMismatch { expected: usize, found: usize },

    /// A per-observation score is NaN/±inf.
    NonFiniteScore { row: usize, col: usize, value: f64 },

    // ---- Sample size ----
    /// The effective sample size must be positive to rescale variances.
    InvalidSampleSize { n: usize },

    // ---- Differentiation ----
    /// Failure while building the observed information matrix.
    Hessian(OptError),
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Scores ----
            InferenceError::EmptyScores => write!(f, "Inference Error: score matrix is empty"),
            InferenceError::ScoreDimMismatch { expected, found } => write!(
                f,
                "Inference Error: score matrix has {found} columns, expected {expected}"
            ),
            InferenceError::NonFiniteScore { row, col, value } => {
                write!(f, "Inference Error: non-finite score at ({row}, {col}): {value}")
            }

            // ---- Sample size ----
            InferenceError::InvalidSampleSize { n } => {
                write!(f, "Inference Error: invalid effective sample size {n}")
            }

            // ---- Differentiation ----
            InferenceError::Hessian(err) => write!(f, "Inference Error: {err}"),
        }
    }
}

impl From<OptError> for InferenceError {
    fn from(err: OptError) -> Self {
        InferenceError::Hessian(err)
    }
}
