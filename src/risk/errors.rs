//! Errors for price reconstruction and drawdown aggregation.
//!
//! [`RiskError`] covers invalid tail probabilities, empty or non-finite
//! drawdown sets, an invalid anchor price, and the empty-tail case where no
//! drawdown strictly exceeds MDaR (so CED is undefined).

/// Result alias for risk computations.
pub type RiskResult<T> = Result<T, RiskError>;

#[derive(Debug, Clone, PartialEq)]
pub enum RiskError {
    // ---- Tail probability ----
    /// α must lie strictly between 0 and 1.
    InvalidAlpha { value: f64 },

    // ---- Drawdown set ----
    /// No drawdowns were supplied.
    EmptyDrawdowns,

    /// A drawdown is NaN/±inf or negative.
    NonFiniteDrawdown { index: usize, value: f64 },

    /// No drawdown strictly exceeds MDaR; CED is undefined.
    EmptyTail { mdar: f64, n: usize },

    // ---- Price reconstruction ----
    /// The anchor price must be finite and > 0.
    InvalidAnchorPrice { value: f64 },
}

impl std::error::Error for RiskError {}

impl std::fmt::Display for RiskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskError::InvalidAlpha { value } => {
                write!(f, "Invalid tail probability {value}: must lie in (0, 1)")
            }
            RiskError::EmptyDrawdowns => write!(f, "Drawdown set is empty"),
            RiskError::NonFiniteDrawdown { index, value } => {
                write!(f, "Invalid drawdown at index {index}: {value}")
            }
            RiskError::EmptyTail { mdar, n } => write!(
                f,
                "No drawdown out of {n} exceeds MDaR = {mdar}; conditional expected drawdown is undefined"
            ),
            RiskError::InvalidAnchorPrice { value } => {
                write!(f, "Invalid anchor price {value}: must be finite and > 0")
            }
        }
    }
}
