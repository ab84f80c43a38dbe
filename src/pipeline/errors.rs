//! Errors for the end-to-end drawdown-risk pipeline.
//!
//! [`PipelineError`] wraps the stage errors ([`GarchError`] for data,
//! estimation and simulation; [`RiskError`] for reconstruction and
//! aggregation) and adds the failures that only exist at the pipeline
//! boundary: configuration, price sources and serialization.
use crate::{risk::errors::RiskError, volatility::errors::GarchError};

/// Result alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    // ---- Stage errors ----
    /// Data validation, estimation or simulation failed.
    Garch(GarchError),

    /// Price reconstruction or drawdown aggregation failed.
    Risk(RiskError),

    // ---- Boundary errors ----
    /// A configuration value is invalid or could not be parsed.
    Config { reason: String },

    /// The price source could not provide prices for `ticker`.
    Source { ticker: String, reason: String },

    /// A report could not be serialized.
    Serialization { reason: String },
}

impl std::error::Error for PipelineError {}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Garch(err) => write!(f, "{err}"),
            PipelineError::Risk(err) => write!(f, "{err}"),
            PipelineError::Config { reason } => write!(f, "Invalid configuration: {reason}"),
            PipelineError::Source { ticker, reason } => {
                write!(f, "Price source failed for {ticker}: {reason}")
            }
            PipelineError::Serialization { reason } => write!(f, "Serialization failed: {reason}"),
        }
    }
}

impl From<GarchError> for PipelineError {
    fn from(err: GarchError) -> Self {
        PipelineError::Garch(err)
    }
}

impl From<RiskError> for PipelineError {
    fn from(err: RiskError) -> Self {
        PipelineError::Risk(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `From` conversions of stage errors.
    // - `Display` passthrough and boundary messages.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Stage errors convert and keep their message.
    //
    // Given
    // -----
    // - `GarchError::InsufficientData` and `RiskError::InvalidAlpha`.
    //
    // Expect
    // ------
    // - Wrapped variants with identical `Display` text.
    fn stage_errors_convert_and_display() {
        let g = GarchError::InsufficientData { len: 1, required: 2 };
        let r = RiskError::InvalidAlpha { value: 1.5 };

        let pg: PipelineError = g.clone().into();
        let pr: PipelineError = r.clone().into();

        assert_eq!(pg, PipelineError::Garch(g.clone()));
        assert_eq!(pr, PipelineError::Risk(r.clone()));
        assert_eq!(pg.to_string(), g.to_string());
        assert_eq!(pr.to_string(), r.to_string());
    }

    #[test]
    // Purpose
    // -------
    // Boundary errors name their context.
    //
    // Given
    // -----
    // - A source failure for "MSFT".
    //
    // Expect
    // ------
    // - The message mentions the ticker and the reason.
    fn source_error_mentions_ticker() {
        let e = PipelineError::Source { ticker: "MSFT".into(), reason: "unknown ticker".into() };

        let text = e.to_string();

        assert!(text.contains("MSFT") && text.contains("unknown ticker"));
    }
}
