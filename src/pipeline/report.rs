//! Risk report: what a pipeline run hands back.
//!
//! [`RiskReport`] bundles the run settings, the anchor price, the drawdown
//! statistics and the fit summary. `Display` prints MDaR and CED to two
//! decimals followed by the coefficient table; [`FlatRecord`] is the
//! key-value view `{ticker, start_date, horizon, n_paths, alpha, mdar, ced}`
//! for downstream storage, serialized with `serde_json`.
use crate::{
    pipeline::errors::{PipelineError, PipelineResult},
    risk::drawdown::DrawdownRisk,
    volatility::models::summary::FitSummary,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    /// Instrument the run was made for.
    pub ticker: String,
    /// First date of the estimation window.
    pub start_date: NaiveDate,
    /// Simulated steps per path.
    pub horizon: usize,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Master seed actually used for the simulation.
    pub seed: u64,
    /// Last observed price, the anchor of every simulated path.
    pub anchor_price: f64,
    /// MDaR, CED and drawdown moments.
    pub risk: DrawdownRisk,
    /// Coefficient table of the volatility fit.
    pub fit: FitSummary,
}

/// Flat key-value view of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub horizon: usize,
    pub n_paths: usize,
    pub alpha: f64,
    pub mdar: f64,
    pub ced: f64,
}

impl RiskReport {
    /// Project the report onto the seven storage keys.
    pub fn to_flat_record(&self) -> FlatRecord {
        FlatRecord {
            ticker: self.ticker.clone(),
            start_date: self.start_date,
            horizon: self.horizon,
            n_paths: self.n_paths,
            alpha: self.risk.alpha,
            mdar: self.risk.mdar,
            ced: self.risk.ced,
        }
    }

    /// JSON rendering of [`to_flat_record`](Self::to_flat_record).
    ///
    /// # Errors
    /// `PipelineError::Serialization` if `serde_json` rejects a value
    /// (non-finite floats are written as `null`, so this is rare).
    pub fn to_json(&self) -> PipelineResult<String> {
        serde_json::to_string(&self.to_flat_record())
            .map_err(|e| PipelineError::Serialization { reason: e.to_string() })
    }
}

impl fmt::Display for RiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} from {}: {} paths x {} days, anchor {:.2}",
            self.ticker, self.start_date, self.n_paths, self.horizon, self.anchor_price
        )?;
        let level = self.risk.alpha * 100.0;
        writeln!(f, "MDaR ({level:.0}%): {:.2}", self.risk.mdar)?;
        writeln!(f, "CED ({level:.0}%): {:.2}", self.risk.ced)?;
        write!(f, "{}", self.fit)
    }
}
