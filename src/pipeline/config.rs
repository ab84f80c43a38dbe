//! Run configuration for the drawdown-risk pipeline.
//!
//! Purpose
//! -------
//! Describe one risk run: which instrument and history window to use, how
//! many paths to simulate over which horizon, the tail probability, and the
//! estimation options.
//!
//! Key behaviors
//! -------------
//! - [`RiskConfig::default`]: AAPL from 2010-01-01, 252 steps, 10 000 paths,
//!   α = 0.95, entropy seed, cold start with 500 burn-in steps.
//! - [`RiskConfig::from_json_str`]: serde JSON loading where missing keys
//!   keep their defaults; the result is validated.
//! - [`RiskConfig::validate`]: horizon and path count must be positive, α in
//!   (0, 1).
//!
//! Conventions
//! -----------
//! - `garch` (estimation options) is not part of the JSON surface; it is
//!   always the default unless set programmatically.
use crate::{
    pipeline::errors::{PipelineError, PipelineResult},
    risk::drawdown::TailProbability,
    volatility::{
        core::{
            options::{GarchOptions, SimOpts, SimStart, DEFAULT_HORIZON, DEFAULT_N_PATHS},
            validation::validate_sim_opts,
        },
    },
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default instrument.
pub const DEFAULT_TICKER: &str = "AAPL";

/// Default tail probability for MDaR / CED.
pub const DEFAULT_ALPHA: f64 = 0.95;

/// Configuration of one pipeline run.
///
/// Fields
/// ------
/// - `ticker`: instrument passed to the price source.
/// - `start_date`: first date of the estimation window; dated price series
///   are cut here by the source and again by `run`.
/// - `horizon`: simulated steps per path.
/// - `n_paths`: number of simulated paths.
/// - `alpha`: tail probability.
/// - `seed`: master seed; `None` draws one from entropy.
/// - `sim_start`: cold or warm path initialization.
/// - `garch`: estimation options (not serialized).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub horizon: usize,
    pub n_paths: usize,
    pub alpha: f64,
    pub seed: Option<u64>,
    pub sim_start: SimStart,
    #[serde(skip)]
    pub garch: GarchOptions,
}

impl Default for RiskConfig {
    fn default() -> Self {
        RiskConfig {
            ticker: DEFAULT_TICKER.to_string(),
            start_date: default_start_date(),
            horizon: DEFAULT_HORIZON,
            n_paths: DEFAULT_N_PATHS,
            alpha: DEFAULT_ALPHA,
            seed: None,
            sim_start: SimStart::default(),
            garch: GarchOptions::default(),
        }
    }
}

impl RiskConfig {
    /// Check simulation settings and the tail probability.
    ///
    /// # Errors
    /// - `GarchError::InvalidSimParameter` (wrapped) for zero horizon/paths.
    /// - `RiskError::InvalidAlpha` (wrapped) for α outside (0, 1).
    pub fn validate(&self) -> PipelineResult<()> {
        validate_sim_opts(&self.sim_opts())?;
        TailProbability::new(self.alpha)?;
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    /// - `PipelineError::Config` for malformed JSON or mistyped fields.
    /// - Validation errors as in [`validate`](Self::validate).
    pub fn from_json_str(text: &str) -> PipelineResult<Self> {
        let config: RiskConfig = serde_json::from_str(text)
            .map_err(|e| PipelineError::Config { reason: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Simulation options implied by this configuration.
    pub fn sim_opts(&self) -> SimOpts {
        SimOpts::new(self.horizon, self.n_paths, self.seed, self.sim_start)
    }
}

/// 2010-01-01; the fallback is unreachable for this literal date.
fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or(NaiveDate::MIN)
}
