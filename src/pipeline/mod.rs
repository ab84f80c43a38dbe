//! pipeline — prices in, MDaR and CED out.
//!
//! Purpose
//! -------
//! Orchestrate the five stages for one instrument: return transform,
//! GJR-GARCH-t estimation, Monte Carlo simulation, price reconstruction and
//! drawdown aggregation. Each stage lives in its own module; this layer
//! only sequences them, resolves the seed and emits `tracing` events.
//!
//! Key behaviors
//! -------------
//! - [`run`]: validate the config, cut dated prices at `start_date`,
//!   transform, fit, simulate drawdowns anchored at the last price, aggregate
//!   into [`DrawdownRisk`], and return a [`RiskReport`].
//! - [`run_with_source`]: fetch prices from a [`PriceSource`] first.
//! - The fit summary is logged at `info`; so are MDaR and CED.
//!
//! Invariants & assumptions
//! ------------------------
//! - The master seed is resolved once (config or entropy) and recorded in the
//!   report, so any run can be repeated exactly.
//! - Paths are reduced to drawdowns as they are simulated; the `N × H`
//!   matrices are never held in memory by the pipeline.
//! - The library never installs a `tracing` subscriber.
//!
//! [`DrawdownRisk`]: crate::risk::drawdown::DrawdownRisk

pub mod config;
pub mod errors;
pub mod report;
pub mod source;

use crate::{
    risk::drawdown::drawdown_risk,
    volatility::{
        core::{
            data::{PriceSeries, ReturnSeries, DEFAULT_RETURN_SCALE},
            simulation::master_seed,
        },
        models::gjr_garch::fit,
    },
};
use tracing::info;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::config::{RiskConfig, DEFAULT_ALPHA, DEFAULT_TICKER};
pub use self::errors::{PipelineError, PipelineResult};
pub use self::report::{FlatRecord, RiskReport};
pub use self::source::{InMemoryPriceSource, PriceSource};

/// Run the full pipeline on `prices`.
///
/// Parameters
/// ----------
/// - `prices`: daily closes. A dated series is cut at `config.start_date`
///   so the report's window matches the estimation sample; an undated
///   series is taken as the window.
/// - `config`: validated run settings.
///
/// Returns
/// -------
/// - A [`RiskReport`] with the resolved seed, the anchor price (last close
///   of the window), MDaR/CED and the fit summary.
///
/// Errors
/// ------
/// - Configuration errors from [`RiskConfig::validate`].
/// - `GarchError` from the window cut, transform, estimation or simulation
///   (wrapped), e.g. `InsufficientData` when fewer than two prices remain.
/// - `RiskError` from aggregation, e.g. `EmptyTail` (wrapped).
pub fn run(prices: &PriceSeries, config: &RiskConfig) -> PipelineResult<RiskReport> {
    config.validate()?;
    let prices = prices.since(config.start_date)?;
    let returns = ReturnSeries::from_prices(&prices, DEFAULT_RETURN_SCALE)?;
    info!(ticker = %config.ticker, n_prices = prices.len(), n_returns = returns.len(), "estimating");

    let fitted = fit(&returns, config.garch.clone())?;
    info!("fit summary\n{}", fitted.summary);

    let mut sim_opts = config.sim_opts();
    let seed = master_seed(&sim_opts);
    sim_opts.seed = Some(seed);
    let anchor = prices.last_price();
    info!(seed, horizon = sim_opts.horizon, n_paths = sim_opts.n_paths, anchor, "simulating");

    let drawdowns = fitted.simulate_drawdowns(&sim_opts, anchor)?;
    let risk = drawdown_risk(drawdowns.view(), config.alpha)?;
    info!(
        alpha = risk.alpha,
        mdar = risk.mdar,
        ced = risk.ced,
        tail_count = risk.tail_count,
        "drawdown risk"
    );

    Ok(RiskReport {
        ticker: config.ticker.clone(),
        start_date: config.start_date,
        horizon: sim_opts.horizon,
        n_paths: sim_opts.n_paths,
        seed,
        anchor_price: anchor,
        risk,
        fit: fitted.summary,
    })
}

/// Fetch `config.ticker` from `source` starting at `config.start_date`, then
/// [`run`].
///
/// Errors
/// ------
/// - `PipelineError::Source` when the ticker is unavailable.
/// - Everything [`run`] reports.
pub fn run_with_source<S: PriceSource + ?Sized>(
    source: &S, config: &RiskConfig,
) -> PipelineResult<RiskReport> {
    config.validate()?;
    let prices = source.fetch(&config.ticker, config.start_date)?;
    run(&prices, config)
}

pub mod prelude {
    pub use super::{
        run, run_with_source, InMemoryPriceSource, PipelineError, PipelineResult, PriceSource,
        RiskConfig, RiskReport,
    };
}
