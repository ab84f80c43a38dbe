//! volatility — AR(1)-GJR-GARCH(1,1,1)-t estimation and path simulation.
//!
//! Purpose
//! -------
//! Turn a validated price history into a fitted conditional-volatility model
//! and draw Monte Carlo return paths from it. This is the stochastic engine
//! behind the drawdown-risk pipeline.
//!
//! Key behaviors
//! -------------
//! - [`core`]: price/return containers, parameters and θ-mapping, variance
//!   recursion, Student-t innovations, starting values, options, guards and
//!   the seeded rayon path simulator.
//! - [`models`]: [`GjrGarchModel`] (MLE via the L-BFGS optimizer),
//!   [`FittedGarch`] and the diagnostic [`FitSummary`].
//! - [`errors`]: [`GarchError`] / [`ParamError`] and result aliases.
//!
//! Invariants & assumptions
//! ------------------------
//! - Prices are finite and strictly positive; returns carry their scale.
//! - Every fitted parameter set is stationary (α + γ/2 + β < 1 − margin).
//! - Simulation output depends only on the fitted model, the options and the
//!   seed.
//!
//! Downstream usage
//! ----------------
//! 1. Build a [`PriceSeries`] and call `log_returns()`.
//! 2. `models::fit(&returns, GarchOptions::default())`.
//! 3. `fitted.simulate(&opts)` or `fitted.simulate_drawdowns(&opts, p0)`.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    GarchOptions, GarchParams, PriceSeries, ReturnSeries, SeriesMeta, SimOpts, SimStart,
    StdErrKind, TerminalState, VarianceGuards, VarianceInit,
};
pub use self::errors::{GarchError, GarchResult, ParamError, ParamResult};
pub use self::models::{fit, FitSummary, FittedGarch, GjrGarchModel};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use drawdown_risk::volatility::prelude::*;
//
// to import the main volatility surface in a single line.

pub mod prelude {
    pub use super::{
        fit, FitSummary, FittedGarch, GarchError, GarchOptions, GarchParams, GarchResult,
        GjrGarchModel, ParamError, PriceSeries, ReturnSeries, SeriesMeta, SimOpts, SimStart,
        StdErrKind, VarianceGuards, VarianceInit,
    };
}
