//! core — data, parameters, recursions and simulation for AR(1)-GJR-GARCH-t.
//!
//! Purpose
//! -------
//! Collect the numerical building blocks of the volatility model: price and
//! return containers, the parameter type and its θ-mapping, the residual and
//! variance recursions, the standardized Student-t innovation, starting
//! values and pre-sample variance policies, and the Monte Carlo path
//! simulator. The model layer in `volatility::models` wires these together
//! with the optimizer.
//!
//! Key behaviors
//! -------------
//! - [`PriceSeries`] / [`ReturnSeries`]: validated inputs and the
//!   `100·ln(P_t/P_{t−1})` transform.
//! - [`GarchParams`]: model-space parameters, the stationarity-preserving
//!   θ ↔ parameter mapping, and the one-step variance update.
//! - [`likelihood_driver`] / [`loglik_terms`]: allocation-free likelihood
//!   evaluation over [`GarchScratch`].
//! - [`VarianceInit`] and [`starting_values`]: σ²₀ policy and optimizer
//!   starting point.
//! - [`simulate_paths`] / [`simulate_drawdowns`]: seeded, rayon-parallel
//!   path generation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Successfully constructed [`GarchParams`] satisfy ω > 0, α ≥ 0,
//!   α + γ ≥ 0, β ≥ 0, |φ| < 1, ν ∈ (2.05, 500] and
//!   α + γ/2 + β < 1 − margin.
//! - Every σ²_t passes through [`VarianceGuards`].
//!
//! Conventions
//! -----------
//! - Returns inside the model are scaled (×100); simulation output is
//!   divided back by the scale.
//! - Parameter vectors use the order `[μ, φ, ω, α, γ, β, ν]`
//!   ([`PARAM_NAMES`]).
//! - Only `data` (dropped transitions) and `init`/`simulation` (debug
//!   events) emit `tracing` events.

pub mod data;
pub mod guards;
pub mod init;
pub mod innovations;
pub mod options;
pub mod params;
pub mod simulation;
pub mod validation;
pub mod variance;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::{PriceSeries, ReturnSeries, SeriesMeta, DEFAULT_RETURN_SCALE};
pub use self::guards::VarianceGuards;
pub use self::init::{backcast, starting_values, StartingValues, VarianceInit};
pub use self::innovations::{StdStudentT, TSampler};
pub use self::options::{GarchOptions, SimOpts, SimStart, StdErrKind};
pub use self::params::{GarchParams, PARAM_NAMES};
pub use self::simulation::{simulate_drawdowns, simulate_paths, PathSimulator, TerminalState};
pub use self::validation::{
    validate_alpha, validate_ar, validate_beta, validate_leverage, validate_mu, validate_nu,
    validate_omega, validate_sim_opts, validate_stationarity, validate_theta, N_PARAMS,
};
pub use self::variance::{
    compute_residuals, compute_variance, likelihood_driver, loglik_terms, GarchScratch,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use drawdown_risk::volatility::core::prelude::*;
//
// to import the main core surface in a single line.

pub mod prelude {
    pub use super::data::{PriceSeries, ReturnSeries, SeriesMeta};
    pub use super::guards::VarianceGuards;
    pub use super::init::VarianceInit;
    pub use super::innovations::StdStudentT;
    pub use super::options::{GarchOptions, SimOpts, SimStart, StdErrKind};
    pub use super::params::GarchParams;
    pub use super::simulation::TerminalState;
    pub use super::variance::GarchScratch;
}
