//! Estimation and simulation options for the GJR-GARCH-t model.
//!
//! Purpose
//! -------
//! Bundle the knobs that control estimation ([`GarchOptions`]) and path
//! simulation ([`SimOpts`], [`SimStart`]) into small value types with
//! sensible defaults.
//!
//! Key behaviors
//! -------------
//! - [`GarchOptions`] packages the pre-sample variance policy, optimizer
//!   options, variance guards, and the standard-error flavor.
//! - [`SimOpts`] carries horizon, path count, optional seed, and the start
//!   mode; defaults are one trading year (252 steps) and 10 000 paths.
//! - [`SimStart`] distinguishes a cold start from the unconditional
//!   moments (with burn-in) from a warm start at the last in-sample state.
//!
//! Invariants & assumptions
//! ------------------------
//! - Components are validated by their own constructors
//!   (`VarianceGuards::new`, `VarianceInit::fixed`, `MLEOptions::new`);
//!   `GarchOptions::new` adds no cross-field checks.
//! - `SimOpts` is validated by the simulator (`validate_sim_opts`), so a
//!   zero horizon or path count is reported there.
//!
//! Conventions
//! -----------
//! - `SimOpts` and `SimStart` derive serde so they can be embedded in a
//!   JSON run configuration.
//!
//! Testing notes
//! -------------
//! - Unit tests check defaults and that constructors preserve inputs.
use crate::{
    optimization::loglik_optimizer::MLEOptions,
    volatility::core::{guards::VarianceGuards, init::VarianceInit},
};
use serde::{Deserialize, Serialize};

/// Default simulation horizon (one trading year).
pub const DEFAULT_HORIZON: usize = 252;

/// Default number of simulated paths.
pub const DEFAULT_N_PATHS: usize = 10_000;

/// Default number of discarded steps for a cold start.
pub const DEFAULT_BURN_IN: usize = 500;

/// Flavor of the reported standard errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StdErrKind {
    /// Inverse observed information.
    Classical,
    /// Sandwich `J⁻¹ S J⁻¹` with `S` the outer product of per-observation scores.
    Robust,
}

/// Estimation configuration for the GJR-GARCH-t model.
///
/// Fields
/// ------
/// - `init`: pre-sample variance policy (default [`VarianceInit::Backcast`]).
/// - `mle_opts`: L-BFGS options (default `MLEOptions::default()`).
/// - `guards`: clamp applied to every σ²_t.
/// - `std_errors`: flavor of summary standard errors (default robust).
#[derive(Debug, Clone, PartialEq)]
pub struct GarchOptions {
    pub init: VarianceInit,
    pub mle_opts: MLEOptions,
    pub guards: VarianceGuards,
    pub std_errors: StdErrKind,
}

impl GarchOptions {
    /// Bundle already-validated components.
    pub fn new(
        init: VarianceInit, mle_opts: MLEOptions, guards: VarianceGuards, std_errors: StdErrKind,
    ) -> GarchOptions {
        GarchOptions { init, mle_opts, guards, std_errors }
    }
}

impl Default for GarchOptions {
    fn default() -> Self {
        GarchOptions {
            init: VarianceInit::Backcast,
            mle_opts: MLEOptions::default(),
            guards: VarianceGuards::default(),
            std_errors: StdErrKind::Robust,
        }
    }
}

/// Simulation configuration.
///
/// Fields
/// ------
/// - `horizon`: steps per path (H ≥ 1).
/// - `n_paths`: number of independent paths (N ≥ 1).
/// - `seed`: master seed; `None` draws one from OS entropy. Path `i` always
///   uses stream `i` of a ChaCha8 generator seeded with the master seed, so
///   results do not depend on thread count or scheduling.
/// - `sim_start`: how the recursion is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimOpts {
    pub horizon: usize,
    pub n_paths: usize,
    pub seed: Option<u64>,
    pub sim_start: SimStart,
}

impl SimOpts {
    /// Plain constructor; ranges are checked by the simulator.
    pub fn new(horizon: usize, n_paths: usize, seed: Option<u64>, sim_start: SimStart) -> SimOpts {
        SimOpts { horizon, n_paths, seed, sim_start }
    }
}

impl Default for SimOpts {
    fn default() -> Self {
        SimOpts {
            horizon: DEFAULT_HORIZON,
            n_paths: DEFAULT_N_PATHS,
            seed: None,
            sim_start: SimStart::default(),
        }
    }
}

/// SimStart — how each simulated path is initialized.
///
/// Variants
/// --------
/// - `Cold { burn_in }`: start from the unconditional mean and variance,
///   run `burn_in` steps and discard them.
/// - `Warm`: continue from the last in-sample return, residual and
///   conditional variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimStart {
    Cold { burn_in: usize },
    Warm,
}

impl Default for SimStart {
    fn default() -> Self {
        SimStart::Cold { burn_in: DEFAULT_BURN_IN }
    }
}
