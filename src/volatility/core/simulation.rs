//! Monte Carlo path simulation for a fitted GJR-GARCH-t model.
//!
//! Purpose
//! -------
//! Draw many independent future return trajectories from fitted
//! parameters, either as a full `N × H` matrix or streamed straight into
//! per-path maximum drawdowns without materializing the matrix.
//!
//! Key behaviors
//! -------------
//! - Each step draws a standardized Student-t `z`, sets `ε = σ·z`,
//!   `r = μ + φ·r_prev + ε`, emits `r / scale`, and updates σ² with the
//!   leverage indicator on `ε`.
//! - [`SimStart::Cold`] starts every path at the unconditional mean and
//!   variance and discards `burn_in` steps; [`SimStart::Warm`] continues
//!   from the in-sample [`TerminalState`].
//! - Path `i` uses `ChaCha8Rng` seeded with the master seed on stream `i`,
//!   so output depends only on the seed, never on thread count or the order
//!   rayon schedules work.
//! - [`simulate_drawdowns`] runs simulate → reconstruct → drawdown per path
//!   with one reusable pair of buffers per worker (`map_init`).
//!
//! Invariants & assumptions
//! ------------------------
//! - `horizon ≥ 1` and `n_paths ≥ 1` (checked by `validate_sim_opts`).
//! - Parameters are stationary, so the unconditional moments exist.
//! - Simulated σ² values are clamped by the model's [`VarianceGuards`].
//!
//! Conventions
//! -----------
//! - Output rows are paths, columns are time steps.
//! - Returned values are in raw log-return units (divided by `scale`).
//!
//! Testing notes
//! -------------
//! - Seed reproducibility, matrix/streaming agreement, the zero-variance
//!   limit, and moment sanity of long cold-start paths are covered below.
use crate::{
    risk::{drawdown::max_drawdown, prices::reconstruct_path_into, prices::validate_anchor},
    volatility::{
        core::{
            guards::VarianceGuards,
            innovations::{StdStudentT, TSampler},
            options::{SimOpts, SimStart},
            params::GarchParams,
            validation::validate_sim_opts,
        },
        errors::{GarchError, GarchResult},
    },
};
use ndarray::{Array1, Array2, ArrayViewMut1, Zip};
use rand::{distributions::Distribution, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

/// Last in-sample values needed to continue the recursion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalState {
    /// Last observed (scaled) return `r_T`.
    pub last_return: f64,
    /// Last residual `ε_T`.
    pub last_resid: f64,
    /// Last conditional variance `σ²_T`.
    pub last_sigma2: f64,
}

/// Everything the per-path loop needs, shared read-only across workers.
///
/// Built once per simulation run; the start mode is resolved up front so
/// the per-path loop only carries `(r_prev, σ²)`.
#[derive(Debug, Clone)]
pub struct PathSimulator {
    /// Fitted coefficients.
    params: GarchParams,
    /// σ² clamps applied after every update.
    guards: VarianceGuards,
    /// Unit-variance t sampler at the fitted ν.
    sampler: TSampler,
    /// Return scale; emitted values are divided by it.
    scale: f64,
    /// `r_0` of every path (unconditional mean or last in-sample return).
    start_return: f64,
    /// σ² for the first simulated step.
    start_sigma2: f64,
    /// Discarded leading steps (cold start only).
    burn_in: usize,
}

impl PathSimulator {
    /// Resolve the start mode against the fitted state.
    ///
    /// Parameters
    /// ----------
    /// - `params`: fitted coefficients.
    /// - `terminal`: last in-sample return, residual and variance; read only
    ///   under `SimStart::Warm`.
    /// - `guards`: σ² clamps.
    /// - `scale`: return scale of the estimation sample.
    /// - `sim_start`:
    ///   - `Cold { burn_in }`: `r_0 = μ/(1 − φ)`, `σ²_1 = ω/(1 − persistence)`,
    ///     then `burn_in` discarded steps;
    ///   - `Warm`: `r_0 = r_T`, `σ²_1 = ω + (α + γ·1[ε_T < 0])·ε²_T + β·σ²_T`.
    ///
    /// # Errors
    /// `GarchError::InvalidParams` if ν is rejected by the sampler.
    pub fn new(
        params: &GarchParams, terminal: &TerminalState, guards: &VarianceGuards, scale: f64,
        sim_start: SimStart,
    ) -> GarchResult<Self> {
        let sampler = StdStudentT::new_unchecked(params.nu).sampler()?;
        let (start_return, start_sigma2, burn_in) = match sim_start {
            SimStart::Cold { burn_in } => {
                (params.uncond_mean(), guards.clamp(params.uncond_variance()), burn_in)
            }
            SimStart::Warm => (
                terminal.last_return,
                guards.clamp(params.next_variance(terminal.last_resid, terminal.last_sigma2)),
                0,
            ),
        };
        Ok(PathSimulator {
            params: *params,
            guards: *guards,
            sampler,
            scale,
            start_return,
            start_sigma2,
            burn_in,
        })
    }

    /// Simulate one path into `out` using `rng`.
    ///
    /// Writes `out.len()` raw log-returns (already divided by the scale)
    /// after running the burn-in on the same generator.
    pub fn simulate_into(&self, rng: &mut ChaCha8Rng, mut out: ArrayViewMut1<f64>) {
        let mut r_prev = self.start_return;
        let mut sigma2 = self.start_sigma2;
        for _ in 0..self.burn_in {
            self.step(rng, &mut r_prev, &mut sigma2);
        }
        for slot in out.iter_mut() {
            *slot = self.step(rng, &mut r_prev, &mut sigma2) / self.scale;
        }
    }

    /// One draw of the AR(1)-GJR recursion; returns the scaled return.
    #[inline]
    fn step(&self, rng: &mut ChaCha8Rng, r_prev: &mut f64, sigma2: &mut f64) -> f64 {
        let p = &self.params;
        let eps = sigma2.sqrt() * self.sampler.sample(rng);
        let r = p.mu + p.phi * *r_prev + eps;
        *sigma2 = self.guards.clamp(p.next_variance(eps, *sigma2));
        *r_prev = r;
        r
    }
}

/// Generator for path `index` under `master_seed`.
///
/// ChaCha8 keyed by the master seed, with the path index selecting the
/// stream, so paths are independent and each can be regenerated alone.
pub fn path_rng(master_seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(master_seed);
    rng.set_stream(index as u64);
    rng
}

/// Master seed from options, or fresh entropy.
///
/// Callers that need to report the seed resolve it once here and pass it
/// back in `SimOpts::seed`.
pub fn master_seed(opts: &SimOpts) -> u64 {
    opts.seed.unwrap_or_else(rand::random)
}

/// Simulate an `n_paths × horizon` matrix of raw log-returns.
///
/// Parameters
/// ----------
/// - `params`, `terminal`, `guards`, `scale`: the fitted model state.
/// - `opts`: horizon `H`, path count `N`, optional seed and start mode.
///
/// Returns
/// -------
/// - `Array2` of shape `(N, H)`; row `i` is path `i` generated from
///   `path_rng(seed, i)`. Rows are filled in parallel.
///
/// # Errors
/// - `GarchError::InvalidSimParameter` for zero horizon or path count.
/// - `GarchError::InvalidParams` if ν cannot be sampled.
pub fn simulate_paths(
    params: &GarchParams, terminal: &TerminalState, guards: &VarianceGuards, scale: f64,
    opts: &SimOpts,
) -> GarchResult<Array2<f64>> {
    validate_sim_opts(opts)?;
    let sim = PathSimulator::new(params, terminal, guards, scale, opts.sim_start)?;
    let seed = master_seed(opts);
    debug!(seed, horizon = opts.horizon, n_paths = opts.n_paths, "simulating return paths");

    let mut out = Array2::<f64>::zeros((opts.n_paths, opts.horizon));
    Zip::indexed(out.rows_mut()).par_for_each(|i, row| {
        let mut rng = path_rng(seed, i);
        sim.simulate_into(&mut rng, row);
    });
    Ok(out)
}

/// Simulate paths and reduce each to its maximum drawdown in price units,
/// anchoring prices at `anchor`.
///
/// Produces the same drawdowns as reconstructing prices from
/// [`simulate_paths`] with the same seed.
///
/// # Errors
/// As [`simulate_paths`], plus `GarchError::InvalidSimParameter` for a
/// non-positive or non-finite `anchor`.
pub fn simulate_drawdowns(
    params: &GarchParams, terminal: &TerminalState, guards: &VarianceGuards, scale: f64,
    opts: &SimOpts, anchor: f64,
) -> GarchResult<Array1<f64>> {
    validate_sim_opts(opts)?;
    validate_anchor(anchor).map_err(|_| GarchError::InvalidSimParameter {
        name: "anchor",
        value: anchor,
        reason: "anchor price must be finite and > 0",
    })?;
    let sim = PathSimulator::new(params, terminal, guards, scale, opts.sim_start)?;
    let seed = master_seed(opts);
    let horizon = opts.horizon;
    debug!(seed, horizon, n_paths = opts.n_paths, "simulating drawdowns");

    let drawdowns: Vec<f64> = (0..opts.n_paths)
        .into_par_iter()
        .map_init(
            || (Array1::<f64>::zeros(horizon), Array1::<f64>::zeros(horizon)),
            |(returns, prices), i| {
                let mut rng = path_rng(seed, i);
                sim.simulate_into(&mut rng, returns.view_mut());
                reconstruct_path_into(returns.view(), anchor, prices.view_mut());
                max_drawdown(prices.view())
            },
        )
        .collect();
    Ok(Array1::from_vec(drawdowns))
}
