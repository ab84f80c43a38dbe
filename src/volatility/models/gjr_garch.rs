//! AR(1)-GJR-GARCH(1,1,1) with standardized Student-t innovations.
//!
//! This module wires the core recursions to the `LogLikelihood` trait and
//! produces a [`FittedGarch`], the immutable value the simulator consumes.
//!
//! Key ideas:
//! - The optimizer works on an unconstrained θ ∈ ℝ⁷; `GarchParams::from_theta`
//!   maps every θ to an admissible, stationary parameter set, so the search
//!   never leaves the feasible region.
//! - The objective is the **average** log-likelihood over the `n − 1`
//!   residuals, with the pre-sample variance fixed from the starting
//!   residuals. The gradient is left to finite differences in the adapter.
//! - After L-BFGS terminates, a non-converged status is an error
//!   (`ConvergenceFailed`) rather than a silently returned estimate.
//! - Standard errors and the diagnostic table are computed in model space
//!   (see [`FitSummary`]).
use crate::{
    optimization::{
        errors::OptResult,
        loglik_optimizer::{maximize, LogLikelihood, OptimOutcome, Theta},
    },
    volatility::{
        core::{
            data::ReturnSeries,
            guards::VarianceGuards,
            init::{starting_values, StartingValues},
            innovations::{StdStudentT, TSampler},
            options::{GarchOptions, SimOpts},
            params::GarchParams,
            simulation::{simulate_drawdowns, simulate_paths, TerminalState},
            validation::validate_theta,
            variance::{likelihood_driver, GarchScratch},
        },
        errors::{GarchError, GarchResult},
        models::{
            model_internals::{n_eff, terminal_state},
            summary::FitSummary,
        },
    },
};
use ndarray::{Array1, Array2};
use tracing::{debug, info};

/// Fewest returns accepted for estimation.
pub const MIN_RETURNS: usize = 10;

/// GJR-GARCH-t estimator bound to one return sample.
///
/// Holds the options, the scratch buffers sized for the sample, and the
/// starting values (which also fix the pre-sample variance). After
/// [`fit`](GjrGarchModel::fit), `results` stores the raw optimizer outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct GjrGarchModel {
    /// Estimation options.
    pub options: GarchOptions,
    /// Residual and variance buffers.
    pub scratch_bufs: GarchScratch,
    /// Starting parameters and the fixed pre-sample variance.
    pub start: StartingValues,
    /// Optimizer outcome (populated after `fit`).
    pub results: Option<OptimOutcome>,
}

impl GjrGarchModel {
    /// Prepare a model for `data`: size buffers and compute starting values.
    ///
    /// # Arguments
    /// - `options`: guards, pre-sample policy, optimizer settings and the
    ///   standard-error kind.
    /// - `data`: the return sample to be fitted; used to size the scratch
    ///   buffers (`n_eff = len − 1`) and to pick starting values.
    ///
    /// # Returns
    /// A model whose `start.presample` is already fixed; `results` is `None`
    /// until [`fit`](GjrGarchModel::fit) succeeds.
    ///
    /// # Errors
    /// - `GarchError::InsufficientData` for fewer than [`MIN_RETURNS`] returns.
    /// - Errors from [`starting_values`].
    pub fn new(options: GarchOptions, data: &ReturnSeries) -> GarchResult<GjrGarchModel> {
        if data.len() < MIN_RETURNS {
            return Err(GarchError::InsufficientData { len: data.len(), required: MIN_RETURNS });
        }
        let scratch_bufs = GarchScratch::new(n_eff(data));
        let start =
            starting_values(data.data.view(), &options.init, &options.guards, &scratch_bufs)?;
        Ok(GjrGarchModel { options, scratch_bufs, start, results: None })
    }

    /// Pre-sample variance v₀ used to seed σ²₀.
    pub fn presample(&self) -> f64 {
        self.start.presample
    }

    /// Fit by maximum likelihood and return the fitted model.
    ///
    /// ## Arguments
    /// - `data`: the same sample the model was built for.
    ///
    /// ## Steps
    /// 1. Map the starting parameters to θ₀.
    /// 2. Run L-BFGS on the average log-likelihood.
    /// 3. Reject a non-converged run.
    /// 4. Map θ̂ back to model space and re-check stationarity.
    /// 5. Re-run the recursion at θ̂ for the total log-likelihood and the
    ///    terminal state; build the diagnostic summary.
    ///
    /// ## Returns
    /// - A self-contained [`FittedGarch`]; `self.results` keeps the raw
    ///   optimizer outcome for inspection.
    ///
    /// ## Notes
    /// - A failed standard-error computation does not fail the fit; the
    ///   summary carries NaN errors instead (see [`FitSummary::from_fit`]).
    ///
    /// # Errors
    /// - `GarchError::ConvergenceFailed` when the optimizer fails, stops
    ///   without converging, or ends at a non-stationary point.
    /// - Recursion errors at θ̂.
    pub fn fit(&mut self, data: &ReturnSeries) -> GarchResult<FittedGarch> {
        let theta0 = self.start.params.to_theta()?;
        let outcome = maximize(&*self, theta0, data, &self.options.mle_opts)?;
        debug!(
            status = %outcome.status,
            iterations = outcome.iterations,
            grad_norm = ?outcome.grad_norm,
            "L-BFGS finished"
        );
        if !outcome.converged {
            return Err(GarchError::ConvergenceFailed { status: outcome.status.clone() });
        }
        let params = GarchParams::from_theta(outcome.theta_hat.view())
            .and_then(|p| p.validate().map(|_| p))
            .map_err(|e| GarchError::ConvergenceFailed {
                status: format!("estimate is not admissible: {e}"),
            })?;

        let (loglik, terminal) = terminal_state(self, data, &params)?;
        let summary = FitSummary::from_fit(self, data, &params, loglik, &outcome);
        info!(
            mu = params.mu,
            phi = params.phi,
            omega = params.omega,
            alpha = params.alpha,
            gamma = params.gamma,
            beta = params.beta,
            nu = params.nu,
            loglik,
            persistence = params.persistence(),
            "GJR-GARCH-t fit converged"
        );

        let fitted = FittedGarch {
            params,
            terminal,
            guards: self.options.guards,
            scale: data.scale,
            n_obs: n_eff(data),
            loglik,
            outcome: outcome.clone(),
            summary,
        };
        self.results = Some(outcome);
        Ok(fitted)
    }
}

impl LogLikelihood for GjrGarchModel {
    type Data = ReturnSeries;

    /// Average log-likelihood at θ.
    ///
    /// # Errors
    /// - Parameter mapping failures (`ParamError`).
    /// - Recursion failures such as a NaN variance.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = GarchParams::from_theta(theta.view())?;
        let total = likelihood_driver(
            &params,
            data.data.view(),
            self.presample(),
            &self.options.guards,
            &self.scratch_bufs,
        )?;
        Ok(total / n_eff(data) as f64)
    }

    /// θ must have length 7 and finite entries.
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view())?;
        Ok(())
    }
}

/// Immutable result of a successful fit.
///
/// Carries everything the simulator needs (parameters, terminal state,
/// guards, return scale) plus the optimizer outcome and diagnostic summary.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedGarch {
    /// Model-space estimates.
    pub params: GarchParams,
    /// Last in-sample return, residual and variance.
    pub terminal: TerminalState,
    /// Variance guards used during estimation, reused in simulation.
    pub guards: VarianceGuards,
    /// Return scale of the estimation sample (100 for percent returns).
    pub scale: f64,
    /// Number of likelihood terms.
    pub n_obs: usize,
    /// Total log-likelihood at the estimate.
    pub loglik: f64,
    /// Optimizer outcome.
    pub outcome: OptimOutcome,
    /// Coefficient table and information criteria.
    pub summary: FitSummary,
}

impl FittedGarch {
    /// One-step-ahead conditional variance `σ²_{T+1}` (scaled units).
    ///
    /// Starting level of every path under `SimStart::Warm`.
    pub fn next_variance(&self) -> f64 {
        self.guards.clamp(self.params.next_variance(self.terminal.last_resid, self.terminal.last_sigma2))
    }

    /// Sampler of standardized Student-t draws at the fitted ν.
    ///
    /// # Errors
    /// `GarchError::InvalidParams` if ν is rejected.
    pub fn sampler(&self) -> GarchResult<TSampler> {
        Ok(StdStudentT::new(self.params.nu)?.sampler()?)
    }

    /// `n_paths × horizon` matrix of simulated raw log-returns.
    ///
    /// Simulated scaled returns are divided by `self.scale` before they are
    /// stored, so rows can be fed straight into price reconstruction.
    ///
    /// # Errors
    /// See [`simulate_paths`].
    pub fn simulate(&self, opts: &SimOpts) -> GarchResult<Array2<f64>> {
        simulate_paths(&self.params, &self.terminal, &self.guards, self.scale, opts)
    }

    /// Per-path maximum drawdowns of simulated prices anchored at `anchor`.
    ///
    /// # Arguments
    /// - `opts`: horizon, path count, seed and start policy.
    /// - `anchor`: last observed price, `P_0` of every path.
    ///
    /// # Returns
    /// One drawdown per path, in price units, identical to reducing the rows
    /// of [`simulate`](FittedGarch::simulate) but without the `N × H` matrix.
    ///
    /// # Errors
    /// See [`simulate_drawdowns`].
    pub fn simulate_drawdowns(&self, opts: &SimOpts, anchor: f64) -> GarchResult<Array1<f64>> {
        simulate_drawdowns(&self.params, &self.terminal, &self.guards, self.scale, opts, anchor)
    }
}

/// Build a model for `data` and fit it in one call.
///
/// # Errors
/// As [`GjrGarchModel::new`] and [`GjrGarchModel::fit`].
pub fn fit(data: &ReturnSeries, options: GarchOptions) -> GarchResult<FittedGarch> {
    GjrGarchModel::new(options, data)?.fit(data)
}
