//! loglik_optimizer::run — executor wiring shared by both line searches.
//!
//! Builds an argmin [`Executor`] around an [`ArgMinAdapter`] and a concrete
//! L-BFGS solver, applies the iteration cap and optional observer, and
//! converts the final argmin state into an [`OptimOutcome`] (flipping the
//! cost back to a log-likelihood).
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter, Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Run an L-BFGS solver on `problem`, starting from `theta0`.
///
/// # Type Parameters
/// - `F`: the log-likelihood being maximized.
/// - `S`: an argmin solver over `ArgMinAdapter<'a, F>` with `Theta`
///   parameters, `Grad` gradients and `f64` costs; in practice one of the
///   aliases from `types` built by `builders`.
///
/// # Arguments
/// - `theta0`: starting point, moved into the executor state.
/// - `opts`: only `tols.max_iter` and `verbose` are read here; the other
///   tolerances were already baked into `solver`.
/// - `problem`: adapter exposing `−ℓ(θ)` and its gradient.
/// - `solver`: fully configured L-BFGS instance.
///
/// # Feature flags
/// With `obs_slog` and `opts.verbose`, ℓ(θ₀) and ‖∇ℓ(θ₀)‖ are emitted as a
/// `tracing` event and argmin's slog terminal observer is attached for every
/// iteration.
///
/// # Returns
/// The best parameter argmin saw, `ℓ` at that parameter (the negated best
/// cost), the termination status, the iteration count, argmin's
/// function-evaluation counters and the last gradient, if any.
///
/// # Errors
/// - argmin runtime errors (line-search failures, errors raised by the
///   cost function) mapped into `OptError`.
/// - Validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver).configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

/// Log ℓ(θ₀) and the starting gradient norm; a gradient failure only drops
/// the norm from the event.
#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let ll0 = -problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());
    tracing::info!(loglik = ll0, grad_norm = ?g0n, "starting L-BFGS");
    Ok(())
}
