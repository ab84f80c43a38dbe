//! loglik_optimizer::api — entry point for maximizing a [`LogLikelihood`].
//!
//! Purpose
//! -------
//! Give model code one call that turns "a log-likelihood plus a starting
//! point" into an [`OptimOutcome`], hiding argmin's executor, solver and
//! line-search generics.
//!
//! Key behaviors
//! -------------
//! - Dispatches on [`LineSearcher`] to a More–Thuente or Hager–Zhang L-BFGS.
//! - Works on the sign-flipped problem `c(θ) = −ℓ(θ)` through
//!   [`ArgMinAdapter`]; the outcome is reported back in ℓ-space.
//!
//! Downstream usage
//! ----------------
//! - `GjrGarchModel::fit` calls [`maximize`] with the model as `f` and the
//!   return series as `data`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
        OptimOutcome, Theta,
    },
};

/// Maximize `ℓ(θ)` with L-BFGS.
///
/// # Behavior
/// 1. Runs `f.check(theta0, data)` so a malformed start fails before any
///    solver state is built.
/// 2. Wraps `(f, data)` in an [`ArgMinAdapter`], which minimizes `−ℓ(θ)`
///    and falls back to finite differences when `f.grad` is not provided.
/// 3. Builds the solver for `opts.line_searcher` and hands it to
///    [`run_lbfgs`].
///
/// # Parameters
/// - `f`: the model; borrowed for the whole run.
/// - `theta0`: unconstrained starting vector, moved into the executor.
/// - `data`: passed through untouched to `value`, `grad` and `check`.
/// - `opts`: tolerances, line search, iteration cap and verbosity.
///
/// # Returns
/// An [`OptimOutcome`] with `θ̂`, `ℓ(θ̂)`, the termination status and the
/// iteration and evaluation counts. A run stopped by the iteration cap is
/// returned with `converged == false`; deciding what to do with it is up to
/// the caller.
///
/// # Errors
/// - Errors from `f.check`.
/// - Solver construction errors (invalid tolerances or line-search
///   settings).
/// - argmin runtime errors, including objective errors raised mid-run.
///
/// # Example
/// ```
/// use drawdown_risk::optimization::{
///     errors::OptResult,
///     loglik_optimizer::{maximize, LogLikelihood, MLEOptions, Theta},
/// };
/// use ndarray::array;
///
/// struct Bowl;
/// impl LogLikelihood for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-(theta[0] - 1.0).powi(2))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Bowl, array![3.0], &(), &MLEOptions::default()).unwrap();
/// assert!((out.theta_hat[0] - 1.0).abs() < 1e-4);
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{errors::OptError, loglik_optimizer::traits::Tolerances};
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Recovery of the maximizer of a smooth concave objective with both
    //   line searches and finite-difference gradients.
    // - Rejection of the starting point by `check`.
    //
    // They intentionally DO NOT cover:
    // - GARCH likelihoods (see `volatility::models`).
    // -------------------------------------------------------------------------

    /// Gaussian log-likelihood in (mean, log-sd) for a fixed sample.
    struct GaussianLogLik;

    impl LogLikelihood for GaussianLogLik {
        type Data = Array1<f64>;

        fn value(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<f64> {
            let (mu, log_sd) = (theta[0], theta[1]);
            let var = (2.0 * log_sd).exp();
            let n = data.len() as f64;
            let ss = data.mapv(|x| (x - mu).powi(2)).sum();
            Ok(-0.5 * (2.0 * std::f64::consts::PI * var).ln() - 0.5 * ss / (var * n))
        }

        fn check(&self, theta: &Theta, _data: &Array1<f64>) -> OptResult<()> {
            if theta.len() != 2 {
                return Err(OptError::ThetaLengthMismatch { expected: 2, actual: theta.len() });
            }
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // Both line searches reach the closed-form Gaussian MLE.
    //
    // Given
    // -----
    // - Data [1, 2, 3, 4] (mean 2.5, MLE variance 1.25).
    // - Start θ₀ = [0, 0].
    //
    // Expect
    // ------
    // - θ̂ ≈ [2.5, ½ ln 1.25] and a converged outcome for each searcher.
    fn maximize_recovers_gaussian_mle_with_both_line_searches() {
        // Arrange
        let data = array![1.0, 2.0, 3.0, 4.0];
        let tols = Tolerances::new(Some(1e-6), None, Some(200)).expect("valid tolerances");

        for ls in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            let opts = MLEOptions::new(tols, ls, false, None).expect("valid options");

            // Act
            let out = maximize(&GaussianLogLik, array![0.0, 0.0], &data, &opts)
                .expect("optimization should succeed");

            // Assert
            assert!(out.converged, "{ls:?} did not converge: {}", out.status);
            assert_abs_diff_eq!(out.theta_hat[0], 2.5, epsilon = 1e-4);
            assert_abs_diff_eq!(out.theta_hat[1], 0.5 * 1.25f64.ln(), epsilon = 1e-4);
        }
    }

    #[test]
    // Purpose
    // -------
    // A failing `check` stops the run before the solver starts.
    //
    // Given
    // -----
    // - A length-3 starting vector for a 2-parameter model.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch { expected: 2, actual: 3 }`.
    fn maximize_rejects_bad_start() {
        let data = array![1.0, 2.0];
        let res = maximize(&GaussianLogLik, array![0.0, 0.0, 0.0], &data, &MLEOptions::default());
        assert_eq!(res, Err(OptError::ThetaLengthMismatch { expected: 2, actual: 3 }));
    }
}
