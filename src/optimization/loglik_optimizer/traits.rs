//! Public surface of the likelihood optimizer.
//!
//! - [`LogLikelihood`]: what a model implements to be fitted.
//! - [`MLEOptions`] / [`Tolerances`]: stopping rules and solver choice.
//! - [`LineSearcher`]: line search used inside L-BFGS.
//! - [`OptimOutcome`]: normalized result of [`maximize`](super::maximize).
//!
//! The optimizer maximizes `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`. An analytic
//! gradient, when supplied, is `∇ℓ(θ)`; the adapter flips its sign.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
        Cost, FnEvalMap, Grad, Theta,
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Log-likelihood interface for models fitted by [`maximize`](super::maximize).
///
/// - `value(θ, data)` returns `ℓ(θ)`; invalid states are reported as
///   [`OptError`], never as panics.
/// - `check(θ, data)` runs once before the solver starts.
/// - `grad(θ, data)` is optional; the default signals
///   [`OptError::GradientNotImplemented`] and finite differences take over.
pub trait LogLikelihood {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Line search used inside L-BFGS.
///
/// Parses case-insensitively from `"MoreThuente"` / `"HagerZhang"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer configuration.
///
/// Fields
/// ------
/// - `tols`: stopping rules (see [`Tolerances`]).
/// - `line_searcher`: L-BFGS line search.
/// - `verbose`: attach argmin's slog observer (only with the `obs_slog`
///   feature; a no-op otherwise).
/// - `lbfgs_mem`: L-BFGS history size, `None` for
///   [`DEFAULT_LBFGS_MEM`](super::types::DEFAULT_LBFGS_MEM).
///
/// The default is tuned for average (per-observation) log-likelihoods:
/// `tol_grad = 1e-6`, `tol_cost = 1e-10`, `max_iter = 500`, More–Thuente.
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// Build optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: Some(1e-10), max_iter: Some(500) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Stopping rules for the solver.
///
/// Any field may be `None`, but at least one must be set. A run that only
/// stops because `max_iter` was hit is reported as not converged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == Some(0)`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Result of a [`maximize`](super::maximize) run.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best log-likelihood `ℓ(θ̂)` (not the cost).
/// - `converged`: `true` only when the solver met a tolerance (or a target
///   cost); running out of iterations counts as not converged.
/// - `status`: readable termination status.
/// - `iterations`: solver iterations performed.
/// - `fn_evals`: argmin's counters (`cost_count`, `gradient_count`, ...).
/// - `grad_norm`: norm of the last cost gradient, when available.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated outcome from raw solver state.
    ///
    /// # Errors
    /// - [`OptError::MissingThetaHat`] / [`OptError::InvalidThetaHat`] when
    ///   the best parameter is absent or non-finite.
    /// - [`OptError::NonFiniteCost`] when `value` is not finite.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match &termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, format!("{reason:?}"))
            }
        };
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Tolerance validation rules.
    // - Line-search parsing.
    // - Mapping of argmin termination reasons onto `converged`.
    //
    // They intentionally DO NOT cover:
    // - Running a solver (see `api` tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Tolerances must reject an empty rule set and non-positive values.
    //
    // Given
    // -----
    // - All-`None` tolerances, a negative gradient tolerance, and zero
    //   iterations.
    //
    // Expect
    // ------
    // - Each returns the matching `OptError` variant.
    fn tolerances_reject_invalid_rules() {
        // Act / Assert
        assert_eq!(Tolerances::new(None, None, None), Err(OptError::NoTolerancesProvided));
        assert!(matches!(
            Tolerances::new(Some(-1.0), None, None),
            Err(OptError::InvalidTolGrad { .. })
        ));
        assert!(matches!(
            Tolerances::new(None, Some(f64::NAN), None),
            Err(OptError::InvalidTolCost { .. })
        ));
        assert!(matches!(
            Tolerances::new(None, None, Some(0)),
            Err(OptError::InvalidMaxIter { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Line searchers parse case-insensitively and reject unknown names.
    //
    // Given
    // -----
    // - "hagerzhang", "MORETHUENTE" and "backtracking".
    //
    // Expect
    // ------
    // - The first two parse, the last yields `InvalidLineSearch`.
    fn line_searcher_parses_case_insensitively() {
        assert_eq!("hagerzhang".parse::<LineSearcher>(), Ok(LineSearcher::HagerZhang));
        assert_eq!("MORETHUENTE".parse::<LineSearcher>(), Ok(LineSearcher::MoreThuente));
        assert!(matches!(
            "backtracking".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Only genuine convergence counts as converged.
    //
    // Given
    // -----
    // - The same finite state terminated by `SolverConverged` and by
    //   `MaxItersReached`.
    //
    // Expect
    // ------
    // - `converged` is true for the former and false for the latter.
    fn outcome_treats_max_iters_as_not_converged() {
        // Arrange
        let theta = array![0.1, 0.2];

        // Act
        let ok = OptimOutcome::new(
            Some(theta.clone()),
            -1.5,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            12,
            FnEvalMap::new(),
            Some(array![1e-7, -1e-7]),
        )
        .expect("finite outcome should validate");
        let capped = OptimOutcome::new(
            Some(theta),
            -1.5,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached),
            500,
            FnEvalMap::new(),
            None,
        )
        .expect("finite outcome should validate");

        // Assert
        assert!(ok.converged);
        assert!(ok.grad_norm.is_some());
        assert!(!capped.converged);
        assert!(capped.status.contains("MaxIters"));
    }

    #[test]
    // Purpose
    // -------
    // A missing best parameter is an error, not a silent default.
    //
    // Given
    // -----
    // - `theta_hat_opt = None`.
    //
    // Expect
    // ------
    // - `OptError::MissingThetaHat`.
    fn outcome_requires_theta_hat() {
        let res = OptimOutcome::new(
            None,
            0.0,
            TerminationStatus::NotTerminated,
            0,
            FnEvalMap::new(),
            None,
        );
        assert_eq!(res, Err(OptError::MissingThetaHat));
    }
}
