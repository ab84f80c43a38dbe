//! L-BFGS construction for the two supported line searches.
//!
//! The builders read the history size and tolerances from [`MLEOptions`] and
//! return a solver ready to hand to [`run_lbfgs`](super::run::run_lbfgs).
//! Iteration caps are applied on the executor, not here.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS, Theta,
            DEFAULT_LBFGS_MEM,
        },
    },
};

/// L-BFGS with Hager–Zhang line search.
///
/// # Errors
/// Propagates argmin's rejection of a tolerance (mapped to `OptError`).
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsHagerZhang::new(HagerZhangLS::new(), mem), opts)
}

/// L-BFGS with More–Thuente line search.
///
/// # Errors
/// Propagates argmin's rejection of a tolerance (mapped to `OptError`).
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply the gradient and cost-change tolerances that are present.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Both builders with default and explicit history sizes.
    // - Tolerance wiring when some rules are absent.
    //
    // They intentionally DO NOT cover:
    // - Solver execution (see `api` tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Both builders accept the default options used by the GARCH estimator.
    //
    // Given
    // -----
    // - `MLEOptions::default()` with each line searcher.
    //
    // Expect
    // ------
    // - Both builders return `Ok`.
    fn builders_accept_default_options() {
        // Arrange
        let mut opts = MLEOptions::default();

        // Act
        let mt = build_optimizer_more_thuente(&opts);
        opts.line_searcher = LineSearcher::HagerZhang;
        let hz = build_optimizer_hager_zhang(&opts);

        // Assert
        assert!(mt.is_ok());
        assert!(hz.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // An explicit history size and a cap-only rule set are both valid.
    //
    // Given
    // -----
    // - `Tolerances::new(None, None, Some(40))` and `lbfgs_mem = Some(11)`.
    //
    // Expect
    // ------
    // - `configure_lbfgs` succeeds without any tolerance applied.
    fn configure_lbfgs_allows_iteration_cap_only() {
        // Arrange
        let tols = Tolerances::new(None, None, Some(40)).expect("cap-only rules are valid");
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, false, Some(11))
            .expect("options should be valid");
        let raw = LBFGS::new(MoreThuenteLS::new(), 11);

        // Act
        let configured = configure_lbfgs(raw, &opts);

        // Assert
        assert!(configured.is_ok());
    }
}
