//! loglik_optimizer::finite_diff — finite-difference gradients and Hessians.
//!
//! Purpose
//! -------
//! Give the optimizer and the inference layer derivative approximations
//! without either of them depending on how they are produced.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward-difference gradient through `finitediff`, with
//!   the first error raised inside the objective captured and returned.
//! - [`compute_hessian`]: central second differences of a scalar objective,
//!   with per-coordinate steps scaled to the coordinate size.
//!
//! Invariants & assumptions
//! ------------------------
//! - Everything returned here passes [`validate_grad`] / [`validate_hessian`].
//! - Hessians are exactly symmetric.
//!
//! Conventions
//! -----------
//! - Hessian steps are `h_i = ε^{1/4} · max(|x_i|, 0.1)`; second differences
//!   lose roughly twice the digits of first differences, so the
//!   `sqrt(ε)` steps `finitediff` uses for gradients are too small here.
//!
//! Downstream usage
//! ----------------
//! - `adapter` falls back to [`run_fd_diff`] when central differences fail.
//! - `inference::hessian` builds observed information from
//!   [`compute_hessian`] of the average log-likelihood.
//!
//! Testing notes
//! -------------
//! - Quadratics and a separable exponential with known Hessians; error
//!   capture for failing objectives.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        types::Hessian,
        validation::{validate_grad, validate_hessian},
        Grad, Theta,
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use ndarray::Array2;
use std::cell::RefCell;

/// Forward-difference gradient of `func` with error capture.
///
/// `func` cannot return `Result`, so failures are written into
/// `closure_err` and signalled with `NaN`. The cell is cleared first.
///
/// # Errors
/// - The first error captured while differencing.
/// - [`validate_grad`] failures on the resulting gradient.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Central-difference Hessian of a scalar objective at `theta`.
///
/// Parameters
/// ----------
/// - `f`: objective; any error it returns aborts the computation.
/// - `theta`: expansion point.
///
/// Returns
/// -------
/// A symmetric `k × k` matrix of second derivatives of `f`.
///
/// Errors
/// ------
/// - Errors from `f`.
/// - [`validate_hessian`] failures (non-finite entries).
pub fn compute_hessian<F>(f: &F, theta: &Theta) -> OptResult<Hessian>
where
    F: Fn(&Theta) -> OptResult<f64>,
{
    let k = theta.len();
    let steps: Vec<f64> =
        theta.iter().map(|&x| f64::EPSILON.powf(0.25) * x.abs().max(0.1)).collect();
    let f0 = f(theta)?;
    let mut hess = Array2::<f64>::zeros((k, k));
    let mut point = theta.clone();

    for i in 0..k {
        let hi = steps[i];
        point[i] = theta[i] + hi;
        let f_up = f(&point)?;
        point[i] = theta[i] - hi;
        let f_down = f(&point)?;
        point[i] = theta[i];
        hess[[i, i]] = (f_up - 2.0 * f0 + f_down) / (hi * hi);

        for j in 0..i {
            let hj = steps[j];
            let mut corner = |si: f64, sj: f64| -> OptResult<f64> {
                point[i] = theta[i] + si * hi;
                point[j] = theta[j] + sj * hj;
                let val = f(&point);
                point[i] = theta[i];
                point[j] = theta[j];
                val
            };
            let f_pp = corner(1.0, 1.0)?;
            let f_pm = corner(1.0, -1.0)?;
            let f_mp = corner(-1.0, 1.0)?;
            let f_mm = corner(-1.0, -1.0)?;
            hess[[i, j]] = (f_pp - f_pm - f_mp + f_mm) / (4.0 * hi * hj);
        }
    }
    symmetrize_hess(&mut hess);
    validate_hessian(&hess, k)?;
    Ok(hess)
}

// ---- Helper methods ----

/// Mirror the filled lower triangle into the upper triangle.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            hess[[j, i]] = hess[[i, j]];
        }
    }
}
