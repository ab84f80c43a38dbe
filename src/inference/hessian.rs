//! inference::hessian — observed-information and sandwich standard errors.
//!
//! Purpose
//! -------
//! Turn a fitted likelihood into parameter standard errors. The observed
//! information `J(θ̂)` is the finite-difference Hessian of the negative
//! average log-likelihood; classical SEs come from `J⁺`, robust (sandwich)
//! SEs from `J⁺ S J⁺` with `S` the average-score covariance.
//!
//! Key behaviors
//! -------------
//! - [`calc_standard_errors`] builds `J(θ̂)` via
//!   [`compute_hessian`](crate::optimization::loglik_optimizer::finite_diff::compute_hessian),
//!   copies it into a `nalgebra::DMatrix`, and solves with a symmetric
//!   eigendecomposition.
//! - [`avg_scores_cov`] forms the IID outer-product-of-gradients estimate
//!   `S = (1/n) Σ s_t s_tᵀ` from per-observation scores.
//!
//! Invariants & assumptions
//! ------------------------
//! - Everything is on the **average** log-likelihood scale. Divide the
//!   returned SEs by `√n` for the sampling standard errors of θ̂.
//! - Eigenvalues `≤ EIGEN_EPS` are dropped (Moore–Penrose pseudoinverse),
//!   so weakly identified directions contribute nothing rather than blowing
//!   up; no explicit inverse is formed.
//!
//! Downstream usage
//! ----------------
//! - `volatility::models::summary` calls both functions at the model-space
//!   estimate to fill the diagnostic table.
//!
//! Testing notes
//! -------------
//! - Quadratic objectives with known information matrices; robust SEs
//!   with inflated score covariance; OPG on a tiny score matrix.
use crate::{
    inference::errors::{InferenceError, InferenceResult},
    optimization::{
        errors::OptResult,
        loglik_optimizer::{finite_diff::compute_hessian, Theta},
        numerical_stability::transformations::EIGEN_EPS,
    },
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Standard errors at `theta_hat` on the average log-likelihood scale.
///
/// Parameters
/// ----------
/// - `f`: negative average log-likelihood as a function of the parameters.
/// - `theta_hat`: expansion point (the estimate).
/// - `scores_cov`: `Some(S)` for sandwich SEs, `None` for classical.
///
/// Errors
/// ------
/// - [`InferenceError::Hessian`] when the Hessian cannot be formed.
/// - [`InferenceError::ScoreDimMismatch`] when `S` is not `k × k`.
pub fn calc_standard_errors<F>(
    f: &F, theta_hat: &Theta, scores_cov: Option<&Array2<f64>>,
) -> InferenceResult<Array1<f64>>
where
    F: Fn(&Theta) -> OptResult<f64>,
{
    let k = theta_hat.len();
    let obs_info = compute_hessian(f, theta_hat)?;
    let obs_info_nalg = to_dmatrix(&obs_info);
    match scores_cov {
        Some(s) => {
            if s.nrows() != k || s.ncols() != k {
                return Err(InferenceError::ScoreDimMismatch { expected: k, found: s.ncols() });
            }
            Ok(solve_for_se_robust(obs_info_nalg, s, k))
        }
        None => Ok(solve_for_se(obs_info_nalg, k)),
    }
}

/// IID outer-product-of-gradients covariance of the average score.
///
/// `scores` is `n × k`, one row per observation.
///
/// # Errors
/// - [`InferenceError::EmptyScores`] for `n == 0`.
/// - [`InferenceError::NonFiniteScore`] for any NaN/±inf entry.
pub fn avg_scores_cov(scores: &Array2<f64>) -> InferenceResult<Array2<f64>> {
    let n = scores.nrows();
    if n == 0 {
        return Err(InferenceError::EmptyScores);
    }
    if let Some(((row, col), &value)) = scores.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(InferenceError::NonFiniteScore { row, col, value });
    }
    Ok(scores.t().dot(scores) / n as f64)
}

// ---- Helper methods ----

/// Copy an ndarray matrix into nalgebra for the eigendecomposition.
fn to_dmatrix(obs_info: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(obs_info.nrows(), obs_info.ncols(), |i, j| obs_info[[i, j]])
}

/// Classical SEs: `sqrt(diag(J⁺))` with `J⁺` the eigenvalue-floored
/// pseudoinverse of the observed information.
fn solve_for_se(obs_info_nalg: DMatrix<f64>, k: usize) -> Array1<f64> {
    let eigen = obs_info_nalg.symmetric_eigen();
    let q = eigen.eigenvectors;
    Array1::from_iter((0..k).map(|i| {
        eigen
            .eigenvalues
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGEN_EPS)
            .map(|(m, &lambda)| q[(i, m)] * q[(i, m)] / lambda)
            .sum::<f64>()
            .sqrt()
    }))
}

/// Sandwich SEs: `sqrt(diag(J⁺ S J⁺))`, one row of `J⁺` at a time.
///
/// Negative diagonal terms from rounding are clamped to zero.
fn solve_for_se_robust(obs_info_nalg: DMatrix<f64>, scores_cov: &Array2<f64>, k: usize) -> Array1<f64> {
    let eigen = obs_info_nalg.symmetric_eigen();
    let q = eigen.eigenvectors;
    let mut se = Array1::<f64>::zeros(k);
    for i in 0..k {
        // Row i of J⁺.
        let mut w_i = Array1::<f64>::zeros(k);
        for (m, &lambda) in eigen.eigenvalues.iter().enumerate() {
            if lambda > EIGEN_EPS {
                let coeff = q[(i, m)] / lambda;
                for j in 0..k {
                    w_i[j] += coeff * q[(j, m)];
                }
            }
        }
        se[i] = w_i.dot(&scores_cov.dot(&w_i)).max(0.0).sqrt();
    }
    se
}
