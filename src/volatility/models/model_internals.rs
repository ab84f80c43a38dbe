//! GJR-GARCH model internals: sample bookkeeping, model-space objectives,
//! per-observation scores and the terminal state.
//!
//! Purpose
//! -------
//! Keep the post-estimation plumbing out of the model type. Everything here
//! works in **model space** `[μ, φ, ω, α, γ, β, ν]` at a fixed pre-sample
//! variance, so inference is reported for the parameters users read, not
//! for the unconstrained optimizer coordinates.
//!
//! Key behaviors
//! -------------
//! - [`n_eff`]: number of likelihood terms (`returns.len() − 1`).
//! - [`neg_avg_loglik`]: closure `x ↦ −ℓ(x)/n_eff` for the Hessian.
//! - [`calculate_scores`]: `n_eff × 7` matrix of per-observation scores by
//!   central differences of [`loglik_terms`].
//! - [`terminal_state`]: total log-likelihood plus the last return, residual
//!   and variance after a pass at the fitted parameters.
//!
//! Invariants & assumptions
//! ------------------------
//! - Perturbed parameter vectors are not re-validated: a step across a
//!   boundary (e.g. γ = 0) is harmless for the recursions and guards keep
//!   σ² positive.
//! - All helpers borrow the model's scratch buffers; no two may run at the
//!   same time on one model.
use crate::{
    inference::errors::InferenceError,
    optimization::{errors::OptResult, loglik_optimizer::Theta},
    volatility::{
        core::{
            data::ReturnSeries,
            params::GarchParams,
            simulation::TerminalState,
            validation::N_PARAMS,
            variance::{likelihood_driver, loglik_terms},
        },
        errors::GarchResult,
        models::gjr_garch::GjrGarchModel,
    },
};
use ndarray::{Array1, Array2};

/// Number of observations entering the likelihood.
pub fn n_eff(data: &ReturnSeries) -> usize {
    data.len().saturating_sub(1)
}

/// Negative average log-likelihood as a function of a model-space vector.
pub fn neg_avg_loglik<'a>(
    model: &'a GjrGarchModel, data: &'a ReturnSeries,
) -> impl Fn(&Theta) -> OptResult<f64> + 'a {
    let n = n_eff(data) as f64;
    move |x: &Theta| {
        let params = GarchParams::from_model_vec(x.view())?;
        let total = likelihood_driver(
            &params,
            data.data.view(),
            model.presample(),
            &model.options.guards,
            &model.scratch_bufs,
        )?;
        Ok(-total / n)
    }
}

/// Per-observation scores `∂ℓ_t/∂x_j` at `params`, one row per term.
///
/// Parameters
/// ----------
/// - `model`: supplies the presample variance, guards and scratch buffers.
/// - `data`: the return series the model was built on.
/// - `params`: evaluation point, usually the estimate.
///
/// Returns
/// -------
/// - An `n_eff × 7` matrix; row `t` holds the central-difference gradient
///   of the log-likelihood contribution of return `t + 1`, step
///   `cbrt(ε)·max(|x_j|, 0.1)`.
///
/// Errors
/// ------
/// - Recursion errors from [`loglik_terms`] at a perturbed point.
/// - `GarchError::Inference(InferenceError::NonFiniteScore)` if any entry is
///   NaN/±inf.
pub fn calculate_scores(
    model: &GjrGarchModel, data: &ReturnSeries, params: &GarchParams,
) -> GarchResult<Array2<f64>> {
    let n = n_eff(data);
    let base = params.to_array();
    let mut scores = Array2::<f64>::zeros((n, N_PARAMS));
    let mut up = Array1::<f64>::zeros(n);
    let mut down = Array1::<f64>::zeros(n);
    let mut point = base.clone();

    for j in 0..N_PARAMS {
        let h = f64::EPSILON.cbrt() * base[j].abs().max(0.1);
        point[j] = base[j] + h;
        eval_terms(model, data, &point, &mut up)?;
        point[j] = base[j] - h;
        eval_terms(model, data, &point, &mut down)?;
        point[j] = base[j];

        let mut col = scores.column_mut(j);
        col.assign(&((&up - &down) / (2.0 * h)));
    }
    check_scores(&scores)?;
    Ok(scores)
}

/// Total log-likelihood and terminal state at `params`.
///
/// # Errors
/// Recursion errors from [`likelihood_driver`].
pub fn terminal_state(
    model: &GjrGarchModel, data: &ReturnSeries, params: &GarchParams,
) -> GarchResult<(f64, TerminalState)> {
    let loglik = likelihood_driver(
        params,
        data.data.view(),
        model.presample(),
        &model.options.guards,
        &model.scratch_bufs,
    )?;
    let resids = model.scratch_bufs.resid_buf.borrow();
    let sigma2 = model.scratch_bufs.sigma2_buf.borrow();
    let last = resids.len() - 1;
    let terminal = TerminalState {
        last_return: data.data[data.len() - 1],
        last_resid: resids[last],
        last_sigma2: sigma2[last],
    };
    Ok((loglik, terminal))
}

// ---- Helper methods ----

/// First non-finite score entry, reported with its row and column.
fn check_scores(scores: &Array2<f64>) -> GarchResult<()> {
    match scores.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => {
            Err(InferenceError::NonFiniteScore { row, col, value }.into())
        }
        None => Ok(()),
    }
}

fn eval_terms(
    model: &GjrGarchModel, data: &ReturnSeries, point: &Array1<f64>, out: &mut Array1<f64>,
) -> GarchResult<()> {
    let params = GarchParams::from_model_vec(point.view())?;
    loglik_terms(
        &params,
        data.data.view(),
        model.presample(),
        &model.options.guards,
        &model.scratch_bufs,
        out.view_mut(),
    )
}
