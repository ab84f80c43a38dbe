//! Diagnostic summary of a GJR-GARCH-t fit.
//!
//! [`FitSummary`] is the coefficient table users read after estimation:
//! estimates, standard errors, t-statistics and two-sided normal p-values
//! per parameter, plus the total log-likelihood, AIC, BIC and the
//! optimizer's status. Standard errors come from
//! [`calc_standard_errors`] on the model-space negative average
//! log-likelihood; the robust flavor adds the outer product of
//! per-observation scores. If inference fails (e.g. a singular Hessian) the
//! fit is still returned with NaN standard errors and a `warn!` event.
use crate::{
    inference::hessian::{avg_scores_cov, calc_standard_errors},
    optimization::loglik_optimizer::OptimOutcome,
    volatility::{
        core::{
            data::ReturnSeries,
            options::StdErrKind,
            params::{GarchParams, PARAM_NAMES},
            validation::N_PARAMS,
        },
        errors::GarchResult,
        models::{
            gjr_garch::GjrGarchModel,
            model_internals::{calculate_scores, n_eff, neg_avg_loglik},
        },
    },
};
use ndarray::Array1;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt;
use tracing::warn;

/// One row of the coefficient table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoefRow {
    /// Parameter name from `PARAM_NAMES`.
    pub name: &'static str,
    /// Model-space point estimate.
    pub estimate: f64,
    /// Standard error of the estimate; NaN when inference failed.
    pub std_err: f64,
    /// `estimate / std_err`.
    pub t_stat: f64,
    /// Two-sided p-value of `t_stat` under N(0, 1).
    pub p_value: f64,
}

/// Coefficient table and fit statistics.
///
/// Fields
/// ------
/// - `rows`: one [`CoefRow`] per parameter in `[μ, φ, ω, α, γ, β, ν]` order.
/// - `loglik`: total (not average) log-likelihood at the estimate.
/// - `aic`, `bic`: `2k − 2ℓ` and `k·ln n − 2ℓ` with `k = 7`, `n = n_obs`.
/// - `n_obs`: number of likelihood terms (`returns − 1`).
/// - `std_err_kind`: classical or robust (sandwich) errors.
/// - `converged`, `status`, `iterations`: copied from the optimizer outcome.
///
/// `Display` renders a fixed-width table suitable for logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitSummary {
    pub rows: Vec<CoefRow>,
    /// Total log-likelihood.
    pub loglik: f64,
    pub aic: f64,
    pub bic: f64,
    /// Number of likelihood terms.
    pub n_obs: usize,
    pub std_err_kind: StdErrKind,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
}

impl FitSummary {
    /// Build the summary at the fitted parameters.
    ///
    /// Parameters
    /// ----------
    /// - `model`: the fitted model; its options select the error kind and
    ///   its scratch buffers are reused for the Hessian and scores.
    /// - `data`: the estimation sample.
    /// - `params`: model-space estimate.
    /// - `loglik`: total log-likelihood at `params`.
    /// - `outcome`: optimizer outcome, for status and iteration count.
    ///
    /// Returns
    /// -------
    /// - A complete summary. Inference failures never propagate: they are
    ///   logged with `warn!` and leave NaN in `std_err`, `t_stat` and
    ///   `p_value`.
    pub fn from_fit(
        model: &GjrGarchModel, data: &ReturnSeries, params: &GarchParams, loglik: f64,
        outcome: &OptimOutcome,
    ) -> FitSummary {
        let n = n_eff(data);
        let kind = model.options.std_errors;
        let std_errs = match standard_errors(model, data, params, kind) {
            Ok(se) => se,
            Err(e) => {
                warn!(error = %e, "standard errors unavailable");
                Array1::from_elem(N_PARAMS, f64::NAN)
            }
        };

        let rows = PARAM_NAMES
            .iter()
            .zip(params.to_array().iter())
            .zip(std_errs.iter())
            .map(|((&name, &estimate), &std_err)| {
                let t_stat = estimate / std_err;
                CoefRow { name, estimate, std_err, t_stat, p_value: two_sided_p(t_stat) }
            })
            .collect();

        let k = N_PARAMS as f64;
        FitSummary {
            rows,
            loglik,
            aic: 2.0 * k - 2.0 * loglik,
            bic: k * (n as f64).ln() - 2.0 * loglik,
            n_obs: n,
            std_err_kind: kind,
            converged: outcome.converged,
            status: outcome.status.clone(),
            iterations: outcome.iterations,
        }
    }
}

impl fmt::Display for FitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AR(1)-GJR-GARCH(1,1,1) with standardized Student-t innovations")?;
        writeln!(
            f,
            "n = {}   log-lik = {:.4}   AIC = {:.4}   BIC = {:.4}",
            self.n_obs, self.loglik, self.aic, self.bic
        )?;
        writeln!(
            f,
            "optimizer: {} after {} iterations (std. errors: {:?})",
            self.status, self.iterations, self.std_err_kind
        )?;
        writeln!(f, "{:<8}{:>12}{:>12}{:>10}{:>10}", "param", "estimate", "std.err", "t", "p")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<8}{:>12.6}{:>12.6}{:>10.3}{:>10.4}",
                row.name, row.estimate, row.std_err, row.t_stat, row.p_value
            )?;
        }
        Ok(())
    }
}

// ---- Helper methods ----

/// Sampling standard errors of the model-space estimate.
///
/// The Hessian is of the *average* negative log-likelihood, so the
/// covariance from [`calc_standard_errors`] is per observation; dividing by
/// `sqrt(n_eff)` gives the sampling errors.
fn standard_errors(
    model: &GjrGarchModel, data: &ReturnSeries, params: &GarchParams, kind: StdErrKind,
) -> GarchResult<Array1<f64>> {
    let objective = neg_avg_loglik(model, data);
    let theta_hat = params.to_array();
    let se = match kind {
        StdErrKind::Classical => calc_standard_errors(&objective, &theta_hat, None)?,
        StdErrKind::Robust => {
            let scores = calculate_scores(model, data, params)?;
            let cov = avg_scores_cov(&scores)?;
            calc_standard_errors(&objective, &theta_hat, Some(&cov))?
        }
    };
    Ok(se / (n_eff(data) as f64).sqrt())
}

/// `2·(1 − Φ(|t|))`; NaN for a non-finite statistic.
fn two_sided_p(t: f64) -> f64 {
    if !t.is_finite() {
        return f64::NAN;
    }
    match Normal::new(0.0, 1.0) {
        Ok(normal) => 2.0 * (1.0 - normal.cdf(t.abs())),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::{core::options::GarchOptions, models::gjr_garch::tests::garch_returns};
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Normal p-values at known points.
    // - Classical and robust standard errors at the generating parameters: finite,
    //   positive, and of the same order.
    // - The rendered table.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Two-sided p-values match the standard normal.
    //
    // Given
    // -----
    // - t = 0, 1.959964, NaN.
    //
    // Expect
    // ------
    // - 1, ≈ 0.05, NaN.
    fn two_sided_p_known_points() {
        assert_relative_eq!(two_sided_p(0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(two_sided_p(1.959964), 0.05, epsilon = 1e-6);
        assert!(two_sided_p(f64::NAN).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Both standard-error flavors are usable near a sensible point.
    //
    // Given
    // -----
    // - 2 000 simulated returns at the data-generating parameters.
    //
    // Expect
    // ------
    // - Finite, positive SEs; robust/classical ratio within (0.2, 5).
    fn classical_and_robust_errors_are_finite() {
        // Arrange
        let data = garch_returns(2000, 31);
        let model = GjrGarchModel::new(GarchOptions::default(), &data).expect("model");
        let params = crate::volatility::models::gjr_garch::tests::dgp();

        // Act
        let classical =
            standard_errors(&model, &data, &params, StdErrKind::Classical).expect("classical");
        let robust =
            standard_errors(&model, &data, &params, StdErrKind::Robust).expect("robust");

        // Assert
        for (c, r) in classical.iter().zip(robust.iter()) {
            assert!(c.is_finite() && *c > 0.0);
            assert!(r.is_finite() && *r > 0.0);
            assert!(r / c > 0.2 && r / c < 5.0, "classical {c}, robust {r}");
        }
    }

    #[test]
    // Purpose
    // -------
    // The rendered table lists every parameter and the fit statistics.
    //
    // Given
    // -----
    // - A hand-built summary.
    //
    // Expect
    // ------
    // - Header, one line per row, AIC present.
    fn display_renders_table() {
        let summary = FitSummary {
            rows: vec![CoefRow { name: "mu", estimate: 0.05, std_err: 0.01, t_stat: 5.0, p_value: 0.0 }],
            loglik: -100.0,
            aic: 214.0,
            bic: 220.0,
            n_obs: 99,
            std_err_kind: StdErrKind::Robust,
            converged: true,
            status: "SolverConverged".to_string(),
            iterations: 12,
        };

        let text = summary.to_string();

        assert!(text.contains("GJR-GARCH"));
        assert!(text.contains("mu"));
        assert!(text.contains("AIC = 214.0000"));
        assert!(text.contains("SolverConverged after 12 iterations"));
    }
}
