//! Residual and conditional-variance recursions plus the likelihood driver.
//!
//! Purpose
//! -------
//! Evaluate the AR(1)-GJR-GARCH(1,1,1)-t log-likelihood for a parameter set
//! using preallocated buffers, so the optimizer's inner loop allocates
//! nothing.
//!
//! Key behaviors
//! -------------
//! - [`compute_residuals`]: `ε_t = r_t − μ − φ·r_{t−1}` for `t = 1..n`; the
//!   first return is used only as a regressor.
//! - [`compute_variance`]: `σ²_0 = ω + (α + γ/2 + β)·v₀` from the pre-sample
//!   variance `v₀`, then
//!   `σ²_t = ω + (α + γ·1[ε_{t−1} < 0])·ε²_{t−1} + β·σ²_{t−1}`, each value
//!   clamped by [`VarianceGuards`].
//! - [`likelihood_driver`]: residuals → variances → Σ ln f(ε_t | σ²_t).
//! - [`loglik_terms`]: the per-observation terms, used for scores.
//!
//! Invariants & assumptions
//! ------------------------
//! - Buffers have length `n_eff = returns.len() − 1`; [`GarchScratch`] is
//!   sized once per sample and is single-owner scratch (`RefCell`).
//! - A NaN variance (from NaN inputs) is reported as
//!   `GarchError::InvalidVariance` instead of propagating.
//!
//! Conventions
//! -----------
//! - Index `t` in this module refers to the residual series.
use crate::volatility::{
    core::{guards::VarianceGuards, innovations::StdStudentT, params::GarchParams},
    errors::{GarchError, GarchResult},
};
use ndarray::{Array1, ArrayView1, ArrayViewMut1, Zip};
use std::cell::RefCell;

/// Reusable residual and variance buffers for likelihood evaluation.
///
/// Holds the two arrays the recursions write on every objective call so the
/// optimizer's hot loop runs allocation-free. Both buffers have length
/// `n_eff = returns.len() − 1`; [`likelihood_driver`] resizes them if it is
/// handed a sample of a different length.
///
/// After a successful [`likelihood_driver`] or [`loglik_terms`] call the
/// buffers hold the residuals and variances at the evaluated parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchScratch {
    /// AR(1) residuals `ε_1..ε_{n−1}`.
    pub resid_buf: RefCell<Array1<f64>>,
    /// Guarded conditional variances σ²_t aligned with `resid_buf`.
    pub sigma2_buf: RefCell<Array1<f64>>,
}

impl GarchScratch {
    /// Zero-initialized buffers for `n_eff` residuals.
    pub fn new(n_eff: usize) -> GarchScratch {
        GarchScratch {
            resid_buf: RefCell::new(Array1::zeros(n_eff)),
            sigma2_buf: RefCell::new(Array1::zeros(n_eff)),
        }
    }

    /// Current buffer length (`n_eff`).
    pub fn len(&self) -> usize {
        self.resid_buf.borrow().len()
    }

    /// `true` when sized for a sample with fewer than two returns.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// AR(1) residuals `out[t−1] = r_t − μ − φ·r_{t−1}`.
///
/// Parameters
/// ----------
/// - `params`: only `μ` and `φ` are read.
/// - `returns`: scaled returns, `len ≥ 2`.
/// - `out`: destination with `out.len() == returns.len() − 1`; ndarray
///   panics on a shape mismatch, so callers size it from the same sample.
pub fn compute_residuals(params: &GarchParams, returns: ArrayView1<f64>, mut out: ArrayViewMut1<f64>) {
    let n = returns.len();
    Zip::from(&mut out)
        .and(returns.slice(ndarray::s![1..n]))
        .and(returns.slice(ndarray::s![0..n - 1]))
        .for_each(|e, &r, &r_prev| *e = r - params.mu - params.phi * r_prev);
}

/// Conditional variances for `resids`, seeded by the pre-sample variance.
///
/// Parameters
/// ----------
/// - `params`: variance coefficients `(ω, α, γ, β)`.
/// - `resids`: residual series from [`compute_residuals`].
/// - `presample`: v₀, the fixed pre-sample variance.
/// - `guards`: clamp applied to every σ²_t, including the first.
/// - `out`: destination, same length as `resids`.
///
/// Returns
/// -------
/// - `Ok(())` with `out[0] = clamp(ω + persistence·v₀)` and the GJR
///   recursion afterwards. An empty `resids` is a no-op.
///
/// Errors
/// ------
/// - `GarchError::InvalidVariance { t, value }` for the first NaN σ²_t.
pub fn compute_variance(
    params: &GarchParams, resids: ArrayView1<f64>, presample: f64, guards: &VarianceGuards,
    mut out: ArrayViewMut1<f64>,
) -> GarchResult<()> {
    if resids.is_empty() {
        return Ok(());
    }
    let mut sigma2 = guards.clamp(params.omega + params.persistence() * presample);
    if sigma2.is_nan() {
        return Err(GarchError::InvalidVariance { t: 0, value: sigma2 });
    }
    out[0] = sigma2;
    for t in 1..resids.len() {
        sigma2 = guards.clamp(params.next_variance(resids[t - 1], sigma2));
        if sigma2.is_nan() {
            return Err(GarchError::InvalidVariance { t, value: sigma2 });
        }
        out[t] = sigma2;
    }
    Ok(())
}

/// Total log-likelihood of `returns` under `params`.
///
/// Fills `scratch` with residuals and variances as a side effect; callers
/// may read them back (e.g. for the terminal state) after a successful call.
///
/// Parameters
/// ----------
/// - `params`: model-space coefficients; not re-validated here.
/// - `returns`: the full return sample; the first value only conditions.
/// - `presample`: fixed σ²₀ input for the variance recursion.
/// - `guards`: σ² clamps.
/// - `scratch`: buffers borrowed mutably for the duration of the call.
///
/// Returns
/// -------
/// - `Σ_t ln f(ε_t | σ²_t, ν)` over `n_eff` terms, where `f` is the
///   standardized Student-t density scaled by σ_t.
///
/// Errors
/// ------
/// - `GarchError::InsufficientData` when `returns` is shorter than 2.
/// - Variance recursion errors.
pub fn likelihood_driver(
    params: &GarchParams, returns: ArrayView1<f64>, presample: f64, guards: &VarianceGuards,
    scratch: &GarchScratch,
) -> GarchResult<f64> {
    fill_scratch(params, returns, presample, guards, scratch)?;
    let innov = StdStudentT::new_unchecked(params.nu);
    let resids = scratch.resid_buf.borrow();
    let sigma2 = scratch.sigma2_buf.borrow();
    Ok(Zip::from(&*resids)
        .and(&*sigma2)
        .fold(0.0, |acc, &e, &s2| acc + innov.log_density(e, s2)))
}

/// Per-observation log-likelihood terms, written into `out`.
///
/// `out` must have length `returns.len() − 1`; entry `t` is the term for
/// residual `t`. Summing `out` reproduces [`likelihood_driver`] up to
/// rounding.
///
/// # Errors
/// As [`likelihood_driver`].
pub fn loglik_terms(
    params: &GarchParams, returns: ArrayView1<f64>, presample: f64, guards: &VarianceGuards,
    scratch: &GarchScratch, mut out: ArrayViewMut1<f64>,
) -> GarchResult<()> {
    fill_scratch(params, returns, presample, guards, scratch)?;
    let innov = StdStudentT::new_unchecked(params.nu);
    let resids = scratch.resid_buf.borrow();
    let sigma2 = scratch.sigma2_buf.borrow();
    Zip::from(&mut out)
        .and(&*resids)
        .and(&*sigma2)
        .for_each(|l, &e, &s2| *l = innov.log_density(e, s2));
    Ok(())
}

/// Resize `scratch` if needed and run both recursions into it.
fn fill_scratch(
    params: &GarchParams, returns: ArrayView1<f64>, presample: f64, guards: &VarianceGuards,
    scratch: &GarchScratch,
) -> GarchResult<()> {
    if returns.len() < 2 {
        return Err(GarchError::InsufficientData { len: returns.len(), required: 2 });
    }
    let n_eff = returns.len() - 1;
    if scratch.len() != n_eff {
        scratch.resid_buf.replace(Array1::zeros(n_eff));
        scratch.sigma2_buf.replace(Array1::zeros(n_eff));
    }
    let mut resids = scratch.resid_buf.borrow_mut();
    let mut sigma2 = scratch.sigma2_buf.borrow_mut();
    compute_residuals(params, returns, resids.view_mut());
    compute_variance(params, resids.view(), presample, guards, sigma2.view_mut())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Residual and variance recursions against hand-computed values.
    // - Guard clamping and NaN reporting.
    // - Agreement between the total and the per-observation terms.
    //
    // They intentionally DO NOT cover:
    // - Optimization (see `volatility::models`).
    // -------------------------------------------------------------------------

    fn params() -> GarchParams {
        GarchParams::new(0.1, 0.2, 0.05, 0.05, 0.1, 0.8, 6.0).expect("valid")
    }

    #[test]
    // Purpose
    // -------
    // Residuals and variances follow the recursions step by step.
    //
    // Given
    // -----
    // - Returns [1.0, −0.5, 0.3], v₀ = 1.
    //
    // Expect
    // ------
    // - ε = [−0.5 − 0.1 − 0.2, 0.3 − 0.1 + 0.1] = [−0.8, 0.3].
    // - σ²_0 = 0.05 + 0.9·1; σ²_1 = 0.05 + 0.15·0.64 + 0.8·σ²_0.
    fn recursions_match_hand_computation() {
        // Arrange
        let p = params();
        let returns = array![1.0, -0.5, 0.3];
        let mut resids = Array1::zeros(2);
        let mut sigma2 = Array1::zeros(2);

        // Act
        compute_residuals(&p, returns.view(), resids.view_mut());
        compute_variance(&p, resids.view(), 1.0, &VarianceGuards::default(), sigma2.view_mut())
            .expect("variance");

        // Assert
        assert_relative_eq!(resids[0], -0.8, epsilon = 1e-12);
        assert_relative_eq!(resids[1], 0.3, epsilon = 1e-12);
        let s0 = 0.05 + 0.9;
        assert_relative_eq!(sigma2[0], s0, epsilon = 1e-12);
        assert_relative_eq!(sigma2[1], 0.05 + 0.15 * 0.64 + 0.8 * s0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Guards clamp and NaN inputs are reported.
    //
    // Given
    // -----
    // - Guards (1.0, 2.0) with a huge pre-sample variance; a NaN residual.
    //
    // Expect
    // ------
    // - σ²_0 = 2.0; the NaN produces `InvalidVariance { t: 1 }`.
    fn guards_clamp_and_nan_is_reported() {
        let p = params();
        let guards = VarianceGuards::new((1.0, 2.0)).expect("guards");
        let mut sigma2 = Array1::zeros(2);

        compute_variance(&p, array![0.1, 0.1].view(), 1e6, &guards, sigma2.view_mut())
            .expect("variance");
        let err = compute_variance(&p, array![f64::NAN, 0.1].view(), 1.0, &guards, sigma2.view_mut());

        assert_eq!(sigma2[0], 2.0);
        assert!(matches!(err, Err(GarchError::InvalidVariance { t: 1, .. })));
    }

    #[test]
    // Purpose
    // -------
    // The driver's total equals the sum of the per-observation terms, and
    // scratch buffers resize to new samples.
    //
    // Given
    // -----
    // - A short return series evaluated with a scratch sized for a different n.
    //
    // Expect
    // ------
    // - Total = Σ terms; scratch length n − 1.
    fn driver_total_equals_sum_of_terms() {
        // Arrange
        let p = params();
        let returns = array![0.5, -1.2, 0.3, 2.0, -0.7, 0.1];
        let scratch = GarchScratch::new(2);
        let guards = VarianceGuards::default();
        let mut terms = Array1::zeros(5);

        // Act
        let total = likelihood_driver(&p, returns.view(), 1.0, &guards, &scratch).expect("total");
        loglik_terms(&p, returns.view(), 1.0, &guards, &scratch, terms.view_mut()).expect("terms");

        // Assert
        assert_eq!(scratch.len(), 5);
        assert_relative_eq!(total, terms.sum(), epsilon = 1e-12);
        assert!(total.is_finite());
    }
}
