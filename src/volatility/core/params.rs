//! GJR-GARCH-t parameters and their unconstrained θ representation.
//!
//! Purpose
//! -------
//! Hold the model-space coefficients `(μ, φ, ω, α, γ, β, ν)` and map them to
//! and from the optimizer's unconstrained vector θ ∈ ℝ⁷.
//!
//! Key behaviors
//! -------------
//! - [`GarchParams::from_theta`] maps any finite θ to an admissible,
//!   stationary parameter set:
//!   - `μ = θ₀`,
//!   - `φ = (1 − margin)·tanh(θ₁)`,
//!   - `ω = softplus(θ₂)`,
//!   - `(α/2, (α+γ)/2, β, slack) = (1 − margin)·softmax(θ₃, θ₄, θ₅, 0)`,
//!   - `ν = NU_MIN + (NU_MAX − NU_MIN)·logistic(θ₆)`.
//! - [`GarchParams::to_theta`] inverts the map for starting values.
//! - [`GarchParams::from_model_vec`] wraps a raw model-space vector without
//!   range checks; it is the evaluation point for finite-difference
//!   inference, where small perturbations may leave the admissible set.
//!
//! Invariants & assumptions
//! ------------------------
//! - Through the softmax, `α + γ/2 + β = (1 − margin) − slack` with
//!   `slack > 0`, so every θ is stationary; `α ≥ 0` and `α + γ ≥ 0` hold
//!   automatically.
//!
//! Conventions
//! -----------
//! - Vector layout everywhere (θ, model vectors, standard errors, summary
//!   rows) is `[μ, φ, ω, α, γ, β, ν]`, named by [`PARAM_NAMES`].
use crate::{
    optimization::{
        loglik_optimizer::Theta,
        numerical_stability::transformations::{
            safe_logistic, safe_logit, safe_softmax, safe_softmax_inv, safe_softplus,
            safe_softplus_inv, STATIONARITY_MARGIN,
        },
    },
    volatility::{
        core::validation::{
            validate_alpha, validate_ar, validate_beta, validate_leverage, validate_mu,
            validate_nu, validate_omega, validate_stationarity, validate_theta, N_PARAMS, NU_MAX,
            NU_MIN,
        },
        errors::ParamResult,
    },
};
use ndarray::{Array1, ArrayView1};

/// Display names, in vector order.
pub const PARAM_NAMES: [&str; N_PARAMS] = ["mu", "phi", "omega", "alpha", "gamma", "beta", "nu"];

/// Model-space coefficients of the AR(1)-GJR-GARCH(1,1,1)-t model.
///
/// The model for scaled returns is
///
/// ```text
/// r_t  = μ + φ·r_{t−1} + ε_t,          ε_t = σ_t·z_t,
/// σ²_t = ω + (α + γ·1[ε_{t−1} < 0])·ε²_{t−1} + β·σ²_{t−1},
/// z_t  ~ standardized Student-t(ν)  (unit variance).
/// ```
///
/// Values built through [`GarchParams::new`] or [`GarchParams::from_theta`]
/// are admissible; [`GarchParams::from_model_vec`] is the one unchecked
/// entry point. See [`GarchParams::to_theta`] for the optimizer-space map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarchParams {
    /// Mean intercept.
    pub mu: f64,
    /// AR(1) coefficient on the previous return.
    pub phi: f64,
    /// Variance intercept.
    pub omega: f64,
    /// ARCH coefficient on ε²_{t−1}.
    pub alpha: f64,
    /// Additional ARCH coefficient applied when ε_{t−1} < 0.
    pub gamma: f64,
    /// GARCH coefficient on σ²_{t−1}.
    pub beta: f64,
    /// Student-t degrees of freedom.
    pub nu: f64,
}

impl GarchParams {
    /// Build validated parameters.
    ///
    /// Validates:
    /// - `μ` finite and `|φ| < 1`
    /// - `ω > 0`, `α ≥ 0`, `α + γ ≥ 0`, `β ≥ 0`
    /// - `NU_MIN ≤ ν ≤ NU_MAX`
    /// - `α + γ/2 + β < 1 − margin`
    ///
    /// # Errors
    /// The first violated range (`InvalidMu`, `InvalidAr`, `InvalidOmega`,
    /// `InvalidAlpha`, `InvalidLeverage`, `InvalidBeta`,
    /// `InvalidDegreesOfFreedom`, `StationarityViolated`).
    pub fn new(
        mu: f64, phi: f64, omega: f64, alpha: f64, gamma: f64, beta: f64, nu: f64,
    ) -> ParamResult<Self> {
        let params = GarchParams { mu, phi, omega, alpha, gamma, beta, nu };
        params.validate()?;
        Ok(params)
    }

    /// Check every admissibility condition, in the order listed on
    /// [`GarchParams::new`].
    pub fn validate(&self) -> ParamResult<()> {
        validate_mu(self.mu)?;
        validate_ar(self.phi)?;
        validate_omega(self.omega)?;
        validate_alpha(self.alpha)?;
        validate_leverage(self.alpha, self.gamma)?;
        validate_beta(self.beta)?;
        validate_nu(self.nu)?;
        validate_stationarity(self.persistence())
    }

    /// Map an unconstrained θ to model space.
    ///
    /// ### Inputs
    /// - `theta`: optimizer-space vector `[θ₀, …, θ₆]`, any finite values.
    ///
    /// ### Behavior
    /// 1. `μ = θ₀` and `φ = (1 − margin)·tanh(θ₁)`.
    /// 2. `ω = softplus(θ₂)`.
    /// 3. A max-shifted softmax of `(θ₃, θ₄, θ₅, 0)` scaled to total mass
    ///    `1 − margin` yields `(α/2, (α+γ)/2, β, slack)`; α and γ are read
    ///    back from the first two weights.
    /// 4. `ν = NU_MIN + (NU_MAX − NU_MIN)·logistic(θ₆)`.
    ///
    /// ### Returns
    /// Parameters that satisfy every [`GarchParams::validate`] condition up to
    /// floating-point saturation of the transforms.
    ///
    /// # Errors
    /// `ThetaLengthMismatch` / `InvalidThetaInput` from
    /// [`validate_theta`]; the mapping itself cannot fail.
    pub fn from_theta(theta: ArrayView1<f64>) -> ParamResult<Self> {
        validate_theta(theta)?;
        let total = 1.0 - STATIONARITY_MARGIN;
        let ([half_alpha, half_neg, beta], _slack) =
            safe_softmax([theta[3], theta[4], theta[5]], total);
        let alpha = 2.0 * half_alpha;
        Ok(GarchParams {
            mu: theta[0],
            phi: total * theta[1].tanh(),
            omega: safe_softplus(theta[2]),
            alpha,
            gamma: 2.0 * half_neg - alpha,
            beta,
            nu: NU_MIN + (NU_MAX - NU_MIN) * safe_logistic(theta[6]),
        })
    }

    /// Pull validated parameters back to θ.
    ///
    /// Inverse of [`GarchParams::from_theta`]: `atanh`, `softplus⁻¹`, the
    /// log-ratio inverse of the softmax relative to the slack weight, and a
    /// logit for ν. φ is clipped a hair inside `±(1 − margin)` so `atanh`
    /// stays finite.
    ///
    /// # Errors
    /// Any [`GarchParams::validate`] failure.
    pub fn to_theta(&self) -> ParamResult<Theta> {
        self.validate()?;
        let total = 1.0 - STATIONARITY_MARGIN;
        let weights = [0.5 * self.alpha, 0.5 * (self.alpha + self.gamma), self.beta];
        let slack = total - weights.iter().sum::<f64>();
        let [t_alpha, t_neg, t_beta] = safe_softmax_inv(weights, slack);
        let ratio = (self.phi / total).clamp(-1.0 + 1e-12, 1.0 - 1e-12);
        Ok(Array1::from_vec(vec![
            self.mu,
            ratio.atanh(),
            safe_softplus_inv(self.omega),
            t_alpha,
            t_neg,
            t_beta,
            safe_logit((self.nu - NU_MIN) / (NU_MAX - NU_MIN)),
        ]))
    }

    /// Wrap a model-space vector `[μ, φ, ω, α, γ, β, ν]` without range
    /// checks beyond length and finiteness.
    ///
    /// Used by the finite-difference Hessian and score routines, whose
    /// perturbed points may step just outside the admissible set (e.g.
    /// `γ < 0` at a boundary estimate).
    ///
    /// # Errors
    /// `ThetaLengthMismatch` / `InvalidThetaInput` from [`validate_theta`].
    pub fn from_model_vec(values: ArrayView1<f64>) -> ParamResult<Self> {
        validate_theta(values)?;
        Ok(GarchParams {
            mu: values[0],
            phi: values[1],
            omega: values[2],
            alpha: values[3],
            gamma: values[4],
            beta: values[5],
            nu: values[6],
        })
    }

    /// Model-space vector in [`PARAM_NAMES`] order.
    pub fn to_array(&self) -> Array1<f64> {
        Array1::from_vec(vec![
            self.mu, self.phi, self.omega, self.alpha, self.gamma, self.beta, self.nu,
        ])
    }

    /// Variance persistence `α + γ/2 + β`.
    ///
    /// The `γ/2` weight is `P(z < 0)` for the symmetric t innovations.
    pub fn persistence(&self) -> f64 {
        self.alpha + 0.5 * self.gamma + self.beta
    }

    /// Unconditional variance `ω / (1 − persistence)`; the cold-start level
    /// for simulated paths.
    pub fn uncond_variance(&self) -> f64 {
        self.omega / (1.0 - self.persistence())
    }

    /// Unconditional mean `μ / (1 − φ)`.
    pub fn uncond_mean(&self) -> f64 {
        self.mu / (1.0 - self.phi)
    }

    /// One step of the variance recursion:
    /// `ω + (α + γ·1[ε < 0])·ε² + β·σ²`.
    #[inline]
    pub fn next_variance(&self, eps_prev: f64, sigma2_prev: f64) -> f64 {
        let arch = if eps_prev < 0.0 { self.alpha + self.gamma } else { self.alpha };
        self.omega + arch * eps_prev * eps_prev + self.beta * sigma2_prev
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::errors::ParamError;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Admissibility of `from_theta` for extreme θ.
    // - Round trip `to_theta` → `from_theta`.
    // - Derived quantities and the one-step variance update.
    //
    // They intentionally DO NOT cover:
    // - Likelihood evaluation (see `variance`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Every finite θ maps to admissible, stationary parameters.
    //
    // Given
    // -----
    // - θ = 0, θ with large positive entries, θ with large negative entries.
    //
    // Expect
    // ------
    // - `validate` succeeds for the moderate and negative cases; persistence
    //   stays below 1 in all three.
    fn from_theta_is_always_admissible() {
        let cases = [
            array![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            array![1.0, 5.0, 5.0, 30.0, 30.0, 30.0, 30.0],
            array![-1.0, -5.0, -5.0, -30.0, -30.0, -30.0, -8.0],
        ];
        for theta in cases.iter() {
            let params = GarchParams::from_theta(theta.view()).expect("mapping succeeds");
            assert!(params.persistence() < 1.0);
            assert!(params.alpha >= 0.0 && params.alpha + params.gamma >= 0.0);
            assert!(params.omega > 0.0 && params.phi.abs() < 1.0 && params.nu > NU_MIN);
        }
        let zero = GarchParams::from_theta(cases[0].view()).expect("mapping succeeds");
        assert!(zero.validate().is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `to_theta` inverts `from_theta` on typical estimates.
    //
    // Given
    // -----
    // - (μ, φ, ω, α, γ, β, ν) = (0.05, −0.03, 0.02, 0.03, 0.12, 0.88, 6).
    //
    // Expect
    // ------
    // - Mapping back reproduces every coefficient to 1e-9.
    fn to_theta_round_trips() {
        // Arrange
        let params = GarchParams::new(0.05, -0.03, 0.02, 0.03, 0.12, 0.88, 6.0).expect("valid");

        // Act
        let theta = params.to_theta().expect("theta");
        let back = GarchParams::from_theta(theta.view()).expect("params");

        // Assert
        for (a, b) in params.to_array().iter().zip(back.to_array().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Derived quantities and the variance update follow their formulas.
    //
    // Given
    // -----
    // - ω = 0.1, α = 0.05, γ = 0.1, β = 0.8 (persistence 0.9), μ = 0.1, φ = 0.5.
    //
    // Expect
    // ------
    // - Unconditional variance 1, unconditional mean 0.2, leverage applied
    //   only to negative shocks.
    fn derived_quantities_match_formulas() {
        let params = GarchParams::new(0.1, 0.5, 0.1, 0.05, 0.1, 0.8, 8.0).expect("valid");

        assert_relative_eq!(params.persistence(), 0.9, epsilon = 1e-12);
        assert_relative_eq!(params.uncond_variance(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(params.uncond_mean(), 0.2, epsilon = 1e-12);
        assert_relative_eq!(params.next_variance(1.0, 1.0), 0.1 + 0.05 + 0.8, epsilon = 1e-12);
        assert_relative_eq!(params.next_variance(-1.0, 1.0), 0.1 + 0.15 + 0.8, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Inadmissible coefficients are rejected by `new`.
    //
    // Given
    // -----
    // - Persistence above one, and ν below the lower bound.
    //
    // Expect
    // ------
    // - `StationarityViolated` and `InvalidDegreesOfFreedom`.
    fn new_rejects_inadmissible_coefficients() {
        assert!(matches!(
            GarchParams::new(0.0, 0.0, 0.1, 0.1, 0.2, 0.85, 8.0),
            Err(ParamError::StationarityViolated { .. })
        ));
        assert!(matches!(
            GarchParams::new(0.0, 0.0, 0.1, 0.05, 0.0, 0.9, 2.0),
            Err(ParamError::InvalidDegreesOfFreedom { .. })
        ));
    }
}
