//! Validation helpers for GJR-GARCH parameters, θ vectors and simulation
//! settings.
//!
//! Every check returns a typed error (`ParamError` for coefficients and θ,
//! `GarchError` for simulation settings) and never panics, so callers can
//! assume the documented ranges once a check has passed.
use crate::{
    optimization::numerical_stability::transformations::STATIONARITY_MARGIN,
    volatility::{
        core::options::SimOpts,
        errors::{GarchError, GarchResult, ParamError, ParamResult},
    },
};
use ndarray::ArrayView1;

/// Number of free parameters: (μ, φ, ω, α, γ, β, ν).
pub const N_PARAMS: usize = 7;

/// Lower bound of the Student-t degrees of freedom.
pub const NU_MIN: f64 = 2.05;

/// Upper bound of the Student-t degrees of freedom.
pub const NU_MAX: f64 = 500.0;

/// Check θ length and finiteness.
///
/// # Errors
/// - `ParamError::ThetaLengthMismatch` when `theta.len() != N_PARAMS`.
/// - `ParamError::InvalidThetaInput` for the first non-finite entry.
pub fn validate_theta(theta: ArrayView1<f64>) -> ParamResult<()> {
    if theta.len() != N_PARAMS {
        return Err(ParamError::ThetaLengthMismatch { expected: N_PARAMS, actual: theta.len() });
    }
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ParamError::InvalidThetaInput { index, value });
    }
    Ok(())
}

/// μ only has to be finite.
pub fn validate_mu(mu: f64) -> ParamResult<()> {
    if !mu.is_finite() {
        return Err(ParamError::InvalidMu { value: mu });
    }
    Ok(())
}

/// `|φ| < 1` keeps the AR(1) mean stationary.
pub fn validate_ar(phi: f64) -> ParamResult<()> {
    if !phi.is_finite() || phi.abs() >= 1.0 {
        return Err(ParamError::InvalidAr { value: phi });
    }
    Ok(())
}

/// `ω > 0` keeps every σ²_t strictly positive.
pub fn validate_omega(omega: f64) -> ParamResult<()> {
    if !omega.is_finite() || omega <= 0.0 {
        return Err(ParamError::InvalidOmega { value: omega });
    }
    Ok(())
}

/// `α ≥ 0`.
pub fn validate_alpha(alpha: f64) -> ParamResult<()> {
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(ParamError::InvalidAlpha { value: alpha });
    }
    Ok(())
}

/// γ may be negative as long as the news impact on negative shocks,
/// `α + γ`, stays non-negative.
pub fn validate_leverage(alpha: f64, gamma: f64) -> ParamResult<()> {
    if !gamma.is_finite() || alpha + gamma < 0.0 {
        return Err(ParamError::InvalidLeverage { alpha, gamma });
    }
    Ok(())
}

/// `β ≥ 0`.
pub fn validate_beta(beta: f64) -> ParamResult<()> {
    if !beta.is_finite() || beta < 0.0 {
        return Err(ParamError::InvalidBeta { value: beta });
    }
    Ok(())
}

/// ν ∈ (NU_MIN, NU_MAX]; below the lower bound the standardized density
/// loses its variance.
pub fn validate_nu(nu: f64) -> ParamResult<()> {
    if !nu.is_finite() || nu <= NU_MIN || nu > NU_MAX {
        return Err(ParamError::InvalidDegreesOfFreedom { value: nu });
    }
    Ok(())
}

/// `α + γ/2 + β < 1 − STATIONARITY_MARGIN`.
///
/// # Errors
/// `ParamError::StationarityViolated` carrying the offending persistence.
pub fn validate_stationarity(persistence: f64) -> ParamResult<()> {
    if !persistence.is_finite() || persistence >= 1.0 - STATIONARITY_MARGIN {
        return Err(ParamError::StationarityViolated { persistence });
    }
    Ok(())
}

/// Horizon and path count must both be positive.
///
/// # Errors
/// - `GarchError::InvalidSimParameter` naming the offending field.
pub fn validate_sim_opts(opts: &SimOpts) -> GarchResult<()> {
    if opts.horizon == 0 {
        return Err(GarchError::InvalidSimParameter {
            name: "horizon",
            value: 0.0,
            reason: "horizon must be at least 1",
        });
    }
    if opts.n_paths == 0 {
        return Err(GarchError::InvalidSimParameter {
            name: "n_paths",
            value: 0.0,
            reason: "number of paths must be at least 1",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - θ length/finiteness checks.
    // - Boundary behavior of the coefficient checks.
    // - Simulation setting checks.
    //
    // They intentionally DO NOT cover:
    // - θ → parameter mappings (see `params`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // θ must have seven finite entries.
    //
    // Given
    // -----
    // - A length-3 vector and a length-7 vector with NaN at index 4.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch` and `InvalidThetaInput { index: 4 }`.
    fn validate_theta_checks_length_and_finiteness() {
        let short = array![0.0, 0.0, 0.0];
        let nan = array![0.0, 0.0, 0.0, 0.0, f64::NAN, 0.0, 0.0];

        assert_eq!(
            validate_theta(short.view()),
            Err(ParamError::ThetaLengthMismatch { expected: 7, actual: 3 })
        );
        assert!(matches!(
            validate_theta(nan.view()),
            Err(ParamError::InvalidThetaInput { index: 4, .. })
        ));
        assert!(validate_theta(array![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6].view()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Coefficient checks accept interior values and reject boundaries.
    //
    // Given
    // -----
    // - φ = ±1, ω = 0, α = −0.01, α + γ < 0, ν = 2.0, persistence = 1.
    //
    // Expect
    // ------
    // - Each boundary value is rejected, interior values pass.
    fn coefficient_checks_reject_boundaries() {
        assert!(validate_ar(0.5).is_ok());
        assert!(validate_ar(1.0).is_err());
        assert!(validate_ar(-1.0).is_err());
        assert!(validate_omega(0.0).is_err());
        assert!(validate_alpha(-0.01).is_err());
        assert!(validate_leverage(0.05, -0.04).is_ok());
        assert!(validate_leverage(0.05, -0.06).is_err());
        assert!(validate_beta(0.9).is_ok());
        assert!(validate_nu(2.0).is_err());
        assert!(validate_nu(8.0).is_ok());
        assert!(validate_stationarity(0.98).is_ok());
        assert!(validate_stationarity(1.0).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Zero horizon or zero paths are invalid simulation settings.
    //
    // Given
    // -----
    // - Defaults with `horizon = 0`, then with `n_paths = 0`.
    //
    // Expect
    // ------
    // - `InvalidSimParameter` naming the field.
    fn validate_sim_opts_rejects_zero_sizes() {
        let zero_h = SimOpts { horizon: 0, ..SimOpts::default() };
        let zero_n = SimOpts { n_paths: 0, ..SimOpts::default() };

        assert!(matches!(
            validate_sim_opts(&zero_h),
            Err(GarchError::InvalidSimParameter { name: "horizon", .. })
        ));
        assert!(matches!(
            validate_sim_opts(&zero_n),
            Err(GarchError::InvalidSimParameter { name: "n_paths", .. })
        ));
        assert!(validate_sim_opts(&SimOpts::default()).is_ok());
    }
}
