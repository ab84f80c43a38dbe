//! Standardized Student-t innovations.
//!
//! The model's shocks are `ε_t = σ_t·z_t` with `z_t` a Student-t variable
//! rescaled to unit variance, so `σ²_t` is the conditional variance for any
//! ν > 2.
//!
//! ## Density
//! For `ε` with conditional variance `σ²`:
//!
//! ```text
//! ln f(ε | σ²) = lnΓ((ν+1)/2) − lnΓ(ν/2) − ½·ln(π(ν−2))
//!                − ½·ln σ² − ((ν+1)/2)·ln(1 + ε² / (σ²(ν−2)))
//! ```
//!
//! The ν-only terms are precomputed once per parameter set.
//!
//! ## Sampling
//! [`TSampler`] draws `z = t_ν · sqrt((ν−2)/ν)` using `rand_distr::StudentT`.
//! It is `Sync` and shared by reference across rayon workers.
use crate::volatility::{
    core::validation::validate_nu,
    errors::{ParamError, ParamResult},
};
use rand::{distributions::Distribution, Rng};
use rand_distr::StudentT;
use statrs::function::gamma::ln_gamma;
use std::f64::consts::PI;

/// Unit-variance Student-t innovation with `ν` degrees of freedom.
///
/// Caches the ν-only part of the log-density so the per-observation cost in
/// the likelihood loop is one `ln` and one `ln_1p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StdStudentT {
    /// Degrees of freedom.
    nu: f64,
    /// `lnΓ((ν+1)/2) − lnΓ(ν/2) − ½·ln(π(ν−2))`.
    ln_const: f64,
}

impl StdStudentT {
    /// Validated innovation law.
    ///
    /// # Errors
    /// `ParamError::InvalidDegreesOfFreedom` outside the admissible range.
    pub fn new(nu: f64) -> ParamResult<Self> {
        validate_nu(nu)?;
        Ok(Self::new_unchecked(nu))
    }

    /// Construct without the range check; only requires `ν > 2` for a finite
    /// result. Used at finite-difference evaluation points.
    pub fn new_unchecked(nu: f64) -> Self {
        let ln_const = ln_gamma(0.5 * (nu + 1.0)) - ln_gamma(0.5 * nu) - 0.5 * (PI * (nu - 2.0)).ln();
        StdStudentT { nu, ln_const }
    }

    /// Degrees of freedom ν.
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// Log-density of a shock `eps` with conditional variance `sigma2`.
    ///
    /// `sigma2` must be positive; guarded variances always are. Symmetric
    /// in `eps`.
    #[inline]
    pub fn log_density(&self, eps: f64, sigma2: f64) -> f64 {
        self.ln_const
            - 0.5 * sigma2.ln()
            - 0.5 * (self.nu + 1.0) * (eps * eps / (sigma2 * (self.nu - 2.0))).ln_1p()
    }

    /// Sampler of unit-variance draws `z`.
    ///
    /// # Errors
    /// `ParamError::InvalidDegreesOfFreedom` if `rand_distr` rejects ν.
    pub fn sampler(&self) -> ParamResult<TSampler> {
        let dist =
            StudentT::new(self.nu).map_err(|_| ParamError::InvalidDegreesOfFreedom { value: self.nu })?;
        Ok(TSampler { dist, scale: ((self.nu - 2.0) / self.nu).sqrt() })
    }
}

/// Draws standardized Student-t variates.
///
/// Holds no RNG state: every call takes the caller's generator, so one
/// sampler serves all simulated paths, each with its own stream.
#[derive(Debug, Clone)]
pub struct TSampler {
    dist: StudentT<f64>,
    /// `sqrt((ν−2)/ν)`, mapping a raw t draw to unit variance.
    scale: f64,
}

impl Distribution<f64> for TSampler {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.scale * self.dist.sample(rng)
    }
}
