//! Pre-sample variance policies and starting values for estimation.
//!
//! Purpose
//! -------
//! Decide how the variance recursion is seeded before the first residual
//! ([`VarianceInit`]) and produce a sensible starting point for the
//! optimizer ([`starting_values`]).
//!
//! Key behaviors
//! -------------
//! - `VarianceInit::Backcast` (default): exponentially weighted mean of the
//!   first `min(75, n)` squared residuals with decay 0.94.
//! - `VarianceInit::SampleVariance`: mean of all squared residuals.
//! - `VarianceInit::Fixed(v)`: a user-supplied positive value.
//! - [`starting_values`] fits the AR(1) mean by OLS, derives ν from the
//!   residual kurtosis, then scans a small grid over `(α, γ, persistence)`
//!   with `ω = s²·(1 − persistence)` and keeps the grid point with the
//!   highest log-likelihood.
//!
//! Invariants & assumptions
//! ------------------------
//! - The pre-sample variance is computed once, from the starting residuals,
//!   and then held fixed for the whole optimization so the objective is a
//!   deterministic function of θ.
//! - Starting parameters always pass `GarchParams::validate`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the backcast weights, policy construction, and that
//!   starting values recover the AR(1) mean of a simulated series.
use crate::volatility::{
    core::{
        guards::VarianceGuards,
        params::GarchParams,
        validation::NU_MAX,
        variance::{compute_residuals, likelihood_driver, GarchScratch},
    },
    errors::{GarchError, GarchResult},
};
use ndarray::{Array1, ArrayView1};
use tracing::debug;

/// Number of leading squared residuals used by the backcast.
pub const BACKCAST_WINDOW: usize = 75;

/// Exponential decay of the backcast weights.
pub const BACKCAST_DECAY: f64 = 0.94;

const GRID_ALPHA: [f64; 4] = [0.01, 0.03, 0.05, 0.1];
const GRID_GAMMA: [f64; 3] = [0.0, 0.05, 0.1];
const GRID_PERSISTENCE: [f64; 5] = [0.5, 0.7, 0.9, 0.95, 0.98];

/// Floor for the residual variance of degenerate (near-constant) samples.
const MIN_SAMPLE_VARIANCE: f64 = 1e-8;

/// VarianceInit — policy for the pre-sample variance σ²₀.
///
/// Purpose
/// -------
/// Encode how the first conditional variance of the GJR recursion is
/// seeded before any residual has been observed. The policy is resolved
/// once against the starting residuals and the resulting scalar is held
/// fixed for the rest of the fit.
///
/// Variants
/// --------
/// - `Backcast`
///   Exponentially weighted mean of the first `min(75, n)` squared
///   residuals with weights `0.94^i` (see [`backcast`]).
/// - `SampleVariance`
///   Plain mean of all squared residuals.
/// - `Fixed(f64)`
///   A finite, strictly positive value validated by [`VarianceInit::fixed`].
///
/// Invariants
/// ----------
/// - [`VarianceInit::resolve`] never returns less than the degenerate-sample
///   floor `1e-8`, so constant price histories still yield a positive σ²₀.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarianceInit {
    /// Exponentially weighted mean of the leading squared residuals.
    Backcast,
    /// Mean of all squared residuals.
    SampleVariance,
    /// Strictly positive fixed value.
    Fixed(f64),
}

impl VarianceInit {
    /// Backcast policy (the default).
    pub const fn backcast() -> Self {
        VarianceInit::Backcast
    }

    /// Mean of all squared residuals.
    pub const fn sample_variance() -> Self {
        VarianceInit::SampleVariance
    }

    /// Fixed pre-sample variance.
    ///
    /// Parameters
    /// ----------
    /// - `value`: σ²₀ in squared return units (percent², at the default
    ///   return scale).
    ///
    /// Errors
    /// ------
    /// - `GarchError::InvalidVarianceInit` unless `value` is finite and > 0.
    pub fn fixed(value: f64) -> GarchResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(GarchError::InvalidVarianceInit { value });
        }
        Ok(VarianceInit::Fixed(value))
    }

    /// Resolve the policy against a residual series.
    ///
    /// Parameters
    /// ----------
    /// - `resids`: residuals `ε_t = r_t − μ − φ·r_{t−1}` at the starting
    ///   mean parameters.
    ///
    /// Returns
    /// -------
    /// - The pre-sample variance, floored at `1e-8`. An empty residual
    ///   series resolves to the floor for the moment-based policies.
    pub fn resolve(&self, resids: ArrayView1<f64>) -> f64 {
        match *self {
            VarianceInit::Backcast => backcast(resids),
            VarianceInit::SampleVariance => mean_square(resids),
            VarianceInit::Fixed(v) => v,
        }
        .max(MIN_SAMPLE_VARIANCE)
    }
}

impl Default for VarianceInit {
    fn default() -> Self {
        VarianceInit::Backcast
    }
}

/// Exponentially weighted mean of `ε²_0..ε²_{τ−1}`, `τ = min(75, n)`,
/// weights `0.94^i` normalized to one.
///
/// Parameters
/// ----------
/// - `resids`: residual series; only the first [`BACKCAST_WINDOW`] entries
///   are read.
///
/// Returns
/// -------
/// - `Σ 0.94^i·ε²_i / Σ 0.94^i` over the window, or `0.0` for an empty
///   series (callers floor the result).
pub fn backcast(resids: ArrayView1<f64>) -> f64 {
    let tau = resids.len().min(BACKCAST_WINDOW);
    let (num, den, _) = resids.iter().take(tau).fold((0.0, 0.0, 1.0), |(num, den, w), &e| {
        (num + w * e * e, den + w, w * BACKCAST_DECAY)
    });
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Starting point for the optimizer plus the fixed pre-sample variance.
///
/// Both values come out of one pass over the starting residuals, so the
/// presample variance the optimizer sees is consistent with the mean
/// parameters the search starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartingValues {
    /// Best grid point by log-likelihood; always admissible.
    pub params: GarchParams,
    /// σ²₀ resolved from the chosen [`VarianceInit`], held fixed during the fit.
    pub presample: f64,
}

/// Starting values for the GJR-GARCH-t fit of `returns`.
///
/// Parameters
/// ----------
/// - `returns`: scaled log-returns (percent at the default scale).
/// - `init`: pre-sample variance policy.
/// - `guards`: σ² clamps used while scoring grid points.
/// - `scratch`: recursion buffers sized for `returns`.
///
/// Returns
/// -------
/// - [`StartingValues`] with:
///   - `μ, φ` from OLS of `r_t` on `(1, r_{t−1})`, φ clipped to ±0.9;
///   - `ν` from the residual kurtosis `k` as `(4k − 6)/(k − 3)` when
///     `k > 3.75`, else 12, kept in `[4, NU_MAX − 1]`;
///   - `(α, γ, β, ω)` from the grid point with the highest log-likelihood,
///     `ω = s²·(1 − persistence)`.
///
/// Errors
/// ------
/// - `GarchError::InsufficientData` for fewer than three returns.
/// - `GarchError::InvalidParams` if no admissible starting point exists
///   (cannot happen for finite returns).
pub fn starting_values(
    returns: ArrayView1<f64>, init: &VarianceInit, guards: &VarianceGuards, scratch: &GarchScratch,
) -> GarchResult<StartingValues> {
    if returns.len() < 3 {
        return Err(GarchError::InsufficientData { len: returns.len(), required: 3 });
    }
    let (mu, phi) = ols_ar1(returns);
    let nu = nu_from_kurtosis(returns, mu, phi);

    let mean_only = GarchParams { mu, phi, omega: 1.0, alpha: 0.0, gamma: 0.0, beta: 0.0, nu };
    let mut resids = Array1::zeros(returns.len() - 1);
    compute_residuals(&mean_only, returns, resids.view_mut());
    let s2 = mean_square(resids.view()).max(MIN_SAMPLE_VARIANCE);
    let presample = init.resolve(resids.view());

    let mut best: Option<(f64, GarchParams)> = None;
    for &alpha in GRID_ALPHA.iter() {
        for &gamma in GRID_GAMMA.iter() {
            for &persistence in GRID_PERSISTENCE.iter() {
                let beta = persistence - alpha - 0.5 * gamma;
                if beta < 0.0 {
                    continue;
                }
                let candidate = GarchParams {
                    omega: s2 * (1.0 - persistence),
                    alpha,
                    gamma,
                    beta,
                    ..mean_only
                };
                if candidate.validate().is_err() {
                    continue;
                }
                let ll = match likelihood_driver(&candidate, returns, presample, guards, scratch) {
                    Ok(ll) if ll.is_finite() => ll,
                    _ => continue,
                };
                if best.map_or(true, |(best_ll, _)| ll > best_ll) {
                    best = Some((ll, candidate));
                }
            }
        }
    }
    let params = match best {
        Some((ll, params)) => {
            debug!(loglik = ll, ?params, "selected starting values");
            params
        }
        None => GarchParams::new(mu, phi, s2 * 0.1, 0.05, 0.0, 0.85, nu)?,
    };
    Ok(StartingValues { params, presample })
}

// ---- Helper methods ----

fn mean_square(x: ArrayView1<f64>) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64
}

/// OLS of `r_t` on `(1, r_{t−1})`, with φ clipped into the stationary region.
fn ols_ar1(returns: ArrayView1<f64>) -> (f64, f64) {
    let n = returns.len();
    let y = returns.slice(ndarray::s![1..n]);
    let x = returns.slice(ndarray::s![0..n - 1]);
    let m = (n - 1) as f64;
    let x_bar = x.sum() / m;
    let y_bar = y.sum() / m;
    let sxx = x.iter().map(|v| (v - x_bar).powi(2)).sum::<f64>();
    let sxy = x.iter().zip(y.iter()).map(|(a, b)| (a - x_bar) * (b - y_bar)).sum::<f64>();
    let phi = if sxx > 0.0 { (sxy / sxx).clamp(-0.9, 0.9) } else { 0.0 };
    (y_bar - phi * x_bar, phi)
}

/// Method-of-moments ν from the kurtosis `k` of the OLS residuals:
/// `(4k − 6)/(k − 3)` when `k > 3.75`, else 12, never below 4.
fn nu_from_kurtosis(returns: ArrayView1<f64>, mu: f64, phi: f64) -> f64 {
    let n = returns.len();
    let resids: Vec<f64> =
        (1..n).map(|t| returns[t] - mu - phi * returns[t - 1]).collect();
    let m = resids.len() as f64;
    let mean = resids.iter().sum::<f64>() / m;
    let m2 = resids.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / m;
    let m4 = resids.iter().map(|e| (e - mean).powi(4)).sum::<f64>() / m;
    let k = if m2 > 0.0 { m4 / (m2 * m2) } else { 3.0 };
    let nu = if k > 3.75 { (4.0 * k - 6.0) / (k - 3.0) } else { 12.0 };
    nu.max(4.0).min(NU_MAX - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rand_distr::{Distribution, Normal};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Backcast weighting and window length.
    // - `VarianceInit` construction and resolution.
    // - Starting values on a simulated AR(1) series.
    //
    // They intentionally DO NOT cover:
    // - The optimizer run (see `volatility::models::gjr_garch`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Backcast is a normalized 0.94-weighted mean over at most 75 terms.
    //
    // Given
    // -----
    // - Residuals [1, 2] and 100 residuals equal to 1 followed by 100 equal to 10.
    //
    // Expect
    // ------
    // - (1 + 0.94·4)/(1 + 0.94); the long series ignores entries past 75.
    fn backcast_weights_and_window() {
        let short = array![1.0, 2.0];
        let mut long = Array1::ones(200);
        long.slice_mut(ndarray::s![100..]).fill(10.0);

        assert_relative_eq!(backcast(short.view()), (1.0 + 0.94 * 4.0) / 1.94, epsilon = 1e-12);
        assert_relative_eq!(backcast(long.view()), 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Policies resolve to their documented values; invalid fixed values fail.
    //
    // Given
    // -----
    // - Residuals [1, −3]; `Fixed(2.5)`; `fixed(0.0)`.
    //
    // Expect
    // ------
    // - Sample variance 5, fixed 2.5, `InvalidVarianceInit`.
    fn variance_init_resolves_policies() {
        let resids = array![1.0, -3.0];

        assert_relative_eq!(VarianceInit::sample_variance().resolve(resids.view()), 5.0);
        assert_eq!(VarianceInit::fixed(2.5).expect("valid").resolve(resids.view()), 2.5);
        assert_eq!(VarianceInit::fixed(0.0), Err(GarchError::InvalidVarianceInit { value: 0.0 }));
        assert_eq!(VarianceInit::default(), VarianceInit::Backcast);
    }

    #[test]
    // Purpose
    // -------
    // Starting values recover the AR(1) mean and are admissible.
    //
    // Given
    // -----
    // - 2 000 draws of r_t = 0.2 + 0.3·r_{t−1} + N(0, 1).
    //
    // Expect
    // ------
    // - |μ − 0.2| < 0.1, |φ − 0.3| < 0.1, parameters validate, ν ≥ 4.
    fn starting_values_recover_ar1_mean() {
        // Arrange
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let normal = Normal::new(0.0, 1.0).expect("normal");
        let mut returns = Array1::zeros(2000);
        for t in 1..2000 {
            returns[t] = 0.2 + 0.3 * returns[t - 1] + normal.sample(&mut rng);
        }
        let scratch = GarchScratch::new(1999);

        // Act
        let start = starting_values(
            returns.view(),
            &VarianceInit::Backcast,
            &VarianceGuards::default(),
            &scratch,
        )
        .expect("starting values");

        // Assert
        assert!((start.params.mu - 0.2).abs() < 0.1);
        assert!((start.params.phi - 0.3).abs() < 0.1);
        assert!(start.params.validate().is_ok());
        assert!(start.params.nu >= 4.0);
        assert!(start.presample > 0.0);
    }
}
