//! Drawdowns and drawdown-based tail risk: MDaR and CED.
//!
//! Purpose
//! -------
//! Reduce simulated price paths to per-path maximum drawdowns and aggregate
//! them into Maximum Drawdown at Risk (MDaR) and Conditional Expected
//! Drawdown (CED).
//!
//! Key behaviors
//! -------------
//! - [`max_drawdown`]: `max_t (running_max_t − price_t)`, in price units;
//!   zero at `t = 0` and for non-decreasing paths.
//! - [`quantile_linear`]: empirical α-quantile with linear interpolation
//!   between order statistics at position `h = (n − 1)·α` (NumPy's default).
//! - [`mdar`]: the α-quantile of the drawdowns.
//! - [`ced`]: mean of drawdowns **strictly** greater than MDaR.
//! - [`drawdown_risk`]: both statistics plus tail count and moments, as a
//!   [`DrawdownRisk`] record.
//!
//! Invariants & assumptions
//! ------------------------
//! - α ∈ (0, 1), enforced by [`TailProbability`].
//! - Drawdowns are finite and non-negative; anything else is rejected.
//! - When no drawdown exceeds MDaR (e.g. all paths identical), CED is
//!   undefined and `RiskError::EmptyTail` is returned instead of NaN.
//!
//! Testing notes
//! -------------
//! - Hand examples for the drawdown and quantile definitions.
//! - `proptest` properties: drawdown bounds, MDaR monotone in α, CED ≥ MDaR,
//!   and identical drawdowns at any α.
use crate::risk::errors::{RiskError, RiskResult};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis, Zip};
use serde::{Deserialize, Serialize};

/// A tail probability α strictly inside (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TailProbability(f64);

impl TailProbability {
    /// Validate a tail probability.
    ///
    /// Errors
    /// ------
    /// - `RiskError::InvalidAlpha` unless `0 < alpha < 1` (NaN included).
    pub fn new(alpha: f64) -> RiskResult<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(RiskError::InvalidAlpha { value: alpha });
        }
        Ok(TailProbability(alpha))
    }

    /// The wrapped α.
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Drawdown-based risk statistics for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownRisk {
    /// Tail probability used for the quantile.
    pub alpha: f64,
    /// Maximum Drawdown at Risk: α-quantile of the drawdowns.
    pub mdar: f64,
    /// Conditional Expected Drawdown: mean drawdown beyond MDaR.
    pub ced: f64,
    /// Number of drawdowns aggregated.
    pub n_paths: usize,
    /// Number of drawdowns strictly above MDaR.
    pub tail_count: usize,
    /// Mean of all drawdowns.
    pub mean_drawdown: f64,
    /// Largest drawdown observed.
    pub max_drawdown: f64,
}

/// Maximum peak-to-trough decline of one price path, in price units.
///
/// Returns 0 for an empty path.
///
/// # Examples
/// ```rust
/// # use drawdown_risk::risk::drawdown::max_drawdown;
/// # use ndarray::array;
/// let prices = array![100.0, 90.0, 95.0, 80.0, 120.0];
/// assert_eq!(max_drawdown(prices.view()), 20.0);
/// ```
pub fn max_drawdown(prices: ArrayView1<f64>) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &p in prices.iter() {
        peak = peak.max(p);
        worst = worst.max(peak - p);
    }
    worst
}

/// Maximum drawdown of every row of an `N × H` price matrix.
///
/// Rows are independent and reduced in parallel with `Zip::par_for_each`;
/// entry `i` of the result belongs to row `i`.
pub fn path_drawdowns(prices: ArrayView2<f64>) -> Array1<f64> {
    let mut out = Array1::<f64>::zeros(prices.nrows());
    Zip::from(&mut out)
        .and(prices.axis_iter(Axis(0)))
        .par_for_each(|dd, row| *dd = max_drawdown(row));
    out
}

/// Linear-interpolation α-quantile of an ascending, non-empty slice.
///
/// Parameters
/// ----------
/// - `sorted`: ascending values, `len ≥ 1`. Callers go through
///   [`mdar`]/[`drawdown_risk`], which sort and validate first.
/// - `alpha`: tail probability.
///
/// Returns
/// -------
/// - `x_(lo) + (h − lo)·(x_(lo+1) − x_(lo))` with `h = (n − 1)·α` and
///   `lo = ⌊h⌋` (0-based order statistics).
pub fn quantile_linear(sorted: &[f64], alpha: TailProbability) -> f64 {
    let n = sorted.len();
    let h = (n - 1) as f64 * alpha.value();
    let lo = h.floor() as usize;
    let frac = h - lo as f64;
    match sorted.get(lo + 1) {
        Some(&hi) if frac > 0.0 => sorted[lo] + frac * (hi - sorted[lo]),
        _ => sorted[lo],
    }
}

/// Maximum Drawdown at Risk at level `alpha`.
///
/// Errors
/// ------
/// - `RiskError::InvalidAlpha` unless `0 < alpha < 1`.
/// - `RiskError::EmptyDrawdowns` for an empty input.
/// - `RiskError::NonFiniteDrawdown` for a NaN/±inf or negative entry.
pub fn mdar(drawdowns: ArrayView1<f64>, alpha: f64) -> RiskResult<f64> {
    let alpha = TailProbability::new(alpha)?;
    let sorted = sorted_drawdowns(drawdowns)?;
    Ok(quantile_linear(&sorted, alpha))
}

/// Conditional Expected Drawdown at level `alpha`.
///
/// # Errors
/// As [`mdar`], plus `EmptyTail` when nothing exceeds MDaR.
pub fn ced(drawdowns: ArrayView1<f64>, alpha: f64) -> RiskResult<f64> {
    drawdown_risk(drawdowns, alpha).map(|risk| risk.ced)
}

/// MDaR, CED and summary moments in one pass over the sorted drawdowns.
///
/// Parameters
/// ----------
/// - `drawdowns`: per-path maximum drawdowns, in price units.
/// - `alpha`: tail probability in (0, 1).
///
/// Returns
/// -------
/// - [`DrawdownRisk`] where `ced` averages the drawdowns strictly greater
///   than `mdar` and `tail_count` is their number.
///
/// Errors
/// ------
/// - As [`mdar`].
/// - `RiskError::EmptyTail { mdar, n }` when no drawdown exceeds MDaR.
pub fn drawdown_risk(drawdowns: ArrayView1<f64>, alpha: f64) -> RiskResult<DrawdownRisk> {
    let alpha = TailProbability::new(alpha)?;
    let sorted = sorted_drawdowns(drawdowns)?;
    let n = sorted.len();
    let mdar = quantile_linear(&sorted, alpha);

    let first_tail = sorted.partition_point(|&d| d <= mdar);
    let tail = &sorted[first_tail..];
    if tail.is_empty() {
        return Err(RiskError::EmptyTail { mdar, n });
    }
    let ced = tail.iter().sum::<f64>() / tail.len() as f64;

    Ok(DrawdownRisk {
        alpha: alpha.value(),
        mdar,
        ced,
        n_paths: n,
        tail_count: tail.len(),
        mean_drawdown: sorted.iter().sum::<f64>() / n as f64,
        max_drawdown: sorted[n - 1],
    })
}

fn sorted_drawdowns(drawdowns: ArrayView1<f64>) -> RiskResult<Vec<f64>> {
    if drawdowns.is_empty() {
        return Err(RiskError::EmptyDrawdowns);
    }
    if let Some((index, &value)) =
        drawdowns.iter().enumerate().find(|(_, d)| !d.is_finite() || **d < 0.0)
    {
        return Err(RiskError::NonFiniteDrawdown { index, value });
    }
    let mut sorted = drawdowns.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}
