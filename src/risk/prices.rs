//! Price reconstruction from simulated log-return paths.
//!
//! `price[t] = P0 · exp(Σ_{s ≤ t} r_s)` for every path, where `r` is in raw
//! log-return units and `P0` is the last observed price. The map is
//! deterministic and applied row by row (rows are paths).
use crate::risk::errors::{RiskError, RiskResult};
use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis, Zip};

/// Check that `anchor` is finite and strictly positive.
///
/// # Errors
/// `RiskError::InvalidAnchorPrice` otherwise.
pub fn validate_anchor(anchor: f64) -> RiskResult<f64> {
    if !anchor.is_finite() || anchor <= 0.0 {
        return Err(RiskError::InvalidAnchorPrice { value: anchor });
    }
    Ok(anchor)
}

/// Rebuild one price path into `out` (same length as `returns`).
///
/// Parameters
/// ----------
/// - `returns`: raw log-returns `r_1..r_H` of one path.
/// - `anchor`: `P_0`, assumed valid; see [`validate_anchor`].
/// - `out`: receives `P_1..P_H`; the anchor itself is not written.
///
/// Used allocation-free by the streaming drawdown simulation.
pub fn reconstruct_path_into(returns: ArrayView1<f64>, anchor: f64, mut out: ArrayViewMut1<f64>) {
    let mut cum = 0.0;
    Zip::from(&mut out).and(returns).for_each(|p, &r| {
        cum += r;
        *p = anchor * cum.exp();
    });
}

/// Rebuild every row of an `N × H` return matrix.
///
/// Rows are independent and rebuilt in parallel with `Zip::par_for_each`.
/// The output has the same shape as `returns`.
///
/// # Errors
/// `RiskError::InvalidAnchorPrice` for a non-positive or non-finite anchor.
///
/// # Examples
/// ```rust
/// # use drawdown_risk::risk::prices::reconstruct_prices;
/// # use ndarray::array;
/// let prices = reconstruct_prices(array![[0.0, 0.1, -0.1]].view(), 50.0).unwrap();
/// assert!((prices[[0, 2]] - 50.0).abs() < 1e-12);
/// ```
pub fn reconstruct_prices(returns: ArrayView2<f64>, anchor: f64) -> RiskResult<Array2<f64>> {
    let anchor = validate_anchor(anchor)?;
    let mut out = Array2::<f64>::zeros(returns.raw_dim());
    Zip::from(out.axis_iter_mut(Axis(0)))
        .and(returns.axis_iter(Axis(0)))
        .par_for_each(|row_out, row_in| reconstruct_path_into(row_in, anchor, row_out));
    Ok(out)
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
    // - The exp-cumsum map against hand values.
    // - Zero returns giving flat paths.
    // - Anchor validation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Prices follow P0·exp(cumsum(r)) per row.
    //
    // Given
    // -----
    // - Two paths [[0.1, −0.2], [0, 0]] and anchor 10.
    //
    // Expect
    // ------
    // - Row 0 = [10e^{0.1}, 10e^{−0.1}], row 1 = [10, 10].
    fn reconstruct_prices_applies_exp_cumsum() {
        let returns = array![[0.1, -0.2], [0.0, 0.0]];

        let prices = reconstruct_prices(returns.view(), 10.0).expect("prices");

        assert_relative_eq!(prices[[0, 0]], 10.0 * 0.1_f64.exp(), epsilon = 1e-12);
        assert_relative_eq!(prices[[0, 1]], 10.0 * (-0.1_f64).exp(), epsilon = 1e-12);
        assert_eq!(prices.row(1).to_vec(), vec![10.0, 10.0]);
    }

    #[test]
    // Purpose
    // -------
    // Invalid anchors are rejected.
    //
    // Given
    // -----
    // - Anchors 0, −1, NaN.
    //
    // Expect
    // ------
    // - `InvalidAnchorPrice` for each.
    fn reconstruct_prices_rejects_invalid_anchor() {
        let returns = array![[0.0]];
        for anchor in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                reconstruct_prices(returns.view(), anchor),
                Err(RiskError::InvalidAnchorPrice { .. })
            ));
        }
    }
}
