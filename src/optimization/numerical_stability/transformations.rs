//! Overflow-safe maps between ℝ and constrained parameter ranges.
//!
//! Naïve `ln(1 + exp(x))`, `1 / (1 + exp(-x))` and softmax overflow for
//! large arguments. The guarded versions below keep `f64` arithmetic in a
//! well-conditioned regime (cutoff `|x| > 20` for softplus, max-shift for
//! softmax) and pair each map with its inverse so that model starting values
//! can be pulled back into optimizer space.

/// Strict-inequality buffer for stationarity: α + γ/2 + β ≤ 1 − margin.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Eigenvalues at or below this are treated as zero in pseudoinverses.
pub const EIGEN_EPS: f64 = 1e-12;

/// Probabilities are clamped to `[LOGIT_EPS, 1 − LOGIT_EPS]` before inversion.
pub const LOGIT_EPS: f64 = 1e-12;

/// `softplus(x) = ln(1 + exp(x))`, mapping ℝ → (0, ∞).
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 {
        x
    } else {
        x.exp().ln_1p()
    }
}

/// Inverse of [`safe_softplus`] on `(0, ∞)`: `ln(exp(x) − 1)`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 {
        x
    } else {
        x.exp_m1().ln()
    }
}

/// `1 / (1 + exp(−x))`, mapping ℝ → (0, 1) without overflow in either tail.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Inverse of [`safe_logistic`]; `p` is clamped away from 0 and 1 first.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    p.ln() - (-p).ln_1p()
}

/// Scaled softmax with an implicit zero logit for a slack component.
///
/// Returns `(w, slack)` with `w_i = total · exp(x_i) / Z`,
/// `slack = total / Z`, `Z = 1 + Σ exp(x_i)`, so that `Σ w_i + slack = total`
/// and every component is strictly positive.
pub fn safe_softmax<const K: usize>(logits: [f64; K], total: f64) -> ([f64; K], f64) {
    let shift = logits.iter().fold(0.0_f64, |m, &x| m.max(x));
    let mut w = [0.0; K];
    let mut z = (-shift).exp();
    for (wi, &x) in w.iter_mut().zip(logits.iter()) {
        *wi = (x - shift).exp();
        z += *wi;
    }
    for wi in w.iter_mut() {
        *wi *= total / z;
    }
    (w, total * (-shift).exp() / z)
}

/// Inverse of [`safe_softmax`]: `x_i = ln w_i − ln slack`.
///
/// Components are floored at [`LOGIT_EPS`] so that boundary starting values
/// (e.g. a zero leverage term) still map to finite logits.
pub fn safe_softmax_inv<const K: usize>(weights: [f64; K], slack: f64) -> [f64; K] {
    let ln_slack = slack.max(LOGIT_EPS).ln();
    let mut out = [0.0; K];
    for (o, &w) in out.iter_mut().zip(weights.iter()) {
        *o = w.max(LOGIT_EPS).ln() - ln_slack;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement with naïve formulas on moderate inputs.
    // - Finite output in the tails.
    // - Round trips through each map and its inverse.
    //
    // They intentionally DO NOT cover:
    // - Parameter-level mappings (see `volatility::core::params`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Softplus and logistic agree with their naïve forms and invert cleanly.
    //
    // Given
    // -----
    // - A grid of moderate inputs in [-10, 10].
    //
    // Expect
    // ------
    // - Relative agreement to 1e-12 and round trips to 1e-9.
    fn softplus_and_logistic_round_trip_on_moderate_grid() {
        for i in -20..=20 {
            let x = i as f64 * 0.5;
            assert_relative_eq!(safe_softplus(x), (1.0 + x.exp()).ln(), max_relative = 1e-12);
            assert_relative_eq!(safe_logistic(x), 1.0 / (1.0 + (-x).exp()), max_relative = 1e-12);
            assert_relative_eq!(safe_softplus_inv(safe_softplus(x)), x, epsilon = 1e-9);
            assert_relative_eq!(safe_logit(safe_logistic(x)), x, epsilon = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Tails stay finite and inside the target range.
    //
    // Given
    // -----
    // - x = ±800.
    //
    // Expect
    // ------
    // - softplus(800) = 800, logistic(±800) ∈ [0, 1], no NaN.
    fn tails_stay_finite() {
        assert_eq!(safe_softplus(800.0), 800.0);
        assert!(safe_softplus(-800.0) >= 0.0);
        assert_eq!(safe_logistic(800.0), 1.0);
        assert!(safe_logistic(-800.0) >= 0.0);
        assert!(safe_logit(0.0).is_finite());
        assert!(safe_logit(1.0).is_finite());
    }

    #[test]
    // Purpose
    // -------
    // The scaled softmax sums to its total and inverts.
    //
    // Given
    // -----
    // - Logits [1.5, -2.0, 700.0] (one huge) and total 0.9.
    // - Weights [0.1, 0.2, 0.6] with slack 0.1 for the inverse.
    //
    // Expect
    // ------
    // - Components plus slack sum to 0.9, all finite.
    // - Inverse then forward reproduces the weights.
    fn softmax_sums_to_total_and_inverts() {
        // Act
        let (w, slack) = safe_softmax([1.5, -2.0, 700.0], 0.9);
        let logits = safe_softmax_inv([0.1, 0.2, 0.6], 0.1);
        let (back, back_slack) = safe_softmax(logits, 1.0);

        // Assert
        assert!(w.iter().all(|v| v.is_finite()) && slack.is_finite());
        assert_relative_eq!(w.iter().sum::<f64>() + slack, 0.9, epsilon = 1e-12);
        assert_relative_eq!(back[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(back[1], 0.2, epsilon = 1e-12);
        assert_relative_eq!(back[2], 0.6, epsilon = 1e-12);
        assert_relative_eq!(back_slack, 0.1, epsilon = 1e-12);
    }
}
