//! Variance guards — lower/upper bounds for the σ² recursion.
//!
//! Purpose
//! -------
//! Keep the conditional variance inside a numerically safe range during
//! likelihood evaluation and path simulation. The log-density needs
//! `σ²_t > 0`, and an exploding σ² during a bad line-search step should
//! produce a poor likelihood rather than `inf`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 < min < max`, both finite.
//! - Guards only clamp; they never rescale. Callers pick bounds suited to
//!   percent-scaled returns (the default `(1e-12, 1e12)` is wide).
//!
//! Testing notes
//! -------------
//! - Unit tests cover accepted/rejected bound pairs and clamping.
use crate::volatility::errors::{GarchError, GarchResult};

/// Lower/upper bounds applied to every σ²_t.
///
/// Fields
/// ------
/// - `min`: strictly positive floor keeping `ln σ²` defined.
/// - `max`: cap (> `min`) preventing overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceGuards {
    pub min: f64,
    pub max: f64,
}

impl VarianceGuards {
    /// Construct validated guards from `(min, max)`.
    ///
    /// # Errors
    /// `GarchError::InvalidVarianceGuards` when `min >= max`, either bound is
    /// non-finite, or `min <= 0`.
    ///
    /// # Examples
    /// ```rust
    /// # use drawdown_risk::volatility::core::guards::VarianceGuards;
    /// let guards = VarianceGuards::new((1e-8, 1e8)).unwrap();
    /// assert_eq!(guards.clamp(0.0), 1e-8);
    /// assert!(VarianceGuards::new((1.0, 1.0)).is_err());
    /// ```
    pub fn new(value: (f64, f64)) -> GarchResult<Self> {
        let (min, max) = value;
        if min >= max {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "Variance guards must have min < max.",
            });
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "Variance guards must be finite.",
            });
        }
        if min <= 0.0 {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "Variance guards must be strictly positive.",
            });
        }
        Ok(VarianceGuards { min, max })
    }

    /// Clamp `value` into `[min, max]`; NaN passes through unchanged so the
    /// recursion can report it.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl Default for VarianceGuards {
    fn default() -> Self {
        VarianceGuards { min: 1e-12, max: 1e12 }
    }
}
