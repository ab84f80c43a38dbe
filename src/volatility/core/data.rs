//! Price and return containers for the volatility model.
//!
//! Purpose
//! -------
//! Provide small, validated containers for the observed price series and the
//! scaled log-return series the estimator consumes. This module centralizes
//! input validation so downstream recursions can assume clean data.
//!
//! Key behaviors
//! -------------
//! - [`PriceSeries`] enforces at least two prices, every price finite and
//!   strictly positive, and (when dates are supplied) one strictly increasing
//!   date per price.
//! - [`ReturnSeries`] holds `scale · (ln P_t − ln P_{t−1})` for `t ≥ 1`; the
//!   first index has no return and is excluded rather than zero-filled.
//! - [`SeriesMeta`] records the ticker without affecting any numerics.
//!
//! Invariants & assumptions
//! ------------------------
//! - A return series has exactly one element fewer than its price series,
//!   unless a transition evaluated to NaN/±inf, in which case that transition
//!   is dropped (logged at `warn`) and never propagated.
//! - The return scale is stored alongside the data so simulated returns can
//!   be mapped back to raw log-return units.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; `dates[i]` belongs to `prices[i]`, and a return at
//!   position `j` carries the date of its closing price `j + 1`.
//! - [`DEFAULT_RETURN_SCALE`] is 100 (percent log-returns).
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction failures, the transform itself, and the
//!   exp-cumsum round trip back to prices.
use crate::volatility::errors::{GarchError, GarchResult};
use chrono::NaiveDate;
use ndarray::Array1;
use tracing::warn;

/// Multiplier applied to log-returns before estimation.
pub const DEFAULT_RETURN_SCALE: f64 = 100.0;

/// Minimum number of prices needed to form one return.
pub const MIN_PRICES: usize = 2;

/// Descriptive metadata carried with a price series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesMeta {
    /// Instrument identifier, if known.
    pub ticker: Option<String>,
}

impl SeriesMeta {
    /// Metadata with an optional ticker.
    pub fn new(ticker: Option<String>) -> Self {
        SeriesMeta { ticker }
    }
}

/// `PriceSeries` — validated, time-ordered positive prices.
///
/// Fields
/// ------
/// - `prices`: `Array1<f64>`
///   Observed prices; finite and strictly greater than zero.
/// - `dates`: `Option<Vec<NaiveDate>>`
///   Optional trading dates, one per price, strictly increasing.
/// - `meta`: [`SeriesMeta`]
///
/// Invariants
/// ----------
/// - `prices.len() >= 2`.
/// - `dates.len() == prices.len()` when dates are present.
///
/// Notes
/// -----
/// - Immutable after construction; all accessors borrow.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    prices: Array1<f64>,
    dates: Option<Vec<NaiveDate>>,
    meta: SeriesMeta,
}

impl PriceSeries {
    /// Construct a validated [`PriceSeries`].
    ///
    /// Errors
    /// ------
    /// - `GarchError::InsufficientData` when fewer than two prices are given.
    /// - `GarchError::InvalidPrice { index, value }` for the first price that
    ///   is ≤ 0 or non-finite.
    /// - `GarchError::DateLengthMismatch` / `GarchError::NonIncreasingDates`
    ///   for inconsistent dates.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use drawdown_risk::volatility::core::data::{PriceSeries, SeriesMeta};
    /// # use ndarray::array;
    /// let series = PriceSeries::new(array![100.0, 101.0, 99.5], None, SeriesMeta::default()).unwrap();
    /// assert_eq!(series.len(), 3);
    /// assert_eq!(series.last_price(), 99.5);
    /// ```
    pub fn new(
        prices: Array1<f64>, dates: Option<Vec<NaiveDate>>, meta: SeriesMeta,
    ) -> GarchResult<Self> {
        if prices.len() < MIN_PRICES {
            return Err(GarchError::InsufficientData { len: prices.len(), required: MIN_PRICES });
        }
        if let Some((index, &value)) =
            prices.iter().enumerate().find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(GarchError::InvalidPrice { index, value });
        }
        if let Some(dates) = &dates {
            if dates.len() != prices.len() {
                return Err(GarchError::DateLengthMismatch {
                    prices: prices.len(),
                    dates: dates.len(),
                });
            }
            if let Some(index) = dates.windows(2).position(|w| w[1] <= w[0]) {
                return Err(GarchError::NonIncreasingDates { index: index + 1 });
            }
        }
        Ok(PriceSeries { prices, dates, meta })
    }

    /// Convenience constructor for an undated series.
    pub fn from_vec(prices: Vec<f64>) -> GarchResult<Self> {
        Self::new(Array1::from_vec(prices), None, SeriesMeta::default())
    }

    /// Observed prices, oldest first.
    pub fn prices(&self) -> &Array1<f64> {
        &self.prices
    }

    /// Trading dates aligned with [`prices`](Self::prices), if supplied.
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        self.dates.as_deref()
    }

    /// Attached metadata.
    pub fn meta(&self) -> &SeriesMeta {
        &self.meta
    }

    /// Number of prices (always ≥ 2).
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Always `false`; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Last observed price, the anchor for simulated price paths.
    pub fn last_price(&self) -> f64 {
        self.prices[self.prices.len() - 1]
    }

    /// Keep observations dated on or after `start`. Undated series are
    /// returned unchanged.
    ///
    /// Parameters
    /// ----------
    /// - `start`: first date to keep (inclusive).
    ///
    /// Returns
    /// -------
    /// - A new series sharing this series' metadata. Dates are sorted, so
    ///   the cut point is found by binary search.
    ///
    /// Errors
    /// ------
    /// - `GarchError::InsufficientData` when fewer than two prices remain.
    pub fn since(&self, start: NaiveDate) -> GarchResult<Self> {
        let Some(dates) = &self.dates else {
            return Ok(self.clone());
        };
        let first = dates.partition_point(|d| *d < start);
        let prices = self.prices.slice(ndarray::s![first..]).to_owned();
        Self::new(prices, Some(dates[first..].to_vec()), self.meta.clone())
    }

    /// Scaled log-returns with [`DEFAULT_RETURN_SCALE`].
    ///
    /// # Errors
    /// Never fails for a validated series; the signature mirrors
    /// [`ReturnSeries::from_prices`].
    pub fn log_returns(&self) -> GarchResult<ReturnSeries> {
        ReturnSeries::from_prices(self, DEFAULT_RETURN_SCALE)
    }
}

/// `ReturnSeries` — finite, scaled log-returns.
///
/// Fields
/// ------
/// - `data`: `Array1<f64>` with `data[j] = scale · ln(P_{j+1} / P_j)`.
/// - `scale`: multiplier used to build `data` (finite, > 0).
/// - `dates`: closing dates of each return, when the prices were dated.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    /// Scaled log-returns.
    pub data: Array1<f64>,
    /// Multiplier applied to raw log-returns.
    pub scale: f64,
    /// Date of the closing price of each return.
    pub dates: Option<Vec<NaiveDate>>,
}

impl ReturnSeries {
    /// Wrap pre-computed returns.
    ///
    /// `data` must already be multiplied by `scale`; no dates are attached.
    ///
    /// # Errors
    /// - `GarchError::InvalidScale` when `scale` is not finite and positive.
    /// - `GarchError::NonFiniteReturn` for the first NaN/±inf entry.
    pub fn new(data: Array1<f64>, scale: f64) -> GarchResult<Self> {
        validate_scale(scale)?;
        if let Some((index, &value)) = data.iter().enumerate().find(|(_, r)| !r.is_finite()) {
            return Err(GarchError::NonFiniteReturn { index, value });
        }
        Ok(ReturnSeries { data, scale, dates: None })
    }

    /// Transform a price series into `scale`-multiplied log-returns.
    ///
    /// Parameters
    /// ----------
    /// - `series`: validated prices.
    /// - `scale`: multiplier, [`DEFAULT_RETURN_SCALE`] in the pipeline.
    ///
    /// Returns
    /// -------
    /// - `data[j] = scale · (ln P_{j+1} − ln P_j)`, one entry per transition,
    ///   with the closing date of each transition when the prices are dated.
    ///
    /// Transitions whose return is not finite are dropped (together with
    /// their date) and reported with a `warn` event.
    ///
    /// Errors
    /// ------
    /// - `GarchError::InvalidScale` when `scale` is not finite and positive.
    pub fn from_prices(series: &PriceSeries, scale: f64) -> GarchResult<Self> {
        validate_scale(scale)?;
        let prices = series.prices();
        let mut data = Vec::with_capacity(prices.len() - 1);
        let mut kept = Vec::with_capacity(prices.len() - 1);
        for (j, w) in prices.windows(2).into_iter().enumerate() {
            let r = scale * (w[1].ln() - w[0].ln());
            if r.is_finite() {
                data.push(r);
                kept.push(j + 1);
            }
        }
        let dropped = prices.len() - 1 - data.len();
        if dropped > 0 {
            warn!(dropped, "dropped non-finite return transitions");
        }
        let dates = series.dates().map(|d| kept.iter().map(|&i| d[i]).collect());
        Ok(ReturnSeries { data: Array1::from_vec(data), scale, dates })
    }

    /// Number of returns.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` when no return survived the transform.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn validate_scale(scale: f64) -> GarchResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(GarchError::InvalidScale { value: scale });
    }
    Ok(())
}
