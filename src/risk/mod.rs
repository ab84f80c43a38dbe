//! risk — price reconstruction and drawdown-based tail risk.
//!
//! Purpose
//! -------
//! Turn simulated log-return paths into price paths, reduce each path to its
//! maximum drawdown, and aggregate the drawdown distribution into Maximum
//! Drawdown at Risk (MDaR) and Conditional Expected Drawdown (CED).
//!
//! Key behaviors
//! -------------
//! - [`prices`]: `P0 · exp(cumsum(r))` per path, in parallel over rows.
//! - [`drawdown`]: per-path maximum drawdown, the linear-interpolation
//!   quantile, MDaR, CED and the [`DrawdownRisk`] summary record.
//! - [`errors`]: [`RiskError`] and the [`RiskResult`] alias.
//!
//! Conventions
//! -----------
//! - Drawdowns are in price units (same currency as the anchor price).
//! - Return matrices are `N × H`, rows are paths.
//! - No I/O or logging happens here; callers decide what to report.

pub mod drawdown;
pub mod errors;
pub mod prices;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::drawdown::{
    ced, drawdown_risk, max_drawdown, mdar, path_drawdowns, quantile_linear, DrawdownRisk,
    TailProbability,
};
pub use self::errors::{RiskError, RiskResult};
pub use self::prices::{reconstruct_path_into, reconstruct_prices, validate_anchor};

pub mod prelude {
    pub use super::drawdown::{ced, drawdown_risk, mdar, path_drawdowns, DrawdownRisk};
    pub use super::errors::{RiskError, RiskResult};
    pub use super::prices::reconstruct_prices;
}
