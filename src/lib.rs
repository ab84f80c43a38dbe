//! drawdown_risk — Monte Carlo drawdown risk under AR(1)-GJR-GARCH-t.
//!
//! Purpose
//! -------
//! Estimate the forward-looking drawdown risk of a single instrument from its
//! price history: fit an AR(1) mean with GJR-GARCH(1,1,1) variance and
//! standardized Student-t innovations by maximum likelihood, simulate many
//! future return paths, rebuild price paths from the last observed price,
//! and summarize per-path maximum drawdowns as MDaR (an α-quantile) and CED
//! (the mean drawdown beyond it).
//!
//! Key behaviors
//! -------------
//! - [`volatility`]: price/return data, the GJR-GARCH-t model, estimation
//!   and seeded parallel simulation.
//! - [`risk`]: price reconstruction, drawdowns, MDaR and CED.
//! - [`pipeline`]: configuration, price sources, the end-to-end runner and
//!   the [`RiskReport`](pipeline::RiskReport).
//! - [`optimization`]: the generic L-BFGS maximum-likelihood driver and
//!   numerically stable parameter transforms.
//! - [`inference`]: Hessian-based classical and sandwich standard errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Library paths return typed errors (`GarchError`, `RiskError`,
//!   `PipelineError`, ...) and do not panic on bad input.
//! - Simulation results depend only on the fitted model, the options and
//!   the master seed, never on the number of threads.
//!
//! Conventions
//! -----------
//! - Returns are modeled in percent (`100·ln(P_t/P_{t−1})`); simulated paths
//!   are divided back to raw log-returns before prices are rebuilt.
//! - Drawdowns are in price units.
//! - The crate emits `tracing` events but never installs a subscriber.
//!
//! Downstream usage
//! ----------------
//! ```rust,no_run
//! use drawdown_risk::pipeline::{run, RiskConfig};
//! use drawdown_risk::volatility::PriceSeries;
//!
//! # fn load_closes() -> Vec<f64> { vec![] }
//! let prices = PriceSeries::from_vec(load_closes())?;
//! let report = run(&prices, &RiskConfig { seed: Some(7), ..RiskConfig::default() })?;
//! println!("{report}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod inference;
pub mod optimization;
pub mod pipeline;
pub mod risk;
pub mod volatility;
