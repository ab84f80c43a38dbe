//! Integration tests for the drawdown-risk pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow: prices → returns → GJR-GARCH-t fit →
//!   simulated drawdowns → MDaR / CED → report.
//! - Exercise the public API only, on synthetic prices generated from a
//!   known GJR-GARCH-t process.
//!
//! Coverage
//! --------
//! - `volatility::core::data`: return transform length and round trip.
//! - `pipeline`: `run`, `run_with_source`, seed reproducibility, report
//!   rendering and JSON.
//! - `risk`: the zero-variance limit and the empty-tail policy.
//! - Error surfaces for one price, zero horizon and α = 1.5.
//!
//! Exclusions
//! ----------
//! - Optimizer internals and recursion details, covered by unit tests.
use approx::assert_relative_eq;
use chrono::NaiveDate;
use drawdown_risk::{
    pipeline::{run, run_with_source, InMemoryPriceSource, PipelineError, RiskConfig},
    risk::{
        drawdown::{ced, mdar, path_drawdowns},
        errors::RiskError,
        prices::reconstruct_prices,
    },
    volatility::{
        core::{
            data::{PriceSeries, SeriesMeta},
            options::{SimOpts, SimStart},
            params::GarchParams,
            simulation::{simulate_paths, TerminalState},
            VarianceGuards,
        },
        errors::GarchError,
    },
};
use ndarray::{Array1, Array2};

/// Purpose
/// -------
/// Daily closing prices from a GJR-GARCH-t process with realistic equity
/// parameters, starting at 100.
///
/// Returns
/// -------
/// - An undated `PriceSeries` of length `n + 1`.
fn synthetic_prices(n: usize, seed: u64) -> PriceSeries {
    let params = GarchParams::new(0.04, 0.03, 0.03, 0.03, 0.09, 0.88, 6.0)
        .expect("data-generating parameters should be admissible");
    let terminal = TerminalState { last_return: 0.0, last_resid: 0.0, last_sigma2: 1.0 };
    let opts = SimOpts::new(n, 1, Some(seed), SimStart::Cold { burn_in: 500 });
    let returns = simulate_paths(&params, &terminal, &VarianceGuards::default(), 100.0, &opts)
        .expect("simulation should succeed");
    let mut prices = Vec::with_capacity(n + 1);
    prices.push(100.0);
    let mut level: f64 = 100.0;
    for r in returns.row(0).iter() {
        level *= r.exp();
        prices.push(level);
    }
    PriceSeries::from_vec(prices).expect("synthetic prices are positive")
}

/// Route `tracing` events to the test writer (`RUST_LOG=info` to see them).
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Small, seeded run configuration.
fn small_config(seed: u64) -> RiskConfig {
    RiskConfig {
        horizon: 60,
        n_paths: 400,
        seed: Some(seed),
        ..RiskConfig::default()
    }
}

#[test]
// Purpose
// -------
// The return transform drops the first index and inverts exactly.
//
// Given
// -----
// - 50 synthetic prices.
//
// Expect
// ------
// - 49 returns; P0 · exp(cumsum(r / 100)) reproduces the prices.
fn return_transform_length_and_round_trip() {
    let prices = synthetic_prices(49, 5);

    let returns = prices.log_returns().expect("returns");

    assert_eq!(returns.len(), prices.len() - 1);
    let mut level = prices.prices()[0];
    for (t, r) in returns.data.iter().enumerate() {
        level *= (r / returns.scale).exp();
        assert_relative_eq!(level, prices.prices()[t + 1], max_relative = 1e-12);
    }
}

#[test]
// Purpose
// -------
// A full run produces consistent, reproducible risk statistics.
//
// Given
// -----
// - 1 500 synthetic returns; 400 paths × 60 days; seed 11, run twice.
//
// Expect
// ------
// - Identical reports; MDaR > 0; CED > MDaR; anchor equals the last price;
//   the rendered report and JSON record carry the statistics.
fn full_run_is_reproducible() {
    // Arrange
    init_tracing();
    let prices = synthetic_prices(1500, 2024);
    let config = small_config(11);

    // Act
    let a = run(&prices, &config).expect("first run");
    let b = run(&prices, &config).expect("second run");

    // Assert
    assert_eq!(a.risk, b.risk);
    assert_eq!(a.seed, 11);
    assert_eq!(a.anchor_price, prices.last_price());
    assert_eq!(a.risk.n_paths, 400);
    assert!(a.risk.mdar > 0.0);
    assert!(a.risk.ced > a.risk.mdar);
    assert!(a.risk.max_drawdown >= a.risk.ced);
    assert!(a.fit.converged);
    assert!(a.fit.rows.iter().all(|row| row.std_err.is_finite()));

    let text = a.to_string();
    assert!(text.contains(&format!("MDaR (95%): {:.2}", a.risk.mdar)));
    let record: serde_json::Value = serde_json::from_str(&a.to_json().expect("json")).expect("parse");
    assert_eq!(record["ticker"], "AAPL");
    assert_eq!(record["n_paths"], 400);
}

#[test]
// Purpose
// -------
// Fetching through a price source matches running on the same window.
//
// Given
// -----
// - 800 synthetic prices dated daily from 2018-01-01, start date
//   2018-03-01, ticker "SYN".
//
// Expect
// ------
// - `run_with_source` equals `run` on the filtered series; an unknown
//   ticker is a `Source` error.
fn run_with_source_uses_the_window() {
    // Arrange
    let raw = synthetic_prices(799, 77);
    let first = NaiveDate::from_ymd_opt(2018, 1, 1).expect("date");
    let dates: Vec<NaiveDate> =
        (0..raw.len() as u64).map(|d| first + chrono::Days::new(d)).collect();
    let dated = PriceSeries::new(raw.prices().clone(), Some(dates), SeriesMeta::new(Some("SYN".into())))
        .expect("dated series");
    let start = NaiveDate::from_ymd_opt(2018, 3, 1).expect("date");
    let source = InMemoryPriceSource::new().with_series("SYN", dated.clone());
    let config = RiskConfig {
        ticker: "SYN".into(),
        start_date: start,
        ..small_config(3)
    };

    // Act
    let via_source = run_with_source(&source, &config).expect("source run");
    let direct = run(&dated.since(start).expect("window"), &config).expect("direct run");

    // Assert
    assert_eq!(via_source.risk, direct.risk);
    assert_eq!(via_source.start_date, start);
    let missing = RiskConfig { ticker: "NOPE".into(), ..config };
    assert!(matches!(run_with_source(&source, &missing), Err(PipelineError::Source { .. })));
}

#[test]
// Purpose
// -------
// Flat price paths have zero drawdown, so MDaR is 0 and the tail is empty.
//
// Given
// -----
// - A 100 × 20 matrix of zero returns anchored at 50.
//
// Expect
// ------
// - All drawdowns 0; MDaR 0; CED → `EmptyTail`.
fn zero_variance_paths_have_zero_risk() {
    let returns = Array2::<f64>::zeros((100, 20));

    let prices = reconstruct_prices(returns.view(), 50.0).expect("prices");
    let drawdowns: Array1<f64> = path_drawdowns(prices.view());

    assert!(drawdowns.iter().all(|d| *d == 0.0));
    assert_eq!(mdar(drawdowns.view(), 0.95), Ok(0.0));
    assert!(matches!(ced(drawdowns.view(), 0.95), Err(RiskError::EmptyTail { .. })));
}

#[test]
// Purpose
// -------
// Invalid inputs fail with the documented errors before any estimation.
//
// Given
// -----
// - A single price; horizon = 0; α = 1.5.
//
// Expect
// ------
// - `InsufficientData`, `InvalidSimParameter`, `InvalidAlpha`.
fn invalid_inputs_surface_documented_errors() {
    let prices = synthetic_prices(100, 1);

    assert!(matches!(
        PriceSeries::from_vec(vec![100.0]),
        Err(GarchError::InsufficientData { len: 1, required: 2 })
    ));
    assert!(matches!(
        run(&prices, &RiskConfig { horizon: 0, ..small_config(1) }),
        Err(PipelineError::Garch(GarchError::InvalidSimParameter { name: "horizon", .. }))
    ));
    assert!(matches!(
        run(&prices, &RiskConfig { alpha: 1.5, ..small_config(1) }),
        Err(PipelineError::Risk(RiskError::InvalidAlpha { .. }))
    ));
}

#[test]
// Purpose
// -------
// `run` on a dated series estimates on the configured window only.
//
// Given
// -----
// - 700 synthetic prices dated daily from 2019-01-01 and a start date of
//   2019-04-01.
//
// Expect
// ------
// - The report equals the one produced from the pre-cut window; the fit
//   sample is the window's returns, not the full history.
fn run_applies_start_date_to_dated_prices() {
    // Arrange
    let raw = synthetic_prices(699, 31);
    let first = NaiveDate::from_ymd_opt(2019, 1, 1).expect("date");
    let dates: Vec<NaiveDate> =
        (0..raw.len() as u64).map(|d| first + chrono::Days::new(d)).collect();
    let dated = PriceSeries::new(raw.prices().clone(), Some(dates), SeriesMeta::default())
        .expect("dated series");
    let start = NaiveDate::from_ymd_opt(2019, 4, 1).expect("date");
    let config = RiskConfig { start_date: start, ..small_config(9) };
    let window = dated.since(start).expect("window");

    // Act
    let full = run(&dated, &config).expect("run on full history");
    let cut = run(&window, &config).expect("run on window");

    // Assert
    assert_eq!(full.risk, cut.risk);
    assert_eq!(full.fit.loglik, cut.fit.loglik);
    assert_eq!(full.fit.n_obs, cut.fit.n_obs);
    assert!(window.len() < dated.len());
    assert_eq!(full.anchor_price, window.last_price());
    assert_eq!(full.start_date, start);
}
