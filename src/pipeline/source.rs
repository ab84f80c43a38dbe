//! Price sources: where the pipeline gets its history.
//!
//! [`PriceSource`] is the seam between the pipeline and any market-data
//! provider. The crate ships [`InMemoryPriceSource`], a map from ticker to a
//! prepared [`PriceSeries`], used for tests and for embedding the pipeline in
//! applications that load prices themselves.
use crate::{
    pipeline::errors::{PipelineError, PipelineResult},
    volatility::core::data::PriceSeries,
};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Provider of daily closing prices.
pub trait PriceSource {
    /// Prices for `ticker` from `start_date` (inclusive) to the latest date.
    ///
    /// # Errors
    /// `PipelineError::Source` when the ticker is unavailable, or data
    /// errors when the returned window is too short.
    fn fetch(&self, ticker: &str, start_date: NaiveDate) -> PipelineResult<PriceSeries>;
}

/// In-memory [`PriceSource`] keyed by ticker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryPriceSource {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the series for `ticker`.
    pub fn insert(&mut self, ticker: impl Into<String>, series: PriceSeries) {
        self.series.insert(ticker.into(), series);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_series(mut self, ticker: impl Into<String>, series: PriceSeries) -> Self {
        self.insert(ticker, series);
        self
    }
}

impl PriceSource for InMemoryPriceSource {
    /// Dated series are cut at `start_date`; undated series are returned
    /// whole.
    fn fetch(&self, ticker: &str, start_date: NaiveDate) -> PipelineResult<PriceSeries> {
        let series = self.series.get(ticker).ok_or_else(|| PipelineError::Source {
            ticker: ticker.to_string(),
            reason: "ticker not available".to_string(),
        })?;
        Ok(series.since(start_date)?)
    }
}
