//! Price acquisition seam.
//!
//! The core never fetches data itself: a [`PriceProvider`] hands it the
//! full daily history for one series identifier, or signals that the
//! series is unavailable. Any provider failure makes the series an empty
//! contribution to the batch; it never aborts the run.

use crate::events::DATE_FORMAT;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// A single daily observation of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading session date.
    pub date: NaiveDate,
    /// Closing price for the session.
    pub close: f64,
}

/// Errors from price acquisition.
///
/// Each of these makes the affected series unavailable; the batch skips
/// it and carries on with the remaining series.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider has no data for the series
    #[error("no data for series: {0}")]
    NoData(String),

    /// Price data exists but cannot be interpreted
    #[error("malformed price data for {series}: {reason}")]
    Malformed {
        /// Series identifier
        series: String,
        /// What failed to parse
        reason: String,
    },

    /// I/O failure while reading price data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error while reading price data
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Source of daily price history, one series at a time.
pub trait PriceProvider: Send + Sync {
    /// Full daily history for `series`, ascending by date.
    fn daily_history(&self, series: &str) -> Result<Vec<PricePoint>, ProviderError>;
}

/// In-memory provider backed by a map, for tests and embedded datasets.
#[derive(Debug, Clone, Default)]
pub struct MemoryPriceProvider {
    data: HashMap<String, Vec<PricePoint>>,
}

impl MemoryPriceProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the history for a series, replacing any existing one.
    pub fn insert(&mut self, series: impl Into<String>, mut history: Vec<PricePoint>) {
        history.sort_by_key(|p| p.date);
        self.data.insert(series.into(), history);
    }
}

impl PriceProvider for MemoryPriceProvider {
    fn daily_history(&self, series: &str) -> Result<Vec<PricePoint>, ProviderError> {
        self.data
            .get(series)
            .cloned()
            .ok_or_else(|| ProviderError::NoData(series.to_string()))
    }
}

/// Provider reading one `<series>.csv` file per series from a directory.
///
/// Files carry `date,close` columns with `YYYY-MM-DD` dates. Rows are
/// sorted by date on read, so unordered exports are accepted.
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    dir: PathBuf,
}

impl CsvPriceProvider {
    /// Create a provider rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, series: &str) -> PathBuf {
        self.dir.join(format!("{series}.csv"))
    }
}

impl PriceProvider for CsvPriceProvider {
    fn daily_history(&self, series: &str) -> Result<Vec<PricePoint>, ProviderError> {
        let path = self.path_for(series);
        if !path.exists() {
            return Err(ProviderError::NoData(series.to_string()));
        }

        let df = CsvReadOptions::default()
            .try_into_reader_with_file_path(Some(path))?
            .finish()?
            .lazy()
            .select([
                col("date").cast(DataType::String),
                col("close").cast(DataType::Float64),
            ])
            .collect()?;

        let dates = df.column("date")?.str()?;
        let closes = df.column("close")?.f64()?;

        let mut history = Vec::with_capacity(df.height());
        for (date, close) in dates.into_iter().zip(closes) {
            let (Some(date), Some(close)) = (date, close) else {
                return Err(ProviderError::Malformed {
                    series: series.to_string(),
                    reason: "missing date or close value".to_string(),
                });
            };
            let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|e| {
                ProviderError::Malformed {
                    series: series.to_string(),
                    reason: e.to_string(),
                }
            })?;
            history.push(PricePoint { date, close });
        }
        history.sort_by_key(|p| p.date);
        Ok(history)
    }
}
