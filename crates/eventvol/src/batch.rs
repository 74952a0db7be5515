//! Batch evaluation of every (series, event) pair.

use crate::{
    Result,
    events::{DATE_FORMAT, EventTable},
    provider::PriceProvider,
    returns::ReturnSeries,
    volatility::{self, VolatilityRecord},
    window::{DEFAULT_WINDOW, EventWindow},
};
use chrono::NaiveDate;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Runs the event study over every (series, event) pair.
///
/// Series are processed in the order supplied and events within a series in
/// their declared order, so the results table is deterministic. Each series
/// is independent: an unavailable one contributes zero records and the
/// batch carries on with the rest.
#[derive(Debug, Clone)]
pub struct BatchAnalyzer {
    window: usize,
}

impl BatchAnalyzer {
    /// Analyzer with the default window of five trading observations.
    pub const fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }

    /// Analyzer with a custom window length.
    pub const fn with_window(window: usize) -> Self {
        Self { window }
    }

    /// Window length in trading observations.
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Run the study: fetch each series once, evaluate each of its events.
    pub fn analyze(&self, provider: &dyn PriceProvider, table: &EventTable) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for entry in &table.entries {
            let prices = match provider.daily_history(&entry.series) {
                Ok(prices) if !prices.is_empty() => prices,
                Ok(_) => {
                    tracing::warn!(series = %entry.series, "empty price history, skipping series");
                    report.unavailable_series.push(entry.series.clone());
                    continue;
                }
                Err(err) => {
                    tracing::warn!(series = %entry.series, error = %err, "series unavailable, skipping");
                    report.unavailable_series.push(entry.series.clone());
                    continue;
                }
            };
            if !prices.windows(2).all(|pair| pair[0].date < pair[1].date) {
                tracing::warn!(series = %entry.series, "price history not strictly ascending by date, skipping series");
                report.unavailable_series.push(entry.series.clone());
                continue;
            }

            let returns = ReturnSeries::from_prices(&prices)?;

            for event in &entry.events {
                let date = match NaiveDate::parse_from_str(&event.date, DATE_FORMAT) {
                    Ok(date) => date,
                    Err(err) => {
                        tracing::warn!(
                            series = %entry.series,
                            label = %event.label,
                            date = %event.date,
                            error = %err,
                            "unparseable event date, skipping event"
                        );
                        report.skipped_unparseable += 1;
                        continue;
                    }
                };

                let window = EventWindow::locate(returns.dates(), date, self.window);
                match volatility::window_change(&returns, &window) {
                    Some(change) => report.records.push(VolatilityRecord {
                        series: entry.series.clone(),
                        label: event.label.clone(),
                        date,
                        before_volatility: change.before,
                        after_volatility: change.after,
                        change: change.change,
                        change_pct: change.change_pct,
                    }),
                    None => {
                        tracing::debug!(
                            series = %entry.series,
                            label = %event.label,
                            "undefined or degenerate window volatility, skipping event"
                        );
                        report.skipped_degenerate += 1;
                    }
                }
            }
        }

        Ok(report)
    }
}

impl Default for BatchAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a batch run: the results table plus skip accounting.
///
/// Skipped events are counted, never recorded with placeholder values, so
/// "no events found" stays distinguishable from "events skipped".
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Recorded events in processing order.
    pub records: Vec<VolatilityRecord>,
    /// Events skipped because a window statistic was undefined or zero.
    pub skipped_degenerate: usize,
    /// Events skipped because their date string did not parse.
    pub skipped_unparseable: usize,
    /// Series skipped entirely because no usable price data was available.
    pub unavailable_series: Vec<String>,
}

impl BatchReport {
    /// Number of recorded events.
    pub fn recorded(&self) -> usize {
        self.records.len()
    }

    /// Number of events skipped for any reason.
    pub const fn skipped(&self) -> usize {
        self.skipped_degenerate + self.skipped_unparseable
    }

    /// Materialize the results table as a DataFrame.
    ///
    /// Columns: `series`, `label`, `date`, `before_volatility`,
    /// `after_volatility`, `change`, `change_pct`.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let df = df! {
            "series" => self.records.iter().map(|r| r.series.as_str()).collect::<Vec<_>>(),
            "label" => self.records.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
            "date" => self.records.iter().map(|r| r.date.to_string()).collect::<Vec<_>>(),
            "before_volatility" => self.records.iter().map(|r| r.before_volatility).collect::<Vec<_>>(),
            "after_volatility" => self.records.iter().map(|r| r.after_volatility).collect::<Vec<_>>(),
            "change" => self.records.iter().map(|r| r.change).collect::<Vec<_>>(),
            "change_pct" => self.records.iter().map(|r| r.change_pct).collect::<Vec<_>>(),
        }?;
        Ok(df)
    }

    /// Write the results table as CSV.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut df = self.to_dataframe()?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).finish(&mut df)?;
        Ok(())
    }
}
