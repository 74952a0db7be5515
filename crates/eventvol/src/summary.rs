//! Aggregate statistics over a results table.

use crate::{Result, volatility::VolatilityRecord};
use polars::prelude::*;

/// Default number of top increases reported.
pub const DEFAULT_TOP_N: usize = 3;

/// Average percent change for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesAverage {
    /// Series identifier.
    pub series: String,
    /// Mean `change_pct` across the series' recorded events.
    pub avg_change_pct: f64,
}

/// Aggregate view of a results table.
///
/// Every field is derived from the records. On an empty table the mean and
/// median are reported as undefined rather than a computed zero, and the
/// collections are empty.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    /// Number of records summarized.
    pub total: usize,
    /// Mean percent change, undefined on an empty table.
    pub mean_change_pct: Option<f64>,
    /// Median percent change, undefined on an empty table.
    pub median_change_pct: Option<f64>,
    /// Records with a strictly positive percent change.
    pub increased: usize,
    /// Records with a strictly negative percent change; exact zeros count
    /// toward neither bucket.
    pub decreased: usize,
    /// Largest percent increases, ties kept in original table order.
    pub top: Vec<VolatilityRecord>,
    /// Per-series averages in first-seen order.
    pub by_series: Vec<SeriesAverage>,
}

impl Summary {
    /// Summarize `records` with the default top-N.
    pub fn from_records(records: &[VolatilityRecord]) -> Result<Self> {
        Self::with_top_n(records, DEFAULT_TOP_N)
    }

    /// Summarize `records`, keeping the `top_n` largest increases.
    pub fn with_top_n(records: &[VolatilityRecord], top_n: usize) -> Result<Self> {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            if record.change_pct > 0.0 {
                summary.increased += 1;
            } else if record.change_pct < 0.0 {
                summary.decreased += 1;
            }
        }

        // A stable sort keeps table order among tied percent changes.
        let mut ranked: Vec<&VolatilityRecord> = records.iter().collect();
        ranked.sort_by(|a, b| b.change_pct.total_cmp(&a.change_pct));
        summary.top = ranked.into_iter().take(top_n).cloned().collect();

        if records.is_empty() {
            return Ok(summary);
        }

        let df = df! {
            "series" => records.iter().map(|r| r.series.as_str()).collect::<Vec<_>>(),
            "change_pct" => records.iter().map(|r| r.change_pct).collect::<Vec<_>>(),
        }?;

        let aggregates = df
            .clone()
            .lazy()
            .select([
                col("change_pct").mean().alias("mean"),
                col("change_pct").median().alias("median"),
            ])
            .collect()?;
        summary.mean_change_pct = aggregates.column("mean")?.f64()?.get(0);
        summary.median_change_pct = aggregates.column("median")?.f64()?.get(0);

        let grouped = df
            .lazy()
            .group_by_stable([col("series")])
            .agg([col("change_pct").mean().alias("avg_change_pct")])
            .collect()?;
        let series = grouped.column("series")?.str()?;
        let averages = grouped.column("avg_change_pct")?.f64()?;
        for (series, avg) in series.into_iter().zip(averages) {
            if let (Some(series), Some(avg)) = (series, avg) {
                summary.by_series.push(SeriesAverage {
                    series: series.to_string(),
                    avg_change_pct: avg,
                });
            }
        }

        Ok(summary)
    }
}
