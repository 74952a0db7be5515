//! Period-over-period return series derived from closing prices.

use crate::{Result, provider::PricePoint};
use chrono::NaiveDate;
use polars::prelude::*;
use std::ops::Range;

/// Relative-change sequence derived from a series of daily closes.
///
/// The value at position `i` is `close[i] / close[i-1] - 1`. The first
/// position has no prior close and is undefined; a division against a zero
/// close is likewise undefined. Undefined entries stay in the sequence as
/// nulls so positions line up with the date index.
#[derive(Debug, Clone)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    returns: Float64Chunked,
}

impl ReturnSeries {
    /// Derive the return series from an ordered price history.
    ///
    /// Computed once per series and reused for every event on it.
    pub fn from_prices(prices: &[PricePoint]) -> Result<Self> {
        let dates: Vec<NaiveDate> = prices.iter().map(|p| p.date).collect();
        let closes: Vec<f64> = prices.iter().map(|p| p.close).collect();

        let computed = df! { "close" => closes }?
            .lazy()
            .with_column(col("close").shift(lit(1)).alias("close_lag"))
            .with_column(((col("close") - col("close_lag")) / col("close_lag")).alias("return"))
            .with_column(
                when(col("return").is_finite())
                    .then(col("return"))
                    .otherwise(lit(NULL))
                    .alias("return"),
            )
            .collect()?;

        let returns = computed.column("return")?.f64()?.clone();
        Ok(Self { dates, returns })
    }

    /// Number of observations, equal to the input length.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The ascending date index the returns are aligned to.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Return value at `index`, or `None` where it is undefined.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.returns.get(index)
    }

    /// Sample standard deviation of the defined returns inside `range`.
    ///
    /// Undefined entries are excluded from the statistic; fewer than two
    /// usable points leave it undefined.
    pub fn window_std(&self, range: &Range<usize>) -> Option<f64> {
        if range.start >= range.end || range.end > self.len() {
            return None;
        }
        let sliced = self.returns.slice(range.start as i64, range.end - range.start);
        if sliced.len() - sliced.null_count() < 2 {
            return None;
        }
        sliced.std(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Days;

    fn prices(closes: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| PricePoint {
                date: start.checked_add_days(Days::new(i as u64)).unwrap(),
                close: *close,
            })
            .collect()
    }

    #[test]
    fn test_round_trip_against_closes() {
        let closes = [100.0, 102.0, 101.0, 105.0, 110.0];
        let series = ReturnSeries::from_prices(&prices(&closes)).unwrap();

        assert_eq!(series.len(), closes.len());
        assert_eq!(series.value(0), None);
        for i in 1..closes.len() {
            let ret = series.value(i).unwrap();
            assert_relative_eq!(closes[i - 1] * (1.0 + ret), closes[i], max_relative = 1e-12);
        }
    }

    #[test]
    fn test_zero_close_propagates_as_undefined() {
        let series = ReturnSeries::from_prices(&prices(&[100.0, 0.0, 50.0])).unwrap();

        // The drop to zero is a defined -100% return; the division against
        // the zero close is not.
        assert_relative_eq!(series.value(1).unwrap(), -1.0, max_relative = 1e-12);
        assert_eq!(series.value(2), None);
    }

    #[test]
    fn test_single_observation() {
        let series = ReturnSeries::from_prices(&prices(&[100.0])).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.value(0), None);
    }

    #[test]
    fn test_window_std_excludes_undefined() {
        let series = ReturnSeries::from_prices(&prices(&[100.0, 102.0, 101.0, 105.0])).unwrap();

        // Range covering the undefined first entry still uses only the
        // three defined returns.
        let full = series.window_std(&(0..4)).unwrap();
        let defined = series.window_std(&(1..4)).unwrap();
        assert_relative_eq!(full, defined, max_relative = 1e-12);
    }

    #[test]
    fn test_window_std_undefined_cases() {
        let series = ReturnSeries::from_prices(&prices(&[100.0, 102.0, 101.0, 105.0])).unwrap();

        // Empty range, single usable point, only the undefined entry.
        assert_eq!(series.window_std(&(2..2)), None);
        assert_eq!(series.window_std(&(1..2)), None);
        assert_eq!(series.window_std(&(0..1)), None);
    }
}
