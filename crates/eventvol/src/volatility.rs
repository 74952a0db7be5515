//! Before/after volatility change evaluation for a single event.

use crate::{returns::ReturnSeries, window::EventWindow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Change in window volatility across an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityChange {
    /// Sample standard deviation of returns before the event.
    pub before: f64,
    /// Sample standard deviation of returns from the event onward.
    pub after: f64,
    /// Absolute change, `after - before`.
    pub change: f64,
    /// Relative change in percent, `change / before * 100`.
    pub change_pct: f64,
}

/// One recorded event outcome in the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityRecord {
    /// Series identifier the event belongs to.
    pub series: String,
    /// Event label.
    pub label: String,
    /// Event date.
    pub date: NaiveDate,
    /// Window volatility before the event.
    pub before_volatility: f64,
    /// Window volatility after the event.
    pub after_volatility: f64,
    /// Absolute volatility change.
    pub change: f64,
    /// Percent volatility change relative to the before-window.
    pub change_pct: f64,
}

/// Evaluate the volatility change across `window`.
///
/// Returns `None` unless both window statistics are defined and strictly
/// positive. A window whose usable returns are all equal has a standard
/// deviation of exactly zero, which makes the percent change meaningless;
/// such events are skipped rather than recorded with a substituted value.
pub fn window_change(returns: &ReturnSeries, window: &EventWindow) -> Option<VolatilityChange> {
    let before = returns.window_std(&window.before)?;
    let after = returns.window_std(&window.after)?;
    if !(before.is_finite() && before > 0.0 && after.is_finite() && after > 0.0) {
        return None;
    }
    let change = after - before;
    Some(VolatilityChange {
        before,
        after,
        change,
        change_pct: change / before * 100.0,
    })
}
