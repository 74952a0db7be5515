//! Event table input: labeled, dated occurrences attached to series.

use crate::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Date format for event dates and price files.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A labeled event with its calendar date, still in wire form.
///
/// The date stays a string until the batch run parses it, so a malformed
/// date skips that one event instead of failing table deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    /// Human-readable event label.
    pub label: String,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
}

/// All events declared for one series, in supplied order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesEvents {
    /// Series identifier the events belong to.
    pub series: String,
    /// Events in the order they should be processed.
    pub events: Vec<EventSpec>,
}

/// Ordered mapping from series identifier to its labeled events.
///
/// Passed to the analyzer as an explicit value rather than read from
/// module state, so synthetic tables can be supplied in tests. The JSON
/// document form is an array of per-series objects; an array keeps the
/// supplied order, which is observable in the results table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTable {
    /// Per-series event declarations in supplied order.
    pub entries: Vec<SeriesEvents>,
}

impl EventTable {
    /// Build a table from per-series entries.
    pub const fn new(entries: Vec<SeriesEvents>) -> Self {
        Self { entries }
    }

    /// Parse a table from its JSON document form.
    ///
    /// A document that does not match the expected shape is a structural
    /// failure and aborts the run.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AnalysisError::MalformedEventTable(e.to_string()))
    }

    /// Number of series entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of declared events across all series.
    pub fn event_count(&self) -> usize {
        self.entries.iter().map(|e| e.events.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "series": "AAPL",
            "events": [
                {"label": "iPhone 15 Launch", "date": "2023-09-12"},
                {"label": "Q1 2024 Earnings Beat", "date": "2024-02-01"}
            ]
        },
        {
            "series": "TSLA",
            "events": [
                {"label": "Cybertruck Delivery Event", "date": "2023-11-30"}
            ]
        }
    ]"#;

    #[test]
    fn test_from_json_preserves_order() {
        let table = EventTable::from_json(SAMPLE).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.event_count(), 3);
        assert_eq!(table.entries[0].series, "AAPL");
        assert_eq!(table.entries[0].events[0].label, "iPhone 15 Launch");
        assert_eq!(table.entries[0].events[1].date, "2024-02-01");
        assert_eq!(table.entries[1].series, "TSLA");
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        let err = EventTable::from_json(r#"{"AAPL": "2023-09-12"}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedEventTable(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let table = EventTable::from_json(SAMPLE).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        let back = EventTable::from_json(&json).unwrap();
        assert_eq!(table, back);
    }

    #[test]
    fn test_empty_table() {
        let table = EventTable::default();
        assert!(table.is_empty());
        assert_eq!(table.event_count(), 0);
    }
}
