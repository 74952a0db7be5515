//! Alignment of calendar dates onto a trading-day index.

use chrono::NaiveDate;
use std::ops::Range;

/// Default number of trading observations on each side of an event.
pub const DEFAULT_WINDOW: usize = 5;

/// Clipped observation ranges flanking an event date.
///
/// `anchor` is the insertion position of the event date in the ascending
/// date index: the smallest index whose date is on or after the event, or
/// the index length when every date precedes it. The before-range covers up
/// to `window + 1` observations strictly before the anchor; the after-range
/// up to `window` observations starting at it. Both are clipped at the
/// series boundaries and either may be empty — rejecting an empty window is
/// the evaluator's job, not this one's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventWindow {
    /// Insertion position of the event date in the date index.
    pub anchor: usize,
    /// Half-open range of observations preceding the anchor.
    pub before: Range<usize>,
    /// Half-open range of observations from the anchor onward.
    pub after: Range<usize>,
}

impl EventWindow {
    /// Locate the windows for `event` within an ascending `dates` index.
    pub fn locate(dates: &[NaiveDate], event: NaiveDate, window: usize) -> Self {
        let anchor = dates.partition_point(|d| *d < event);
        Self {
            anchor,
            before: anchor.saturating_sub(window + 1)..anchor,
            after: anchor..(anchor + window).min(dates.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use rstest::rstest;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| start.checked_add_days(Days::new(i as u64)).unwrap())
            .collect()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[rstest]
    // Event date present in the index: anchor points at it.
    #[case(day(6), 5, 0..5, 5..9)]
    // Before the first entry: before-range empty.
    #[case(day(1), 0, 0..0, 0..4)]
    // After the last entry: after-range empty.
    #[case(day(20), 10, 5..10, 10..10)]
    fn test_locate(
        #[case] event: NaiveDate,
        #[case] anchor: usize,
        #[case] before: Range<usize>,
        #[case] after: Range<usize>,
    ) {
        let window = EventWindow::locate(&dates(10), event, 4);
        assert_eq!(window.anchor, anchor);
        assert_eq!(window.before, before);
        assert_eq!(window.after, after);
    }

    #[test]
    fn test_absent_date_anchors_on_next_observation() {
        // Trading index with a weekend gap: Jan 5 is followed by Jan 8.
        let index: Vec<NaiveDate> = [1, 2, 3, 4, 5, 8, 9, 10].map(day).to_vec();
        let window = EventWindow::locate(&index, day(6), 4);
        assert_eq!(window.anchor, 5);
        assert_eq!(window.before, 0..5);
        assert_eq!(window.after, 5..8);
    }

    #[test]
    fn test_anchor_monotonic_in_event_date() {
        let index = dates(10);
        let mut last = 0;
        for offset in 0..15 {
            let event = day(1).checked_add_days(Days::new(offset)).unwrap();
            let anchor = EventWindow::locate(&index, event, 5).anchor;
            assert!(anchor >= last);
            last = anchor;
        }
    }

    #[test]
    fn test_range_length_bounds() {
        let index = dates(12);
        let w = 5;
        for offset in 0..20 {
            let event = day(1).checked_add_days(Days::new(offset)).unwrap();
            let window = EventWindow::locate(&index, event, w);
            assert!(window.before.len() <= w + 1);
            assert!(window.after.len() <= w);
            // Empty ranges only at the respective boundary.
            assert_eq!(window.before.is_empty(), window.anchor == 0);
            assert_eq!(window.after.is_empty(), window.anchor == index.len());
        }
    }

    #[test]
    fn test_empty_index() {
        let window = EventWindow::locate(&[], day(5), 5);
        assert_eq!(window.anchor, 0);
        assert!(window.before.is_empty());
        assert!(window.after.is_empty());
    }
}
