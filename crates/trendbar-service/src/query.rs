//! Read path over published snapshots.

use trendbar_types::{Bar, Instrument, Period, TimeRange};

use crate::Snapshot;

/// Selects the bars of a series that lie entirely inside `range`.
///
/// Series are ordered by `open_at` and all bars of a series share one
/// duration, so both window bounds are monotonic: the scan starts at the
/// first bar opening at or after `range.from` and stops at the first bar
/// closing after `range.to`.
#[must_use]
pub fn select_bars(
    snapshot: &Snapshot,
    instrument: &Instrument,
    period: Period,
    range: TimeRange,
) -> Vec<Bar> {
    if range.is_empty() {
        return Vec::new();
    }
    let bars = snapshot.bars(instrument, period);
    let start = bars.partition_point(|bar| bar.open_at < range.from);
    bars[start..]
        .iter()
        .take_while(|bar| bar.closed_at <= range.to)
        .copied()
        .collect()
}

impl Snapshot {
    /// Returns the bars of a series that lie entirely inside `range`.
    #[must_use]
    pub fn history(&self, instrument: &Instrument, period: Period, range: TimeRange) -> Vec<Bar> {
        select_bars(self, instrument, period, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HistoryStore;
    use trendbar_aggregate::ClosedBar;

    fn snapshot_with(open_times: &[i64]) -> Snapshot {
        let mut store = HistoryStore::new();
        store.extend(open_times.iter().map(|&open_at| ClosedBar {
            instrument: Instrument::new("EURJPY"),
            period: Period::M1,
            bar: Bar::new(1, Some(1), 1, 1, open_at, open_at + 60),
        }));
        store.snapshot()
    }

    fn select(snapshot: &Snapshot, from: i64, to: i64) -> Vec<i64> {
        select_bars(
            snapshot,
            &Instrument::new("EURJPY"),
            Period::M1,
            TimeRange::new(from, to),
        )
        .iter()
        .map(|bar| bar.open_at)
        .collect()
    }

    #[test]
    fn test_only_fully_contained_bars() {
        let snapshot = snapshot_with(&[1000, 1061, 1200]);

        assert_eq!(select(&snapshot, 900, 1500), vec![1000, 1061, 1200]);
        assert_eq!(select(&snapshot, 1000, 1121), vec![1000, 1061]);
        assert_eq!(select(&snapshot, 1001, 1260), vec![1061, 1200]);
        assert_eq!(select(&snapshot, 1050, 1080), Vec::<i64>::new());
    }

    #[test]
    fn test_ranges_outside_history() {
        let snapshot = snapshot_with(&[1000, 1061]);

        assert!(select(&snapshot, 0, 999).is_empty());
        assert!(select(&snapshot, 1200, 1300).is_empty());
        assert!(select(&snapshot, 1500, 900).is_empty());
    }

    #[test]
    fn test_unknown_series() {
        let snapshot = snapshot_with(&[1000]);
        let bars = snapshot.history(
            &Instrument::new("EURUSD"),
            Period::M1,
            TimeRange::new(0, i64::MAX),
        );
        assert!(bars.is_empty());
        assert!(
            snapshot
                .history(&Instrument::new("EURJPY"), Period::H1, TimeRange::new(0, i64::MAX))
                .is_empty()
        );
    }
}
