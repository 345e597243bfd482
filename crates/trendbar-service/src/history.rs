//! Append-only bar history and its published snapshots.

use std::sync::Arc;
use trendbar_aggregate::ClosedBar;
use trendbar_types::{Bar, Instrument, Period, SeriesMap};

/// Bars of one `(instrument, period)` series, ordered by `open_at`.
///
/// Series are shared between the live store and published snapshots and are
/// only ever mutated through [`Arc::make_mut`], which copies a series that a
/// snapshot still references.
type Series = Arc<Vec<Bar>>;

/// Live, append-only store of committed bars.
///
/// Nothing is ever evicted: memory grows with every committed bar.
#[derive(Debug, Default)]
pub struct HistoryStore {
    series: SeriesMap<Series>,
    bar_count: usize,
    version: u64,
}

impl HistoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a committed bar to its series.
    ///
    /// Bars normally arrive in window order. A bar that arrives after a later
    /// window of the same series (two maintenance passes racing to the
    /// history lock) is inserted at its ordered position.
    pub fn append(&mut self, closed: ClosedBar) {
        let series = self
            .series
            .get_or_insert_with(&closed.instrument, closed.period, Series::default);
        let bars = Arc::make_mut(series);
        let bar = closed.bar;
        let at = bars.partition_point(|b| b.open_at <= bar.open_at);
        bars.insert(at, bar);
        self.bar_count += 1;
    }

    /// Returns the committed bars of a series.
    #[must_use]
    pub fn bars(&self, instrument: &Instrument, period: Period) -> &[Bar] {
        self.series
            .get(instrument, period)
            .map(|series| series.as_slice())
            .unwrap_or_default()
    }

    /// Total number of committed bars.
    #[must_use]
    pub const fn bar_count(&self) -> usize {
        self.bar_count
    }

    /// Builds the next immutable snapshot of the store.
    ///
    /// Each call bumps the version, so snapshots published in order carry
    /// strictly increasing versions.
    pub fn snapshot(&mut self) -> Snapshot {
        self.version += 1;
        Snapshot {
            series: self.series.clone(),
            bar_count: self.bar_count,
            version: self.version,
        }
    }
}

impl Extend<ClosedBar> for HistoryStore {
    fn extend<I: IntoIterator<Item = ClosedBar>>(&mut self, iter: I) {
        for closed in iter {
            self.append(closed);
        }
    }
}

/// Immutable view of committed history at one point in time.
///
/// A snapshot never changes after it is built, whatever the live store does
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    series: SeriesMap<Series>,
    bar_count: usize,
    version: u64,
}

impl Snapshot {
    /// Returns the bars of a series, ordered by `open_at`.
    #[must_use]
    pub fn bars(&self, instrument: &Instrument, period: Period) -> &[Bar] {
        self.series
            .get(instrument, period)
            .map(|series| series.as_slice())
            .unwrap_or_default()
    }

    /// Total number of bars in the snapshot.
    #[must_use]
    pub const fn bar_count(&self) -> usize {
        self.bar_count
    }

    /// Publication counter; `0` for the initial empty snapshot.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Instruments with at least one committed bar.
    pub fn instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.series.instruments()
    }
}
