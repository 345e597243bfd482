//! The concurrent trend bar service.

use arc_swap::ArcSwap;
use crossbeam_queue::SegQueue;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error};
use trendbar_aggregate::BuilderRegistry;
use trendbar_types::{Bar, Instrument, Period, Price, Quote, Result, TimeRange, Timestamp};

use crate::{Clock, HistoryStore, ServiceConfig, Snapshot, SystemClock};

/// Outcome of one maintenance pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaintenanceReport {
    /// Quotes removed from the ingestion queue.
    pub quotes_drained: usize,
    /// Bars frozen because a quote fell outside their window.
    pub closed_by_quote: usize,
    /// Bars frozen because their window elapsed.
    pub closed_by_time: usize,
    /// Version of the snapshot published by the pass.
    pub snapshot_version: u64,
}

impl MaintenanceReport {
    /// Total bars committed by the pass.
    #[must_use]
    pub const fn bars_committed(&self) -> usize {
        self.closed_by_quote + self.closed_by_time
    }
}

/// Aggregates quotes into OHLC bars and serves history.
///
/// - [`feed`](Self::feed) only pushes onto a lock-free queue.
/// - [`run_maintenance`](Self::run_maintenance) drains the queue into the
///   builder registry under the builders lock, then appends the frozen bars
///   and publishes a new [`Snapshot`] under the separate history lock.
/// - [`history`](Self::history) reads the latest published snapshot and
///   takes no lock.
///
/// The service never schedules maintenance itself; callers decide how often
/// and from how many threads to run it. Committed history is never evicted.
#[derive(Debug)]
pub struct TrendBarService {
    clock: Arc<dyn Clock>,
    periods: Vec<Period>,
    quotes: SegQueue<Quote>,
    builders: Mutex<BuilderRegistry>,
    history: Mutex<HistoryStore>,
    published: ArcSwap<Snapshot>,
}

impl Default for TrendBarService {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendBarService {
    /// Creates a service with the default configuration and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default(), Arc::new(SystemClock))
    }

    /// Creates a service with the default configuration and the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_config(ServiceConfig::default(), clock)
    }

    /// Creates a service from a configuration and a clock.
    #[must_use]
    pub fn with_config(config: ServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let registry = BuilderRegistry::new(&config.periods, config.closing_quote);
        debug!(
            periods = ?registry.periods(),
            closing_quote = ?registry.closing_quote(),
            "trend bar service created"
        );
        Self {
            clock,
            periods: registry.periods().to_vec(),
            quotes: SegQueue::new(),
            builders: Mutex::new(registry),
            history: Mutex::new(HistoryStore::new()),
            published: ArcSwap::from_pointee(Snapshot::default()),
        }
    }

    /// Periods aggregated by this service, in processing order.
    #[must_use]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Enqueues a quote observed at `timestamp`.
    ///
    /// Never blocks. The queue is unbounded.
    pub fn feed(&self, instrument: impl Into<Instrument>, price: Price, timestamp: Timestamp) {
        self.quotes.push(Quote::new(instrument.into(), price, timestamp));
    }

    /// Enqueues a quote stamped with the current clock time.
    pub fn feed_now(&self, instrument: impl Into<Instrument>, price: Price) {
        self.feed(instrument, price, self.clock.now());
    }

    /// Enqueues an already built quote.
    pub fn feed_quote(&self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// Returns committed bars of a series lying entirely inside `[from, to]`.
    ///
    /// Reads the latest published snapshot only; bars still being built are
    /// never returned.
    #[must_use]
    pub fn history(
        &self,
        instrument: &Instrument,
        period: Period,
        from: Timestamp,
        to: Timestamp,
    ) -> Vec<Bar> {
        self.published
            .load()
            .history(instrument, period, TimeRange::new(from, to))
    }

    /// Like [`history`](Self::history) with `to` set to the current time.
    #[must_use]
    pub fn history_until_now(
        &self,
        instrument: &Instrument,
        period: Period,
        from: Timestamp,
    ) -> Vec<Bar> {
        self.history(instrument, period, from, self.clock.now())
    }

    /// Returns the latest published snapshot.
    ///
    /// Holding the returned handle gives a stable view across several queries.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.published.load_full()
    }

    /// Number of quotes waiting for the next maintenance pass.
    #[must_use]
    pub fn pending_quotes(&self) -> usize {
        self.quotes.len()
    }

    /// Number of windows currently being built.
    #[must_use]
    pub fn open_builders(&self) -> usize {
        self.builders.lock().len()
    }

    /// Drains pending quotes, closes finished windows and publishes history.
    ///
    /// The pass runs in two disjoint critical sections:
    ///
    /// 1. Under the builders lock: drain the queue, applying every quote to
    ///    the registry, then freeze every window that has elapsed at the
    ///    current clock time.
    /// 2. Under the history lock: append the frozen bars and publish a new
    ///    snapshot.
    ///
    /// Concurrent passes are safe. Once this returns, every bar it froze is
    /// visible to later [`history`](Self::history) calls.
    ///
    /// # Errors
    ///
    /// Returns [`trendbar_types::TrendBarError::InvalidUpdate`] if a builder
    /// rejects a quote. The pass stops at that quote and publishes nothing:
    /// bars already frozen earlier in the same pass have left the registry
    /// and are lost with it, and the quotes still queued stay for the next
    /// pass. The transition rules never reach this state.
    pub fn run_maintenance(&self) -> Result<MaintenanceReport> {
        let mut report = MaintenanceReport::default();
        let mut closed = Vec::new();

        {
            let mut builders = self.builders.lock();
            while let Some(quote) = self.quotes.pop() {
                report.quotes_drained += 1;
                if let Err(err) = builders.apply(&quote, &mut closed) {
                    error!(%err, quote = %quote, "maintenance pass aborted");
                    return Err(err);
                }
            }
            report.closed_by_quote = closed.len();

            let now = self.clock.now();
            closed.extend(builders.sweep(now));
            report.closed_by_time = closed.len() - report.closed_by_quote;
        }

        {
            let mut history = self.history.lock();
            history.extend(closed);
            let snapshot = history.snapshot();
            report.snapshot_version = snapshot.version();
            self.published.store(Arc::new(snapshot));
        }

        debug!(
            drained = report.quotes_drained,
            closed_by_quote = report.closed_by_quote,
            closed_by_time = report.closed_by_time,
            version = report.snapshot_version,
            "maintenance pass complete"
        );
        Ok(report)
    }
}
