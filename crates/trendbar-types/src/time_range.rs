//! Query time ranges.

use crate::{Bar, Timestamp};

/// A closed range of unix-second timestamps used to select bars.
///
/// Inverted ranges (`from > to`) are allowed and simply match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    /// Earliest accepted window start.
    pub from: Timestamp,
    /// Latest accepted window end.
    pub to: Timestamp,
}

impl TimeRange {
    /// Creates a new range.
    #[must_use]
    pub const fn new(from: Timestamp, to: Timestamp) -> Self {
        Self { from, to }
    }

    /// Returns true if the bar lies entirely inside the range.
    ///
    /// A bar that started before `from` or closes after `to` is rejected even
    /// when it overlaps the range.
    #[must_use]
    pub const fn contains_bar(&self, bar: &Bar) -> bool {
        bar.open_at >= self.from && bar.closed_at <= self.to
    }

    /// Returns true if no bar can satisfy the range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.from > self.to
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}
