//! Registry of open bucket builders.

use serde::{Deserialize, Serialize};
use tracing::trace;
use trendbar_types::{Instrument, Period, Quote, Result, SeriesMap, Timestamp};

use crate::{BucketBuilder, ClosedBar};

/// What happens to the quote that closes a window.
///
/// A quote whose timestamp falls outside the open window freezes that window.
/// The policy decides whether the same quote then opens the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosingQuote {
    /// The quote only closes the window; its price is dropped for that
    /// period and the next window opens with the following quote.
    #[default]
    Discard,
    /// The quote closes the window and immediately opens the next one.
    Reseed,
}

/// Outcome of applying one quote to one `(instrument, period)` series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// No builder existed; a new window was opened at the quote.
    Opened,
    /// The quote fell inside the open window and updated it.
    Updated,
    /// The quote fell outside the open window, which was frozen.
    Closed(ClosedBar),
}

/// Owns every open [`BucketBuilder`], keyed by instrument and period.
///
/// Lifecycle per key: absent, open, frozen (removed), absent again.
#[derive(Debug)]
pub struct BuilderRegistry {
    builders: SeriesMap<BucketBuilder>,
    periods: Vec<Period>,
    closing_quote: ClosingQuote,
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::new(Period::all(), ClosingQuote::default())
    }
}

impl BuilderRegistry {
    /// Creates an empty registry tracking the given periods.
    ///
    /// Periods are processed in catalogue order regardless of the order given;
    /// duplicates are ignored.
    #[must_use]
    pub fn new(periods: &[Period], closing_quote: ClosingQuote) -> Self {
        let periods = Period::all()
            .iter()
            .copied()
            .filter(|p| periods.contains(p))
            .collect();
        Self {
            builders: SeriesMap::new(),
            periods,
            closing_quote,
        }
    }

    /// Returns the tracked periods in processing order.
    #[must_use]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Returns the closing-quote policy.
    #[must_use]
    pub const fn closing_quote(&self) -> ClosingQuote {
        self.closing_quote
    }

    /// Number of open builders.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.builders.len()
    }

    /// Returns true if no builder is open.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Returns the open builder for the key, if any.
    #[must_use]
    pub fn get(&self, instrument: &Instrument, period: Period) -> Option<&BucketBuilder> {
        self.builders.get(instrument, period)
    }

    /// Applies a quote to every tracked period, pushing frozen bars to `closed`.
    ///
    /// # Errors
    ///
    /// Propagates [`trendbar_types::TrendBarError::InvalidUpdate`] from the
    /// first period whose builder rejects the quote.
    pub fn apply(&mut self, quote: &Quote, closed: &mut Vec<ClosedBar>) -> Result<()> {
        for &period in &self.periods {
            let transition = advance(&mut self.builders, self.closing_quote, quote, period)?;
            if let Transition::Closed(bar) = transition {
                closed.push(bar);
            }
        }
        Ok(())
    }

    /// Applies a quote to a single `(instrument, period)` series.
    ///
    /// # Errors
    ///
    /// Returns [`trendbar_types::TrendBarError::InvalidUpdate`] if the open
    /// builder rejects the update. The builder is kept in that case.
    pub fn advance(&mut self, quote: &Quote, period: Period) -> Result<Transition> {
        advance(&mut self.builders, self.closing_quote, quote, period)
    }

    /// Freezes every builder whose window has elapsed at `now`.
    pub fn sweep(&mut self, now: Timestamp) -> Vec<ClosedBar> {
        self.builders
            .extract_if(|_, _, builder| builder.has_elapsed(now))
            .into_iter()
            .map(|(_, _, builder)| {
                let closed = builder.freeze();
                trace!(
                    instrument = %closed.instrument,
                    period = %closed.period,
                    open_at = closed.bar.open_at,
                    now,
                    "window closed by time"
                );
                closed
            })
            .collect()
    }
}

/// Applies `quote` to the `(instrument, period)` slot of `builders`.
fn advance(
    builders: &mut SeriesMap<BucketBuilder>,
    closing_quote: ClosingQuote,
    quote: &Quote,
    period: Period,
) -> Result<Transition> {
    let timestamp = quote.timestamp;

    match builders.remove(&quote.instrument, period) {
        Some(mut builder) if builder.is_open(timestamp) => {
            let updated = builder.update(quote.price, timestamp);
            builders.insert(quote.instrument.clone(), period, builder);
            updated.map(|()| Transition::Updated)
        }
        Some(builder) => {
            let closed = builder.freeze();
            trace!(
                instrument = %closed.instrument,
                period = %closed.period,
                open_at = closed.bar.open_at,
                trigger = timestamp,
                "window closed by quote"
            );
            if closing_quote == ClosingQuote::Reseed {
                builders.insert(
                    quote.instrument.clone(),
                    period,
                    BucketBuilder::open(quote, period),
                );
            }
            Ok(Transition::Closed(closed))
        }
        None => {
            builders.insert(
                quote.instrument.clone(),
                period,
                BucketBuilder::open(quote, period),
            );
            Ok(Transition::Opened)
        }
    }
}
