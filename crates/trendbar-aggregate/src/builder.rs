//! In-progress bucket builder.

use trendbar_types::{Bar, Instrument, Period, Price, Quote, Result, Timestamp, TrendBarError};

/// Accumulates quotes for one open `(instrument, period)` window.
///
/// The window is anchored at the quote that created the builder, not at a
/// clock boundary: it covers `[open_at, open_at + period)`. The end saturates
/// at [`Timestamp::MAX`], so windows opened within one period of it are short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketBuilder {
    instrument: Instrument,
    period: Period,
    open_price: Price,
    close_price: Option<Price>,
    high_price: Price,
    low_price: Price,
    open_at: Timestamp,
    valid_till: Timestamp,
}

impl BucketBuilder {
    /// Opens a new window seeded from `quote`.
    ///
    /// The opening quote sets open, high and low. The close price stays unset
    /// until a later quote updates the builder.
    #[must_use]
    pub fn open(quote: &Quote, period: Period) -> Self {
        Self {
            instrument: quote.instrument.clone(),
            period,
            open_price: quote.price,
            close_price: None,
            high_price: quote.price,
            low_price: quote.price,
            open_at: quote.timestamp,
            valid_till: quote.timestamp.saturating_add(period.seconds()),
        }
    }

    /// Returns true if `timestamp` falls inside `[open_at, valid_till)`.
    #[must_use]
    pub const fn is_open(&self, timestamp: Timestamp) -> bool {
        timestamp >= self.open_at && timestamp < self.valid_till
    }

    /// Returns true once `now` has reached the end of the window.
    #[must_use]
    pub const fn has_elapsed(&self, now: Timestamp) -> bool {
        now >= self.valid_till
    }

    /// Applies a price observed at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`TrendBarError::InvalidUpdate`] if `timestamp` is outside the
    /// open window; the builder is left untouched.
    pub fn update(&mut self, price: Price, timestamp: Timestamp) -> Result<()> {
        if !self.is_open(timestamp) {
            return Err(TrendBarError::InvalidUpdate {
                instrument: self.instrument.clone(),
                period: self.period,
                timestamp,
                open_at: self.open_at,
                valid_till: self.valid_till,
            });
        }
        self.high_price = self.high_price.max(price);
        self.low_price = self.low_price.min(price);
        self.close_price = Some(price);
        Ok(())
    }

    /// Returns the bar this builder would commit right now.
    #[must_use]
    pub const fn to_bar(&self) -> Bar {
        Bar::new(
            self.open_price,
            self.close_price,
            self.high_price,
            self.low_price,
            self.open_at,
            self.valid_till,
        )
    }

    /// Freezes the builder into an immutable bar.
    #[must_use]
    pub fn freeze(self) -> ClosedBar {
        let bar = self.to_bar();
        ClosedBar {
            instrument: self.instrument,
            period: self.period,
            bar,
        }
    }

    /// Returns the instrument of the window.
    #[must_use]
    pub const fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Returns the period of the window.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Returns the window start (inclusive).
    #[must_use]
    pub const fn open_at(&self) -> Timestamp {
        self.open_at
    }

    /// Returns the window end (exclusive).
    #[must_use]
    pub const fn valid_till(&self) -> Timestamp {
        self.valid_till
    }
}

/// A bar frozen out of a builder, tagged with its series key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedBar {
    /// Instrument the bar belongs to.
    pub instrument: Instrument,
    /// Period of the bar.
    pub period: Period,
    /// The committed bar.
    pub bar: Bar,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(price: Price, timestamp: Timestamp) -> Quote {
        Quote::new(Instrument::new("EURJPY"), price, timestamp)
    }

    #[test]
    fn test_open_seeds_prices() {
        let builder = BucketBuilder::open(&quote(300, 1000), Period::M1);
        let bar = builder.to_bar();

        assert_eq!(bar.open_price, 300);
        assert_eq!(bar.high_price, 300);
        assert_eq!(bar.low_price, 300);
        assert_eq!(bar.close_price, None);
        assert_eq!(bar.open_at, 1000);
        assert_eq!(bar.closed_at, 1060);
    }

    #[test]
    fn test_window_is_half_open() {
        let builder = BucketBuilder::open(&quote(300, 1000), Period::M1);

        assert!(!builder.is_open(999));
        assert!(builder.is_open(1000));
        assert!(builder.is_open(1059));
        assert!(!builder.is_open(1060));
        assert!(!builder.has_elapsed(1059));
        assert!(builder.has_elapsed(1060));
    }

    #[test]
    fn test_update_moves_high_low_outward() {
        let mut builder = BucketBuilder::open(&quote(300, 1000), Period::M1);
        builder.update(380, 1010).unwrap();
        builder.update(210, 1020).unwrap();
        builder.update(290, 1030).unwrap();

        let bar = builder.to_bar();
        assert_eq!(bar.open_price, 300);
        assert_eq!(bar.high_price, 380);
        assert_eq!(bar.low_price, 210);
        assert_eq!(bar.close_price, Some(290));
    }

    #[test]
    fn test_update_outside_window_is_rejected() {
        let mut builder = BucketBuilder::open(&quote(300, 1000), Period::M1);
        let before = builder.clone();

        let err = builder.update(999, 1060).unwrap_err();
        assert_eq!(
            err,
            TrendBarError::InvalidUpdate {
                instrument: Instrument::new("EURJPY"),
                period: Period::M1,
                timestamp: 1060,
                open_at: 1000,
                valid_till: 1060,
            }
        );
        assert!(builder.update(999, 999).is_err());
        assert_eq!(builder, before);
    }

    #[test]
    fn test_window_end_saturates() {
        let mut builder = BucketBuilder::open(&quote(300, Timestamp::MAX - 10), Period::D1);
        assert_eq!(builder.valid_till(), Timestamp::MAX);
        assert!(builder.valid_till() > builder.open_at());

        builder.update(310, Timestamp::MAX - 1).unwrap();
        assert!(!builder.is_open(Timestamp::MAX));
        assert!(builder.has_elapsed(Timestamp::MAX));

        let bar = builder.freeze().bar;
        assert_eq!(bar.duration(), 10);
        assert_eq!(bar.close_price, Some(310));
    }

    #[test]
    fn test_freeze_keeps_series_key() {
        let mut builder = BucketBuilder::open(&quote(100, 1000), Period::H1);
        builder.update(200, 1500).unwrap();

        let closed = builder.freeze();
        assert_eq!(closed.instrument, Instrument::new("EURJPY"));
        assert_eq!(closed.period, Period::H1);
        assert_eq!(closed.bar, Bar::new(100, Some(200), 200, 100, 1000, 4600));
    }
}
