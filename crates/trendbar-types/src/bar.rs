//! Committed OHLC bar.

use serde::{Deserialize, Serialize};

use crate::{Price, Timestamp};

/// A committed OHLC summary over one window.
///
/// Bars are only produced by freezing a bucket builder and are never mutated
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Price of the quote that opened the window.
    pub open_price: Price,
    /// Price of the last quote applied after the opening one.
    ///
    /// `None` when the window was closed before a second quote arrived.
    pub close_price: Option<Price>,
    /// Highest price seen inside the window.
    pub high_price: Price,
    /// Lowest price seen inside the window.
    pub low_price: Price,
    /// Window start (inclusive, unix seconds).
    pub open_at: Timestamp,
    /// Window end (exclusive, unix seconds).
    pub closed_at: Timestamp,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(
        open_price: Price,
        close_price: Option<Price>,
        high_price: Price,
        low_price: Price,
        open_at: Timestamp,
        closed_at: Timestamp,
    ) -> Self {
        Self {
            open_price,
            close_price,
            high_price,
            low_price,
            open_at,
            closed_at,
        }
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub const fn range(&self) -> Price {
        self.high_price - self.low_price
    }

    /// Returns the window length in seconds.
    #[must_use]
    pub const fn duration(&self) -> Timestamp {
        self.closed_at - self.open_at
    }

    /// Returns true if the close price is set and above the open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close_price.is_some_and(|close| close > self.open_price)
    }

    /// Returns true if the close price is set and below the open.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close_price.is_some_and(|close| close < self.open_price)
    }
}

impl std::fmt::Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}) O={} H={} L={} C=",
            self.open_at, self.closed_at, self.open_price, self.high_price, self.low_price
        )?;
        match self.close_price {
            Some(close) => write!(f, "{close}"),
            None => f.write_str("-"),
        }
    }
}
