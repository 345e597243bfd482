//! Quote (tick) representation.

use serde::{Deserialize, Serialize};

use crate::Instrument;

/// Price in integer units (pips, cents, points).
pub type Price = i64;

/// Unix timestamp in whole seconds.
pub type Timestamp = i64;

/// A single priced tick for an instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Instrument the quote belongs to.
    pub instrument: Instrument,
    /// Quoted price.
    pub price: Price,
    /// Time of the quote (unix seconds).
    pub timestamp: Timestamp,
}

impl Quote {
    /// Creates a new quote.
    #[must_use]
    pub const fn new(instrument: Instrument, price: Price, timestamp: Timestamp) -> Self {
        Self {
            instrument,
            price,
            timestamp,
        }
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} @ {}", self.instrument, self.price, self.timestamp)
    }
}
