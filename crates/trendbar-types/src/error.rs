//! Error types for trendbar.

use thiserror::Error;

use crate::{Instrument, Period, Timestamp};

/// Result type alias for trendbar operations.
pub type Result<T> = std::result::Result<T, TrendBarError>;

/// Errors raised by the aggregation engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrendBarError {
    /// A builder was updated with a timestamp outside its open window.
    ///
    /// The transition rules never produce this; seeing it means an engine
    /// invariant was broken.
    #[error(
        "Invalid update for {instrument} {period}: timestamp {timestamp} outside window [{open_at}, {valid_till})"
    )]
    InvalidUpdate {
        /// Instrument of the builder.
        instrument: Instrument,
        /// Period of the builder.
        period: Period,
        /// Timestamp of the rejected update.
        timestamp: Timestamp,
        /// Window start (inclusive).
        open_at: Timestamp,
        /// Window end (exclusive).
        valid_till: Timestamp,
    },
}

/// Error returned when parsing an invalid period string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid period '{0}', expected one of: m1, h1, d1")]
pub struct PeriodParseError(pub(crate) String);

/// Error returned when parsing an invalid instrument identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstrumentParseError {
    /// The identifier was empty or only whitespace.
    #[error("instrument identifier is empty")]
    Empty,

    /// The identifier contained inner whitespace.
    #[error("instrument identifier '{0}' contains whitespace")]
    Whitespace(String),
}
