//! Core types for the trendbar OHLC aggregation engine.
//!
//! This crate provides the fundamental data structures used throughout trendbar:
//!
//! - [`Quote`] - A single priced tick for an instrument
//! - [`Bar`] - A committed OHLC summary over one window
//! - [`Period`] - Fixed bar window duration
//! - [`Instrument`] - Traded instrument identifier
//! - [`TimeRange`] - Query range with the bar containment rule
//! - [`SeriesMap`] - Two-level `(instrument, period)` container

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/trendbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod error;
mod instrument;
mod period;
mod quote;
mod series;
mod time_range;

pub use bar::Bar;
pub use error::{InstrumentParseError, PeriodParseError, Result, TrendBarError};
pub use instrument::Instrument;
pub use period::Period;
pub use quote::{Price, Quote, Timestamp};
pub use series::SeriesMap;
pub use time_range::TimeRange;
