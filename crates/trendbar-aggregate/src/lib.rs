//! Windowed OHLC bucket builders for trendbar.
//!
//! This crate provides the windowing state machine:
//!
//! - [`BucketBuilder`] - Accumulator for one open `(instrument, period)` window
//! - [`BuilderRegistry`] - Owner of all open builders and their transitions
//! - [`ClosedBar`] - A frozen bar tagged with its series key
//! - [`ClosingQuote`] - Policy for the quote that closes a window

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/trendbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod registry;

pub use builder::{BucketBuilder, ClosedBar};
pub use registry::{BuilderRegistry, ClosingQuote, Transition};
