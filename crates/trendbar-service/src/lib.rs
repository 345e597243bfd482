//! Concurrent trend bar service for trendbar.
//!
//! This crate wires the windowing state machine into a thread-safe service:
//!
//! - [`TrendBarService`] - Quote ingestion, maintenance and history queries
//! - [`Snapshot`] - Immutable published view of committed history
//! - [`Clock`] - Injectable time source ([`SystemClock`], [`ManualClock`])
//! - [`ServiceConfig`] - Tracked periods and closing-quote policy

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/trendbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod config;
mod history;
mod query;
mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ServiceConfig;
pub use history::{HistoryStore, Snapshot};
pub use query::select_bars;
pub use service::{MaintenanceReport, TrendBarService};
pub use trendbar_aggregate::ClosingQuote;
