//! Concurrent OHLC trend bar aggregation from streaming quotes.
//!
//! This is a facade crate that re-exports functionality from the trendbar
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use trendbar_lib::prelude::*;
//!
//! let service = Arc::new(TrendBarService::new());
//!
//! let maintainer = Arc::clone(&service);
//! std::thread::spawn(move || loop {
//!     if let Err(err) = maintainer.run_maintenance() {
//!         eprintln!("maintenance failed: {err}");
//!     }
//!     std::thread::sleep(Duration::from_millis(100));
//! });
//!
//! service.feed_now("EURUSD", 108_512);
//! let bars = service.history_until_now(&Instrument::new("EURUSD"), Period::M1, 0);
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/trendbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use trendbar_types::*;

// Re-export the windowing state machine
#[cfg(feature = "aggregate")]
pub use trendbar_aggregate::{BucketBuilder, BuilderRegistry, ClosedBar, ClosingQuote, Transition};

// Re-export the service
#[cfg(feature = "service")]
pub use trendbar_service::{
    Clock, HistoryStore, MaintenanceReport, ManualClock, ServiceConfig, Snapshot, SystemClock,
    TrendBarService, select_bars,
};

/// Prelude module for convenient imports.
///
/// ```
/// use trendbar_lib::prelude::*;
/// ```
pub mod prelude {
    pub use trendbar_types::{
        Bar, Instrument, Period, Price, Quote, Result, TimeRange, Timestamp, TrendBarError,
    };

    #[cfg(feature = "aggregate")]
    pub use trendbar_aggregate::{ClosedBar, ClosingQuote};

    #[cfg(feature = "service")]
    pub use trendbar_service::{
        Clock, MaintenanceReport, ManualClock, ServiceConfig, Snapshot, SystemClock,
        TrendBarService,
    };
}
