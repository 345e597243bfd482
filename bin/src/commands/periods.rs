//! Periods command implementation.

use trendbar_lib::prelude::*;

/// Print the period catalogue.
pub(crate) fn list_periods() {
    println!("{:<8} {:>10}", "PERIOD", "SECONDS");
    println!("{}", "-".repeat(19));
    for period in Period::all() {
        println!("{:<8} {:>10}", period.as_str(), period.seconds());
    }
}
