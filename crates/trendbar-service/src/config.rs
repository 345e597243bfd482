//! Service configuration.

use serde::{Deserialize, Serialize};
use trendbar_aggregate::ClosingQuote;
use trendbar_types::Period;

/// Configuration for [`crate::TrendBarService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Periods to aggregate. Processed in catalogue order.
    pub periods: Vec<Period>,
    /// What to do with the quote that closes a window.
    pub closing_quote: ClosingQuote,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            periods: Period::all().to_vec(),
            closing_quote: ClosingQuote::Discard,
        }
    }
}

impl ServiceConfig {
    /// Sets the aggregated periods.
    #[must_use]
    pub fn with_periods(mut self, periods: impl Into<Vec<Period>>) -> Self {
        self.periods = periods.into();
        self
    }

    /// Sets the closing-quote policy.
    #[must_use]
    pub fn with_closing_quote(mut self, closing_quote: ClosingQuote) -> Self {
        self.closing_quote = closing_quote;
        self
    }
}
