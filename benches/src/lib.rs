//! Benchmark utilities for trendbar.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trendbar_lib::{Instrument, Quote, Timestamp};

/// Shape of a synthetic quote stream.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Number of distinct instruments.
    pub instruments: usize,
    /// Total number of quotes.
    pub quotes: usize,
    /// Largest gap between consecutive quotes, in seconds.
    pub max_step: Timestamp,
    /// RNG seed.
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            instruments: 8,
            quotes: 100_000,
            max_step: 5,
            seed: 42,
        }
    }
}

impl WorkloadConfig {
    /// Sets the number of quotes.
    #[must_use]
    pub const fn with_quotes(mut self, quotes: usize) -> Self {
        self.quotes = quotes;
        self
    }

    /// Sets the number of instruments.
    #[must_use]
    pub const fn with_instruments(mut self, instruments: usize) -> Self {
        self.instruments = instruments;
        self
    }
}

/// Generates a random-walk quote stream with non-decreasing timestamps.
pub fn generate_quotes(config: &WorkloadConfig) -> Vec<Quote> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let instruments: Vec<Instrument> = (0..config.instruments.max(1))
        .map(|i| Instrument::new(format!("SYM{i:03}")))
        .collect();
    let mut prices = vec![10_000_i64; instruments.len()];
    let mut timestamp: Timestamp = 1_700_000_000;

    (0..config.quotes)
        .map(|_| {
            timestamp += rng.gen_range(0..=config.max_step);
            let index = rng.gen_range(0..instruments.len());
            prices[index] = (prices[index] + rng.gen_range(-10..=10)).max(1);
            Quote::new(instruments[index].clone(), prices[index], timestamp)
        })
        .collect()
}

/// Timestamp after which every window of `quotes` has elapsed.
pub fn settle_time(quotes: &[Quote]) -> Timestamp {
    quotes
        .iter()
        .map(|q| q.timestamp)
        .max()
        .unwrap_or(0)
        .saturating_add(86_400)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_quotes_is_deterministic() {
        let config = WorkloadConfig::default().with_quotes(1_000).with_instruments(3);
        let a = generate_quotes(&config);
        let b = generate_quotes(&config);

        assert_eq!(a.len(), 1_000);
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_settle_time() {
        let quotes = generate_quotes(&WorkloadConfig::default().with_quotes(10));
        assert!(settle_time(&quotes) > quotes[9].timestamp);
        assert_eq!(settle_time(&[]), 86_400);

        let last = [Quote::new(Instrument::new("SYM000"), 1, Timestamp::MAX - 10)];
        assert_eq!(settle_time(&last), Timestamp::MAX);
    }
}
