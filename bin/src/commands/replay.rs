//! Replay command implementation.
//!
//! Feeds recorded NDJSON quotes through a service with a pinned clock and
//! prints the resulting history.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use trendbar_lib::prelude::*;

use crate::display::{Format, SeriesBars, write_bars};

/// Options for a replay run.
#[derive(Debug)]
pub(crate) struct ReplayOptions {
    pub(crate) instrument: Option<String>,
    pub(crate) period: Option<Period>,
    pub(crate) from: Option<Timestamp>,
    pub(crate) to: Option<Timestamp>,
    pub(crate) now: Option<Timestamp>,
    pub(crate) reseed: bool,
    pub(crate) format: Format,
}

/// Replay quotes from `input` (`-` for stdin) and print the committed bars.
pub(crate) fn replay(input: &Path, options: &ReplayOptions) -> Result<()> {
    let quotes = if input == Path::new("-") {
        parse_quotes(std::io::stdin().lock())?
    } else {
        let file =
            File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
        parse_quotes(BufReader::new(file))?
    };

    let now = options.now.unwrap_or_else(|| default_now(&quotes));
    info!(quotes = quotes.len(), now, "replaying");

    let closing_quote = if options.reseed {
        ClosingQuote::Reseed
    } else {
        ClosingQuote::Discard
    };
    let config = ServiceConfig::default().with_closing_quote(closing_quote);
    let service = TrendBarService::with_config(config, Arc::new(ManualClock::new(now)));

    for quote in quotes {
        service.feed_quote(quote);
    }
    let report = service
        .run_maintenance()
        .context("Maintenance pass rejected a quote")?;
    info!(
        drained = report.quotes_drained,
        committed = report.bars_committed(),
        "replay complete"
    );

    let series = collect_series(&service, options)?;
    write_bars(&series, options.format, std::io::stdout().lock())
}

/// Parses one quote per line, skipping blank lines.
pub(crate) fn parse_quotes(reader: impl BufRead) -> Result<Vec<Quote>> {
    let mut quotes = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let quote: Quote = serde_json::from_str(&line)
            .with_context(|| format!("Invalid quote on line {}", index + 1))?;
        quotes.push(quote);
    }
    Ok(quotes)
}

/// One day past the latest quote, so every window has elapsed.
fn default_now(quotes: &[Quote]) -> Timestamp {
    quotes
        .iter()
        .map(|quote| quote.timestamp)
        .max()
        .map_or(0, |last| last.saturating_add(Period::D1.seconds()))
}

fn collect_series(service: &TrendBarService, options: &ReplayOptions) -> Result<Vec<SeriesBars>> {
    let snapshot = service.snapshot();

    let mut instruments: Vec<Instrument> = match &options.instrument {
        Some(id) => vec![id.parse().context("Invalid instrument")?],
        None => snapshot.instruments().cloned().collect(),
    };
    instruments.sort();

    let periods: Vec<Period> = match options.period {
        Some(period) => vec![period],
        None => service.periods().to_vec(),
    };
    let range = TimeRange::new(
        options.from.unwrap_or(Timestamp::MIN),
        options.to.unwrap_or(Timestamp::MAX),
    );

    Ok(instruments
        .iter()
        .flat_map(|instrument| {
            periods.iter().map(|&period| SeriesBars {
                instrument: instrument.clone(),
                period,
                bars: snapshot.history(instrument, period, range),
            })
        })
        .collect())
}
