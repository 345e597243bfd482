//! Display utilities and output formatting for the trendbar CLI.

use anyhow::Result;
use chrono::DateTime;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;
use trendbar_lib::prelude::*;

/// Output format for bar listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Table,
    Json,
    Ndjson,
}

impl Format {
    pub(crate) const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bars of one series, ready to print.
#[derive(Debug)]
pub(crate) struct SeriesBars {
    pub(crate) instrument: Instrument,
    pub(crate) period: Period,
    pub(crate) bars: Vec<Bar>,
}

#[derive(Serialize)]
struct BarRow<'a> {
    instrument: &'a Instrument,
    period: Period,
    #[serde(flatten)]
    bar: &'a Bar,
}

fn rows(series: &[SeriesBars]) -> impl Iterator<Item = BarRow<'_>> {
    series.iter().flat_map(|s| {
        s.bars.iter().map(move |bar| BarRow {
            instrument: &s.instrument,
            period: s.period,
            bar,
        })
    })
}

/// Writes every bar of `series` to `out` in the requested format.
pub(crate) fn write_bars(series: &[SeriesBars], format: Format, mut out: impl Write) -> Result<()> {
    match format {
        Format::Table => {
            writeln!(
                out,
                "{:<10} {:<6} {:<19} {:<19} {:>10} {:>10} {:>10} {:>10}",
                "INSTRUMENT", "PERIOD", "OPEN AT", "CLOSED AT", "OPEN", "HIGH", "LOW", "CLOSE"
            )?;
            writeln!(out, "{}", "-".repeat(101))?;
            for row in rows(series) {
                writeln!(
                    out,
                    "{:<10} {:<6} {:<19} {:<19} {:>10} {:>10} {:>10} {:>10}",
                    row.instrument.as_str(),
                    row.period.as_str(),
                    format_timestamp(row.bar.open_at),
                    format_timestamp(row.bar.closed_at),
                    row.bar.open_price,
                    row.bar.high_price,
                    row.bar.low_price,
                    format_close(row.bar.close_price),
                )?;
            }
            let total: usize = series.iter().map(|s| s.bars.len()).sum();
            writeln!(out, "\nTotal: {total} bars")?;
        }
        Format::Json => {
            let rows: Vec<_> = rows(series).collect();
            serde_json::to_writer_pretty(&mut out, &rows)?;
            writeln!(out)?;
        }
        Format::Ndjson => {
            for row in rows(series) {
                serde_json::to_writer(&mut out, &row)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Formats a unix-second timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// Falls back to the raw number when it is outside chrono's range.
pub(crate) fn format_timestamp(timestamp: Timestamp) -> String {
    DateTime::from_timestamp(timestamp, 0).map_or_else(
        || timestamp.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

/// Formats an optional close price, `-` when unset.
pub(crate) fn format_close(close: Option<Price>) -> String {
    close.map_or_else(|| "-".to_string(), |price| price.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SeriesBars> {
        vec![SeriesBars {
            instrument: Instrument::new("EURJPY"),
            period: Period::M1,
            bars: vec![
                Bar::new(300, Some(310), 310, 300, 1000, 1060),
                Bar::new(400, None, 400, 400, 1061, 1121),
            ],
        }]
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp(86_461), "1970-01-02 00:01:01");
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn test_format_close() {
        assert_eq!(format_close(Some(42)), "42");
        assert_eq!(format_close(None), "-");
    }

    #[test]
    fn test_ndjson_rows_are_flat() {
        let mut out = Vec::new();
        write_bars(&sample(), Format::Ndjson, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["instrument"], "EURJPY");
        assert_eq!(first["period"], "m1");
        assert_eq!(first["open_at"], 1000);
        assert_eq!(first["close_price"], 310);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert!(second["close_price"].is_null());
    }

    #[test]
    fn test_table_lists_every_bar() {
        let mut out = Vec::new();
        write_bars(&sample(), Format::Table, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1970-01-01 00:16:40"));
        assert!(text.contains("Total: 2 bars"));
    }

    #[test]
    fn test_json_is_an_array() {
        let mut out = Vec::new();
        write_bars(&sample(), Format::Json, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }
}
