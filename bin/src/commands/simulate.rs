//! Simulate command implementation.
//!
//! Drives a live service on the system clock: random-walk producers feed
//! quotes, a maintenance loop commits bars, and a reporter prints history.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{error, info};
use trendbar_lib::prelude::*;

use crate::display::{format_close, format_timestamp};

/// Options for a simulation run.
#[derive(Debug)]
pub(crate) struct SimulateOptions {
    pub(crate) instruments: Vec<Instrument>,
    pub(crate) producers: usize,
    pub(crate) seconds: Option<u64>,
    pub(crate) maintenance_interval: Duration,
    pub(crate) feed_interval: Duration,
    pub(crate) report_interval: Duration,
    pub(crate) seed: Option<u64>,
}

/// Run the simulation until the duration elapses or Ctrl-C is pressed.
pub(crate) async fn simulate(options: SimulateOptions, quiet: bool) -> Result<()> {
    let service = Arc::new(TrendBarService::new());
    let started_at = SystemClock.now();
    let instruments = Arc::new(options.instruments);
    let mut tasks: Vec<JoinHandle<()>> = Vec::new();

    tasks.push(tokio::spawn(maintenance_loop(
        Arc::clone(&service),
        options.maintenance_interval,
    )));

    for producer in 0..options.producers {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(producer as u64)),
            None => StdRng::from_entropy(),
        };
        tasks.push(tokio::spawn(producer_loop(
            Arc::clone(&service),
            Arc::clone(&instruments),
            rng,
            options.feed_interval,
        )));
    }

    if !quiet {
        tasks.push(tokio::spawn(report_loop(
            Arc::clone(&service),
            Arc::clone(&instruments),
            started_at,
            options.report_interval,
        )));
    }

    info!(
        producers = options.producers,
        instruments = instruments.len(),
        "Simulation running. Press Ctrl+C to stop."
    );

    match options.seconds {
        Some(seconds) => {
            tokio::select! {
                () = tokio::time::sleep(Duration::from_secs(seconds)) => {}
                _ = tokio::signal::ctrl_c() => info!("Interrupted"),
            }
        }
        None => {
            tokio::signal::ctrl_c().await?;
            info!("Interrupted");
        }
    }

    for task in &tasks {
        task.abort();
    }
    service.run_maintenance()?;
    let snapshot = service.snapshot();
    println!(
        "Committed {} bars across {} instruments ({} windows still open)",
        snapshot.bar_count(),
        snapshot.instruments().count(),
        service.open_builders(),
    );
    Ok(())
}

async fn maintenance_loop(service: Arc<TrendBarService>, every: Duration) {
    let mut tick = interval(every);
    loop {
        tick.tick().await;
        if let Err(err) = service.run_maintenance() {
            error!(%err, "maintenance failed");
        }
    }
}

async fn producer_loop(
    service: Arc<TrendBarService>,
    instruments: Arc<Vec<Instrument>>,
    mut rng: StdRng,
    every: Duration,
) {
    if instruments.is_empty() {
        return;
    }
    let mut prices: Vec<Price> = instruments
        .iter()
        .map(|_| rng.gen_range(10_000..20_000))
        .collect();
    let mut tick = interval(every);
    loop {
        tick.tick().await;
        let index = rng.gen_range(0..instruments.len());
        prices[index] = (prices[index] + rng.gen_range(-25..=25)).max(1);
        service.feed_now(instruments[index].clone(), prices[index]);
    }
}

async fn report_loop(
    service: Arc<TrendBarService>,
    instruments: Arc<Vec<Instrument>>,
    started_at: Timestamp,
    every: Duration,
) {
    let mut tick = interval(every);
    // First tick completes immediately.
    tick.tick().await;
    loop {
        tick.tick().await;
        let snapshot = service.snapshot();
        let range = TimeRange::new(started_at, SystemClock.now());
        println!(
            "v{} | {} bars | {} pending quotes",
            snapshot.version(),
            snapshot.bar_count(),
            service.pending_quotes()
        );
        for line in report_lines(&snapshot, &instruments, service.periods(), range) {
            println!("{line}");
        }
    }
}

/// One summary line per series with history inside `range`.
fn report_lines(
    snapshot: &Snapshot,
    instruments: &[Instrument],
    periods: &[Period],
    range: TimeRange,
) -> Vec<String> {
    instruments
        .iter()
        .flat_map(|instrument| {
            periods.iter().filter_map(move |&period| {
                let bars = snapshot.history(instrument, period, range);
                let last = bars.last()?;
                let up = bars.iter().filter(|bar| bar.is_bullish()).count();
                let down = bars.iter().filter(|bar| bar.is_bearish()).count();
                Some(format!(
                    "  {:<8} {:<3} {:>5} bars ({up} up, {down} down), last {} O={} H={} L={} C={} range={}",
                    instrument.as_str(),
                    period.as_str(),
                    bars.len(),
                    format_timestamp(last.open_at),
                    last.open_price,
                    last.high_price,
                    last.low_price,
                    format_close(last.close_price),
                    last.range(),
                ))
            })
        })
        .collect()
}
