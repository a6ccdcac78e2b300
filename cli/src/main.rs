//! CLI entry point: scans a Redis keyspace and prints the per-type
//! top-keys memory report.

mod args;
mod config;
mod telemetry;

use anyhow::{Context, Result};
use keyscan::{CancelToken, RedisStore, report, run_scan};
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_telemetry();

    let (host, port) = args::parse_host_port(std::env::args().skip(1))?;
    let settings = config::load_settings().context("failed to load scan settings")?;
    info!(
        %host,
        port,
        count_hint = settings.scan.count_hint,
        "starting keyspace scan"
    );

    println!("Connecting to Redis at {host}:{port}");
    let mut store = RedisStore::connect(&host, port)
        .with_context(|| format!("failed to connect to {host}:{port}"))?;

    println!("Scanning keyspace, this can take a few minutes on large instances...");
    let cancel = CancelToken::new();
    let outcome = run_scan(&mut store, &settings.scan, &cancel).context("keyspace scan failed")?;

    println!(
        "Done: {} keys inspected ({} errors)",
        outcome.scanned, outcome.errors
    );
    print!("{}", report::render(&outcome));
    Ok(())
}
