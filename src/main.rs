//! SnayuIO - Passive EMG telemetry ingestion daemon
//!
//! Listens for EMG feature packets sent over UDP as JSON (~100 Hz),
//! appends every accepted sample to a CSV log, republishes the latest
//! sample atomically for concurrent readers, and prints basic status
//! information. Strictly receive-only: no control, no feedback.

use clap::Parser;
use snayu_io::config::Config;
use snayu_io::error::{Error, Result};
use snayu_io::listener::Listener;
use snayu_io::report::StatusReporter;
use snayu_io::storage::{CsvLog, SnapshotWriter};
use snayu_io::types::Counters;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Passive EMG UDP listener
#[derive(Debug, Parser)]
#[command(name = "snayu-io", version)]
struct Args {
    /// TOML config file; when given, the other flags are ignored
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// IP address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// UDP port to listen on
    #[arg(long, default_value_t = 5005)]
    port: u16,

    /// Output directory for the CSV log and latest-sample snapshot
    #[arg(long, default_value = "out")]
    outdir: PathBuf,

    /// Live print period in seconds
    #[arg(long, default_value_t = 0.2)]
    print_every: f64,

    /// Status print period in seconds
    #[arg(long, default_value_t = 2.0)]
    status_every: f64,

    /// Maximum UDP packet size in bytes
    #[arg(long, default_value_t = 4096)]
    max_packet: usize,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        if let Some(path) = &self.config {
            log::info!("Using config: {}", path.display());
            return Config::from_file(path);
        }

        let mut config = Config::default();
        config.network.bind_address = self.bind;
        config.network.port = self.port;
        config.network.max_packet_bytes = self.max_packet;
        config.storage.output_dir = self.outdir;
        config.reporting.live_print_secs = self.print_every;
        config.reporting.status_print_secs = self.status_every;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("SnayuIO starting...");

    let config = Args::parse().into_config()?;

    // Prepare output directory and artifacts
    fs::create_dir_all(&config.storage.output_dir)?;
    let csv_path = config.storage.output_dir.join("emg_log.csv");
    let latest_path = config.storage.output_dir.join("emg_latest.json");

    let mut csv_log = CsvLog::open(&csv_path)?;
    let snapshot = SnapshotWriter::new(&latest_path);

    // Set up shutdown signal handler
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let counters = Arc::new(Counters::new());
    let mut listener = Listener::new(&config, Arc::clone(&running), Arc::clone(&counters))?;
    let mut reporter =
        StatusReporter::new(config.live_print_period(), config.status_print_period());

    log::info!("Logging to {}", csv_path.display());
    log::info!("Latest sample at {}", latest_path.display());
    log::info!("Mode: passive / headless. Press Ctrl-C to stop.");

    if let Err(e) = listener.run(&mut csv_log, &snapshot, &mut reporter) {
        // Storage failures are fatal: continuing without durability would
        // break the ground-truth contract
        log::error!("Fatal: {}", e);
        return Err(e);
    }

    log::info!(
        "SnayuIO stopped (ok={} bad={})",
        counters.accepted(),
        counters.rejected()
    );
    Ok(())
}
