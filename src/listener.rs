//! UDP ingestion loop.
//!
//! Owns the bound socket and drives the whole pipeline for each datagram:
//! record receive time, decode, append to the CSV log, republish the
//! snapshot. Malformed packets from the untrusted network are counted and
//! discarded without ever terminating the loop; storage failures are the
//! opposite - they are propagated immediately, because silently dropping a
//! would-be-durable record would break the ground-truth contract.
//!
//! The receive call uses a bounded timeout so the loop can run its
//! housekeeping (status reporting, shutdown-flag check) even with no
//! traffic on the wire.

use crate::codec;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::report::StatusReporter;
use crate::storage::{CsvLog, SnapshotWriter};
use crate::types::{Counters, LogRecord, Sample};
use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Bounded receive wait. A timeout is not an error, just an idle iteration.
const RECV_TIMEOUT: Duration = Duration::from_secs(1);

/// Single-threaded, receive-only ingestion loop.
#[derive(Debug)]
pub struct Listener {
    socket: UdpSocket,
    running: Arc<AtomicBool>,
    counters: Arc<Counters>,
    max_packet: usize,
}

impl Listener {
    /// Bind the socket per `config` and prepare the loop.
    pub fn new(config: &Config, running: Arc<AtomicBool>, counters: Arc<Counters>) -> Result<Self> {
        let bind_addr = config.bind_addr();
        let socket = UdpSocket::bind(&bind_addr)
            .map_err(|e| Error::Other(format!("Failed to bind to {}: {}", bind_addr, e)))?;
        socket.set_read_timeout(Some(RECV_TIMEOUT))?;

        log::info!("UDP listener bound to {}", bind_addr);

        Ok(Self {
            socket,
            running,
            counters,
            max_packet: config.network.max_packet_bytes,
        })
    }

    /// Actual bound address (useful when binding to port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Run until the running flag clears (blocking).
    ///
    /// Every accepted sample is appended to `log` and published to
    /// `snapshot` before the next packet is processed. Returns an error
    /// only on a storage failure; decode failures never surface here.
    pub fn run(
        &mut self,
        log: &mut CsvLog,
        snapshot: &SnapshotWriter,
        reporter: &mut StatusReporter,
    ) -> Result<()> {
        log::info!("UDP listener started");

        let mut buffer = vec![0u8; self.max_packet];
        let mut last_sample: Option<Sample> = None;

        while self.running.load(Ordering::Relaxed) {
            match self.socket.recv_from(&mut buffer) {
                Ok((len, src)) => {
                    let recv_ts = unix_time();

                    match codec::decode(&buffer[..len]) {
                        Ok(sample) => {
                            log.append(&LogRecord { recv_ts, sample })?;
                            snapshot.publish(&sample)?;

                            self.counters.record_accepted();
                            last_sample = Some(sample);
                            reporter.maybe_live(&sample, src.ip());
                        }
                        Err(e) => {
                            self.counters.record_rejected();
                            log::debug!("Rejected packet from {}: {}", src, e);
                        }
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => {}
                Err(e) if e.kind() == ErrorKind::TimedOut => {}
                Err(e) => {
                    log::error!("UDP recv error: {}", e);
                }
            }

            // Housekeeping runs on every iteration, traffic or not
            reporter.maybe_status(&self.counters, last_sample.as_ref());
        }

        log::info!("UDP listener stopped");
        Ok(())
    }
}

/// Wall-clock seconds since the Unix epoch.
fn unix_time() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
