//! Core data types shared across the daemon.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A single decoded EMG sample.
///
/// Constructed exclusively by [`crate::codec::decode`] from one UDP packet
/// and immutable afterwards. Activation values are guaranteed to be within
/// `[0.0, 1.0]` after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Timestamp assigned by the sender (seconds, unvalidated range)
    pub ts: f64,
    /// Tibialis Anterior activation, clamped to [0, 1]
    #[serde(rename = "aTA")]
    pub a_ta: f64,
    /// Gastrocnemius activation, clamped to [0, 1]
    #[serde(rename = "aGAS")]
    pub a_gas: f64,
    /// Sender-asserted EMG validity flag
    pub valid: bool,
}

/// A [`Sample`] plus the wall-clock time it was pulled off the socket.
///
/// One record per accepted packet, in strict arrival order. This is the
/// durable ground truth; records are never updated or deleted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogRecord {
    /// Receive timestamp (seconds since the Unix epoch)
    pub recv_ts: f64,
    /// The decoded sample
    pub sample: Sample,
}

/// Process-local ingestion counters.
///
/// Shared between the ingestion loop, the status reporter, and tests.
/// Not persisted; reset only on process restart.
#[derive(Debug, Default)]
pub struct Counters {
    accepted: AtomicU64,
    rejected: AtomicU64,
}

impl Counters {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successfully decoded packet.
    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one rejected (malformed) packet.
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of successfully decoded packets so far.
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    /// Number of rejected packets so far.
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let counters = Counters::new();
        counters.record_accepted();
        counters.record_accepted();
        counters.record_rejected();
        assert_eq!(counters.accepted(), 2);
        assert_eq!(counters.rejected(), 1);
    }

    #[test]
    fn test_sample_serialized_field_names() {
        let sample = Sample {
            ts: 1.5,
            a_ta: 0.42,
            a_gas: 0.77,
            valid: true,
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"ts":1.5,"aTA":0.42,"aGAS":0.77,"valid":true}"#);
    }
}
