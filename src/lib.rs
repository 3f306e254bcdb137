//! SnayuIO - Passive EMG telemetry ingestion daemon
//!
//! This library provides the core components for receiving EMG feature
//! packets over UDP, validating them, and persisting them to disk.
//!
//! ## Architecture
//!
//! - **Receive-only**: no control signals are ever sent back to the sender
//! - **Ground truth first**: every accepted sample is appended to a CSV log
//!   and flushed before the next packet is processed
//! - **Concurrent-reader safe**: the latest sample is republished via an
//!   atomic temp-file-then-rename, so readers never observe a torn write

pub mod codec;
pub mod config;
pub mod error;
pub mod listener;
pub mod report;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use types::{Counters, LogRecord, Sample};
