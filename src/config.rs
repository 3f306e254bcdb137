//! Configuration for the SnayuIO daemon
//!
//! Loads configuration from a TOML file with the minimal parameters needed
//! for passive ingestion. All values have sensible defaults, so an empty
//! deployment can run with no config file at all.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub storage: StorageConfig,
    pub reporting: ReportingConfig,
}

/// UDP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// IP address to bind (default: all interfaces)
    pub bind_address: String,
    /// UDP port to listen on
    pub port: u16,
    /// Maximum UDP packet size in bytes
    pub max_packet_bytes: usize,
}

/// Output artifact configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the CSV log and latest-sample snapshot
    pub output_dir: PathBuf,
}

/// Console status reporting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Live print period in seconds
    pub live_print_secs: f64,
    /// Status summary period in seconds
    pub status_print_secs: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5005,
            max_packet_bytes: 4096,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
        }
    }
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            live_print_secs: 0.2,
            status_print_secs: 2.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            storage: StorageConfig::default(),
            reporting: ReportingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Socket bind address as `ip:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.network.bind_address, self.network.port)
    }

    /// Live print period as a [`Duration`]
    pub fn live_print_period(&self) -> Duration {
        Duration::from_secs_f64(self.reporting.live_print_secs)
    }

    /// Status summary period as a [`Duration`]
    pub fn status_print_period(&self) -> Duration {
        Duration::from_secs_f64(self.reporting.status_print_secs)
    }
}
