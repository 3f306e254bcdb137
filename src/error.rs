//! Error types for SnayuIO

use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// SnayuIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Failed to append a record to the durable CSV log
    #[error("Failed to append to log {}: {source}", path.display())]
    LogAppend {
        /// Path of the CSV log artifact
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Failed to publish the latest-sample snapshot
    #[error("Failed to publish snapshot {}: {source}", path.display())]
    SnapshotPublish {
        /// Path of the published snapshot artifact
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
