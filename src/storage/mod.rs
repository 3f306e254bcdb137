//! Durable output artifacts: the append-only CSV log and the latest-sample
//! snapshot. Both live under the configured output directory and are each
//! written only by the single ingestion loop.

pub mod csv_log;
pub mod snapshot;

pub use csv_log::CsvLog;
pub use snapshot::SnapshotWriter;
