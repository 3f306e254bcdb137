//! Append-only CSV log of every accepted sample (ground truth).
//!
//! Each accepted packet becomes exactly one row, in strict arrival order,
//! flushed before the append returns. Flush-per-record trades throughput
//! for durability; at ~100 records/second that cost is negligible and a
//! crash never loses an acknowledged record.

use crate::error::{Error, Result};
use crate::types::LogRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Column header, written exactly once when the file is created.
const HEADER: &str = "recv_ts,ts,aTA,aGAS,valid";

/// Append-only CSV log writer.
///
/// Opening an existing file resumes appending without repeating the header,
/// so restarts extend the same log.
#[derive(Debug)]
pub struct CsvLog {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl CsvLog {
    /// Open the log at `path`, creating it (with header) if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let is_new = !path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::LogAppend {
                path: path.clone(),
                source: e,
            })?;

        let mut log = Self {
            writer: BufWriter::new(file),
            path,
        };

        if is_new {
            log.write_line(HEADER)?;
        }

        Ok(log)
    }

    /// Append one record and flush it to the OS before returning.
    pub fn append(&mut self, record: &LogRecord) -> Result<()> {
        let s = &record.sample;
        let row = format!(
            "{},{},{},{},{}",
            record.recv_ts, s.ts, s.a_ta, s.a_gas, s.valid
        );
        self.write_line(&row)
    }

    /// Path of the log artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let path = self.path.clone();
        let io = move |e| Error::LogAppend { path, source: e };

        if let Err(e) = writeln!(self.writer, "{}", line).and_then(|_| self.writer.flush()) {
            return Err(io(e));
        }
        Ok(())
    }
}
