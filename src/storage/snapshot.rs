//! Latest-sample snapshot with atomic replace.
//!
//! External consumers poll a well-known JSON file for the current sample.
//! The file is never written in place: the full document goes to a sibling
//! temp path first and is then swapped in with `fs::rename`, which is
//! atomic on the same filesystem. A concurrent reader therefore sees either
//! the previous complete sample or the new complete sample, never a mix.

use crate::error::{Error, Result};
use crate::types::Sample;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Publishes the most recent sample to a single JSON file.
pub struct SnapshotWriter {
    path: PathBuf,
    tmp_path: PathBuf,
}

impl SnapshotWriter {
    /// Create a writer publishing to `path`. The temp file lives next to
    /// it so the rename stays on one filesystem.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);
        Self { path, tmp_path }
    }

    /// Replace the published snapshot with `sample`.
    ///
    /// Serialization is deterministic, so publishing the same sample twice
    /// leaves the artifact byte-identical.
    pub fn publish(&self, sample: &Sample) -> Result<()> {
        let io_err = |e| Error::SnapshotPublish {
            path: self.path.clone(),
            source: e,
        };

        // Sample fields are finite by the codec contract, so JSON
        // serialization cannot fail on non-representable floats.
        let mut bytes = serde_json::to_vec(sample)
            .map_err(|e| io_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        bytes.push(b'\n');

        fs::write(&self.tmp_path, &bytes).map_err(io_err)?;
        fs::rename(&self.tmp_path, &self.path).map_err(io_err)?;
        Ok(())
    }

    /// Path of the published artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
