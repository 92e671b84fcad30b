//! Snapshot persistence
//!
//! Snapshots are written as `snapshot_<unix millis>_<seq>.json` into one
//! directory. `seq` counts the writer's snapshots, so writes landing in the
//! same millisecond keep distinct files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use expanse_core::SpaceSnapshot;
use tracing::info;

use crate::{RuntimeError, RuntimeResult};

/// Writes snapshots into a directory
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
    written: u64,
}

impl SnapshotWriter {
    /// Create the writer, creating `dir` if it does not exist
    pub fn new(dir: impl Into<PathBuf>) -> RuntimeResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| RuntimeError::io(&dir, e))?;
        Ok(SnapshotWriter { dir, written: 0 })
    }

    /// Write one snapshot, named after its timestamp and sequence number
    pub fn write(&mut self, snapshot: &SpaceSnapshot) -> RuntimeResult<PathBuf> {
        let millis = (snapshot.time * 1000.0) as i64;
        let seq = self.written;
        let path = self.dir.join(format!("snapshot_{millis}_{seq}.json"));
        let json = snapshot.to_json()?;
        fs::write(&path, json).map_err(|e| RuntimeError::io(&path, e))?;
        self.written += 1;
        info!(path = %path.display(), objects = snapshot.objects.len(), "saved snapshot");
        Ok(path)
    }

    /// Snapshots written by this writer
    pub fn written(&self) -> u64 {
        self.written
    }
}

/// Read a snapshot written by `SnapshotWriter` (or any producer of the same layout)
pub fn load_snapshot(path: &Path) -> RuntimeResult<SpaceSnapshot> {
    let data = fs::read_to_string(path).map_err(|e| RuntimeError::io(path, e))?;
    Ok(SpaceSnapshot::from_json(&data)?)
}

/// Wall-clock seconds since the Unix epoch
pub fn unix_time() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
