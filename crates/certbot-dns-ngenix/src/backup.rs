//! Zone snapshots written around record changes.
//!
//! Each snapshot is `<dir>/<zone>.<YYYY-mm-dd_HH-MM-SS>.<tag>.json`: the zone
//! id on the first line, the zone's record list as JSON on the second.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Local;
use ngenix_core::{RecordId, Result, ZoneRecord};
use tracing::{info, warn};

/// Directory snapshots go to unless configured otherwise
pub const DEFAULT_BACKUP_DIR: &str = "/tmp/ngenix-dns-zone";

/// When a snapshot was taken relative to the change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupTag {
    /// Zone contents before the challenge record was added
    Before,
    /// Zone contents after the challenge record was removed
    After,
}

impl fmt::Display for BackupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Before => "before",
            Self::After => "after",
        })
    }
}

/// Writes zone snapshots to a directory
#[derive(Debug, Clone)]
pub struct ZoneBackup {
    dir: PathBuf,
}

impl Default for ZoneBackup {
    fn default() -> Self {
        Self::new(DEFAULT_BACKUP_DIR)
    }
}

impl ZoneBackup {
    /// Write snapshots into `dir`, creating it on first use
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a snapshot of the zone behind `record`.
    pub async fn write(
        &self,
        record: &RecordId,
        records: &[ZoneRecord],
        tag: BackupTag,
    ) -> Result<PathBuf> {
        let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let path = self
            .dir
            .join(format!("{}.{stamp}.{tag}.json", record.zone_name));

        let contents = format!("{}\n{}", record.zone_id, serde_json::to_string(records)?);

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, contents).await?;

        info!(zone = %record.zone_name, path = %path.display(), %tag, "saved DNS zone backup");
        Ok(path)
    }

    /// Like [`write`](Self::write), but failures are only logged.
    pub async fn write_logged(&self, record: &RecordId, records: &[ZoneRecord], tag: BackupTag) {
        if let Err(e) = self.write(record, records, tag).await {
            warn!(zone = %record.zone_name, error = %e, %tag, "failed to save DNS zone backup");
        }
    }
}
