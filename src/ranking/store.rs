//! On-disk ranking snapshot cache.
//!
//! Snapshots live in a single directory as `<prefix><unix epoch>` files. The
//! newest one is used while it is younger than the freshness threshold; past
//! that a new list is downloaded, written next to it, and the older files are
//! removed.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::clock::{Clock, SystemClock};
use super::fetch::RankingFetcher;
use crate::config::{SNAPSHOT_FILE_PREFIX, SNAPSHOT_MAX_AGE};
use crate::error_handling::RankError;

/// A ranking snapshot file and the epoch it was written at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Unix epoch seconds embedded in the file name
    pub timestamp: i64,
    /// Full path of the snapshot file
    pub path: PathBuf,
}

/// Directory of timestamped ranking snapshots.
///
/// Assumes a single writer: there is no locking between processes.
pub struct SnapshotStore {
    dir: PathBuf,
    prefix: String,
    max_age: Duration,
    clock: Arc<dyn Clock>,
}

impl SnapshotStore {
    /// Creates a store rooted at `dir` with the default prefix, a 7 day
    /// freshness threshold and the system clock.
    ///
    /// The directory is not touched until the first scan or write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: SNAPSHOT_FILE_PREFIX.to_string(),
            max_age: SNAPSHOT_MAX_AGE,
            clock: Arc::new(SystemClock),
        }
    }

    /// Overrides the snapshot filename prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Overrides the freshness threshold.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Overrides the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a snapshot written at `timestamp` would have.
    pub fn snapshot_path(&self, timestamp: i64) -> PathBuf {
        self.dir.join(format!("{}{}", self.prefix, timestamp))
    }

    /// Returns the path of a snapshot that is fresh enough to use, downloading
    /// a new one with `fetcher` when the cache is empty or stale.
    ///
    /// After a successful download the new snapshot is written and every
    /// snapshot found before the refresh is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or scanned, a
    /// prefixed file has no valid timestamp, the download fails, the new
    /// snapshot cannot be written, or an old snapshot cannot be deleted. On
    /// download failure nothing is written and existing snapshots are left
    /// untouched. When deletion fails the new snapshot stays on disk and is
    /// picked up by the next scan.
    pub async fn usable_snapshot_path(
        &self,
        fetcher: &RankingFetcher,
    ) -> Result<PathBuf, RankError> {
        let existing = self.snapshots().await?;
        let newest = existing.last();

        match newest {
            Some(snapshot) if self.is_fresh(snapshot) => {
                log::info!("Using cached ranking snapshot {}", snapshot.path.display());
                return Ok(snapshot.path.clone());
            }
            Some(snapshot) => {
                log::info!(
                    "Ranking snapshot {} is older than {} days, refreshing",
                    snapshot.path.display(),
                    self.max_age.as_secs() / (24 * 60 * 60)
                );
            }
            None => {
                log::info!(
                    "No ranking snapshot in {}, downloading",
                    self.dir.display()
                );
            }
        }

        let body = fetcher.fetch().await?;
        let snapshot = self.persist(&body).await?;

        let removed = self.remove_superseded(&existing, snapshot.timestamp).await?;
        if removed > 0 {
            log::debug!("Removed {} superseded ranking snapshot(s)", removed);
        }

        Ok(snapshot.path)
    }

    /// Whether `snapshot` is within the freshness threshold.
    ///
    /// Timestamps in the future count as fresh.
    pub fn is_fresh(&self, snapshot: &Snapshot) -> bool {
        let age = self.clock.now_epoch().saturating_sub(snapshot.timestamp);
        age <= i64::try_from(self.max_age.as_secs()).unwrap_or(i64::MAX)
    }

    /// Returns the snapshot with the highest timestamp, if any.
    pub async fn newest_snapshot(&self) -> Result<Option<Snapshot>, RankError> {
        Ok(self
            .snapshots()
            .await?
            .into_iter()
            .max_by_key(|s| s.timestamp))
    }

    /// Lists every snapshot in the directory, oldest first.
    ///
    /// Creates the directory if it does not exist. Entries that do not start
    /// with the prefix, whose remainder contains another `-`, or that are not
    /// regular files are ignored. Any other prefixed file whose remainder is
    /// not a decimal epoch fails the whole scan.
    pub async fn snapshots(&self) -> Result<Vec<Snapshot>, RankError> {
        self.ensure_dir().await?;

        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| RankError::io("Failed to list cache directory", &self.dir, e))?;

        let mut snapshots = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RankError::io("Failed to list cache directory", &self.dir, e))?
        {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(timestamp) = self.parse_timestamp(name)? else {
                continue;
            };
            let file_type = entry.file_type().await.map_err(|e| {
                RankError::io("Failed to inspect cache entry", entry.path(), e)
            })?;
            if !file_type.is_file() {
                continue;
            }
            snapshots.push(Snapshot {
                timestamp,
                path: entry.path(),
            });
        }

        snapshots.sort_by_key(|s| s.timestamp);
        Ok(snapshots)
    }

    /// Writes `bytes` as a new snapshot stamped with the current time.
    ///
    /// The content is written to a hidden temporary file in the same
    /// directory, flushed to disk, then renamed into place.
    pub async fn persist(&self, bytes: &[u8]) -> Result<Snapshot, RankError> {
        self.ensure_dir().await?;

        let timestamp = self.clock.now_epoch();
        let path = self.snapshot_path(timestamp);
        let tmp_path = self.dir.join(format!(".{}{}.tmp", self.prefix, timestamp));

        if let Err(e) = write_synced(&tmp_path, bytes).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(RankError::io("Failed to write snapshot", &tmp_path, e));
        }
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(RankError::io("Failed to move snapshot into place", &path, e));
        }

        log::info!(
            "Saved ranking snapshot {} ({} bytes)",
            path.display(),
            bytes.len()
        );
        Ok(Snapshot { timestamp, path })
    }

    /// Deletes every snapshot older than `keep_timestamp` and returns how many
    /// were removed.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first deletion failure.
    pub async fn prune_old(&self, keep_timestamp: i64) -> Result<usize, RankError> {
        let snapshots = self.snapshots().await?;
        self.remove_superseded(&snapshots, keep_timestamp).await
    }

    async fn remove_superseded(
        &self,
        snapshots: &[Snapshot],
        keep_timestamp: i64,
    ) -> Result<usize, RankError> {
        let mut removed = 0;
        for snapshot in snapshots {
            if snapshot.timestamp >= keep_timestamp {
                continue;
            }
            fs::remove_file(&snapshot.path).await.map_err(|e| {
                RankError::io("Failed to delete old snapshot", &snapshot.path, e)
            })?;
            log::debug!("Deleted ranking snapshot {}", snapshot.path.display());
            removed += 1;
        }
        Ok(removed)
    }

    fn parse_timestamp(&self, file_name: &str) -> Result<Option<i64>, RankError> {
        let Some(suffix) = file_name.strip_prefix(self.prefix.as_str()) else {
            return Ok(None);
        };
        // A second `-` means the name is not `<prefix><epoch>`
        if suffix.contains('-') {
            return Ok(None);
        }
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RankError::InvalidSnapshotName(file_name.to_string()));
        }
        suffix
            .parse::<i64>()
            .map(Some)
            .map_err(|_| RankError::InvalidSnapshotName(file_name.to_string()))
    }

    async fn ensure_dir(&self) -> Result<(), RankError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| RankError::io("Failed to create cache directory", &self.dir, e))
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}
