//! Ranking list acquisition, caching and lookup.
//!
//! This module handles:
//! - Keeping a timestamped snapshot of the Tranco list on disk ([`SnapshotStore`])
//! - Downloading a new list when the snapshot is missing or stale ([`RankingFetcher`])
//! - Parsing a snapshot into a domain → rank map ([`RankIndex`])
//!
//! [`RankingService`] ties them together at startup.

mod clock;
mod fetch;
mod index;
mod store;

use std::path::{Path, PathBuf};

use crate::error_handling::RankError;

pub use clock::{Clock, FixedClock, SystemClock};
pub use fetch::RankingFetcher;
pub use index::RankIndex;
pub use store::{Snapshot, SnapshotStore};

/// Rank lookups backed by a snapshot that was fresh at startup.
#[derive(Debug)]
pub struct RankingService {
    index: RankIndex,
    snapshot_path: PathBuf,
}

impl RankingService {
    /// Resolves a usable snapshot (downloading one if needed) and loads it.
    ///
    /// # Errors
    ///
    /// Any failure while scanning the cache, downloading, writing or parsing
    /// the snapshot is returned as is; there is no partially initialized
    /// service.
    pub async fn start(
        store: &SnapshotStore,
        fetcher: &RankingFetcher,
    ) -> Result<Self, RankError> {
        let snapshot_path = store.usable_snapshot_path(fetcher).await?;
        let index = RankIndex::load(&snapshot_path).await?;
        Ok(Self {
            index,
            snapshot_path,
        })
    }

    /// Rank of `domain`, or `-1` if it is not ranked.
    pub fn rank(&self, domain: &str) -> i64 {
        self.index.rank(domain)
    }

    /// The snapshot the index was loaded from.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// The loaded rank index.
    pub fn index(&self) -> &RankIndex {
        &self.index
    }
}
