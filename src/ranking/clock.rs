//! Time source for snapshot freshness decisions.

/// Supplies the current time as Unix epoch seconds.
///
/// Injected into [`SnapshotStore`](super::SnapshotStore) so freshness and
/// snapshot naming can be driven deterministically in tests.
pub trait Clock: Send + Sync {
    /// Current Unix time in seconds.
    fn now_epoch(&self) -> i64;
}

/// Wall-clock time via `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock frozen at a given epoch.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_epoch(&self) -> i64 {
        self.0
    }
}
