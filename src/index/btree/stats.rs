//! Tree operation statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by the tree.
///
/// Counters are atomic so that read-only operations (`lookup` takes
/// `&self`) can still record hits and misses.
///
/// # Memory Ordering
/// All operations use `Ordering::Relaxed`: each counter only needs
/// atomicity, never ordering against the other counters.
///
/// # Example
/// ```
/// use tallytree::TreeStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = TreeStats::new();
/// stats.lookup_hits.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.lookup_hits.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// New keys added to the tree.
    pub inserts: AtomicU64,

    /// Inserts that replaced a live value.
    pub overwrites: AtomicU64,

    /// Inserts that brought a tombstoned key back to life.
    pub revivals: AtomicU64,

    /// Successful deletes.
    pub tombstones: AtomicU64,

    /// Node splits, including root splits.
    pub splits: AtomicU64,

    /// Splits that grew the tree by one level.
    pub root_splits: AtomicU64,

    /// Lookups that found a live value.
    pub lookup_hits: AtomicU64,

    /// Lookups that found nothing or a tombstone.
    pub lookup_misses: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            inserts: AtomicU64::new(0),
            overwrites: AtomicU64::new(0),
            revivals: AtomicU64::new(0),
            tombstones: AtomicU64::new(0),
            splits: AtomicU64::new(0),
            root_splits: AtomicU64::new(0),
            lookup_hits: AtomicU64::new(0),
            lookup_misses: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Fraction of lookups that found a live value (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        self.snapshot().hit_rate()
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            overwrites: self.overwrites.load(Ordering::Relaxed),
            revivals: self.revivals.load(Ordering::Relaxed),
            tombstones: self.tombstones.load(Ordering::Relaxed),
            splits: self.splits.load(Ordering::Relaxed),
            root_splits: self.root_splits.load(Ordering::Relaxed),
            lookup_hits: self.lookup_hits.load(Ordering::Relaxed),
            lookup_misses: self.lookup_misses.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inserts.store(0, Ordering::Relaxed);
        self.overwrites.store(0, Ordering::Relaxed);
        self.revivals.store(0, Ordering::Relaxed);
        self.tombstones.store(0, Ordering::Relaxed);
        self.splits.store(0, Ordering::Relaxed);
        self.root_splits.store(0, Ordering::Relaxed);
        self.lookup_hits.store(0, Ordering::Relaxed);
        self.lookup_misses.store(0, Ordering::Relaxed);
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of [`TreeStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub inserts: u64,
    pub overwrites: u64,
    pub revivals: u64,
    pub tombstones: u64,
    pub splits: u64,
    pub root_splits: u64,
    pub lookup_hits: u64,
    pub lookup_misses: u64,
}

impl StatsSnapshot {
    /// Fraction of lookups that found a live value (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.lookup_hits + self.lookup_misses;
        if total == 0 {
            0.0
        } else {
            self.lookup_hits as f64 / total as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, overwrites: {}, revivals: {}, tombstones: {}, splits: {}, hit_rate: {:.2}% }}",
            self.inserts,
            self.overwrites,
            self.revivals,
            self.tombstones,
            self.splits,
            self.hit_rate() * 100.0
        )
    }
}
