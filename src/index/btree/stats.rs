//! Tree activity counters.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by a [`BTree`](crate::BTree).
///
/// All fields are atomic so that `contains(&self)` can count lookups
/// without requiring `&mut self`, and so the tree stays `Sync` when shared
/// behind a read lock.
///
/// # Memory Ordering
/// `Ordering::Relaxed` everywhere: counters are independent and only need
/// atomicity, not synchronization with each other.
///
/// # Example
/// ```
/// use ordered_btree::TreeStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = TreeStats::new();
/// stats.inserts.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.snapshot().inserts, 1);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// Keys successfully added.
    pub inserts: AtomicU64,

    /// Insertions rejected because an equal key was already present.
    pub duplicates: AtomicU64,

    /// Calls to `contains` / `get`.
    pub lookups: AtomicU64,

    /// Splits of non-root nodes.
    pub node_splits: AtomicU64,

    /// Splits of the root (each one adds a level).
    pub root_splits: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            inserts: AtomicU64::new(0),
            duplicates: AtomicU64::new(0),
            lookups: AtomicU64::new(0),
            node_splits: AtomicU64::new(0),
            root_splits: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            node_splits: self.node_splits.load(Ordering::Relaxed),
            root_splits: self.root_splits.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inserts.store(0, Ordering::Relaxed);
        self.duplicates.store(0, Ordering::Relaxed);
        self.lookups.store(0, Ordering::Relaxed);
        self.node_splits.store(0, Ordering::Relaxed);
        self.root_splits.store(0, Ordering::Relaxed);
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of [`TreeStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub inserts: u64,
    pub duplicates: u64,
    pub lookups: u64,
    pub node_splits: u64,
    pub root_splits: u64,
}

impl StatsSnapshot {
    /// Total splits, root included.
    pub fn total_splits(&self) -> u64 {
        self.node_splits + self.root_splits
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, duplicates: {}, lookups: {}, splits: {} (root: {}) }}",
            self.inserts,
            self.duplicates,
            self.lookups,
            self.total_splits(),
            self.root_splits
        )
    }
}
