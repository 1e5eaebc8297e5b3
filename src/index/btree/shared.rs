//! Thread-safe wrapper treating the whole tree as one lock unit.

use std::fmt;

use parking_lot::RwLock;

use crate::common::Result;
use crate::index::btree::{BTree, Comparator, NaturalOrder, StatsSnapshot};

/// A [`BTree`] behind a readers-writer lock.
///
/// # Thread Safety
/// - `insert`: write lock, one writer at a time, no readers while it runs
/// - `contains`, `len`, `height`, `dump`, `dump_with`, `read`: read lock, many at once
///
/// An insert finishes all of its splits before releasing the write lock, so
/// readers never see a half-restructured tree.
///
/// Share between threads with `Arc<SharedBTree<K, C>>`.
///
/// # Example
/// ```
/// use ordered_btree::SharedBTree;
/// use std::sync::Arc;
/// use std::thread;
///
/// let tree = Arc::new(SharedBTree::new(3).unwrap());
/// let writer = {
///     let tree = Arc::clone(&tree);
///     thread::spawn(move || {
///         for key in 0..100 {
///             tree.insert(key);
///         }
///     })
/// };
/// writer.join().unwrap();
/// assert_eq!(tree.len(), 100);
/// ```
pub struct SharedBTree<K, C = NaturalOrder> {
    inner: RwLock<BTree<K, C>>,
}

impl<K: Ord> SharedBTree<K, NaturalOrder> {
    /// Create an empty shared tree ordered by `K`'s `Ord` implementation.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `min_degree < 1`.
    pub fn new(min_degree: usize) -> Result<Self> {
        Ok(Self::from_tree(BTree::new(min_degree)?))
    }
}

impl<K, C: Comparator<K>> SharedBTree<K, C> {
    /// Create an empty shared tree ordered by `comparator`.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `min_degree < 1`.
    pub fn with_comparator(min_degree: usize, comparator: C) -> Result<Self> {
        Ok(Self::from_tree(BTree::with_comparator(min_degree, comparator)?))
    }

    /// Insert `key` under the write lock. See [`BTree::insert`].
    pub fn insert(&self, key: K) -> bool {
        self.inner.write().insert(key)
    }

    /// Membership test under the read lock.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }
}

impl<K, C> SharedBTree<K, C> {
    /// Wrap an existing tree.
    pub fn from_tree(tree: BTree<K, C>) -> Self {
        Self {
            inner: RwLock::new(tree),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn height(&self) -> usize {
        self.inner.read().height()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.inner.read().stats().snapshot()
    }

    /// Run `f` against the tree while holding the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&BTree<K, C>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Level-by-level rendering taken under one read lock.
    pub fn dump(&self) -> String
    where
        K: fmt::Display,
    {
        self.inner.read().dump()
    }

    /// See [`BTree::dump_with`].
    pub fn dump_with<F, D>(&self, render: F) -> String
    where
        F: Fn(&K) -> D,
        D: fmt::Display,
    {
        self.inner.read().dump_with(render)
    }

    /// Unwrap into the plain tree.
    pub fn into_inner(self) -> BTree<K, C> {
        self.inner.into_inner()
    }
}

impl<K: fmt::Debug, C> fmt::Debug for SharedBTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedBTree")
            .field("tree", &*self.inner.read())
            .finish()
    }
}
