//! The B-tree proper: construction, lookup and top-down insertion.

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace, warn};

use crate::common::config::MIN_DEGREE_FLOOR;
use crate::common::{Error, Result};
use crate::index::btree::iter::{write_levels, Iter, LevelDump, Levels};
use crate::index::btree::node::{Node, Search, Split};
use crate::index::btree::{Comparator, NaturalOrder, TreeStats};

/// An in-memory B-tree set ordered by a [`Comparator`].
///
/// # Structure
/// ```text
///                    [ 10 | 20 ]                 <- root (0..=2t-1 keys)
///                  /      |      \
///          [ 5 | 6 ]  [ 12 | 17 ]  [ 30 ]        <- t-1..=2t-1 keys each
/// ```
///
/// - Every node holds at most `2t - 1` keys; every non-root node at least `t - 1`.
/// - All leaves sit at the same depth.
/// - Nodes are uniquely owned by their parent: no shared or back references.
///
/// # Insertion
/// Insertion is a single top-down pass. Any full node met on the way down
/// is split *before* it is entered, so the parent always has room for the
/// promoted median and no second upward pass is needed.
///
/// # Duplicates
/// Keys are unique under the comparator. Inserting a key equal to one
/// already stored returns `false` and keeps the stored key.
///
/// # Thread Safety
/// `insert` takes `&mut self`, lookups take `&self`. Wrap the tree in a
/// [`SharedBTree`](crate::SharedBTree) to share it between threads.
///
/// # Example
/// ```
/// use ordered_btree::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// for key in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.insert(key);
/// }
///
/// assert!(tree.contains(&6));
/// assert!(!tree.contains(&99));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![5, 6, 7, 10, 12, 17, 20, 30]);
/// ```
pub struct BTree<K, C = NaturalOrder> {
    /// Always present; starts as an empty leaf.
    root: Node<K>,

    /// Minimum degree `t`, fixed at construction.
    min_degree: usize,

    /// Total order over keys, fixed at construction.
    comparator: C,

    /// Number of keys stored.
    len: usize,

    stats: TreeStats,
}

impl<K: Ord> BTree<K, NaturalOrder> {
    /// Create an empty tree ordered by `K`'s `Ord` implementation.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `min_degree < 1`.
    pub fn new(min_degree: usize) -> Result<Self> {
        Self::with_comparator(min_degree, NaturalOrder)
    }
}

impl<K, C: Comparator<K>> BTree<K, C> {
    /// Create an empty tree ordered by `comparator`.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `min_degree < 1`, or so large that
    /// `2t - 1` does not fit in a `usize`.
    pub fn with_comparator(min_degree: usize, comparator: C) -> Result<Self> {
        if min_degree < MIN_DEGREE_FLOOR || min_degree > usize::MAX / 2 {
            return Err(Error::InvalidConfiguration { min_degree });
        }

        Ok(Self {
            root: Node::new_leaf(),
            min_degree,
            comparator,
            len: 0,
            stats: TreeStats::new(),
        })
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Returns `true` if a key equal to `key` is stored.
    pub fn contains(&self, key: &K) -> bool {
        TreeStats::bump(&self.stats.lookups);
        self.find(key).is_some()
    }

    /// Returns the stored key equal to `key`, if any.
    ///
    /// Useful when the comparator only looks at part of `K`.
    pub fn get(&self, key: &K) -> Option<&K> {
        TreeStats::bump(&self.stats.lookups);
        self.find(key)
    }

    fn find(&self, key: &K) -> Option<&K> {
        let mut node = &self.root;
        loop {
            match node.search(key, &self.comparator) {
                Search::Found(i) => return Some(&node.keys[i]),
                Search::GoDown(i) => node = node.child(i)?,
            }
        }
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Insert `key`.
    ///
    /// Returns `true` if the key was added, `false` if an equal key was
    /// already present. A rejected key changes nothing: the stored key, the
    /// node layout and the split counters all stay as they were.
    pub fn insert(&mut self, key: K) -> bool {
        let t = self.min_degree;

        // A rejected key must leave the shape untouched, so check before any split.
        if self.find(&key).is_some() {
            TreeStats::bump(&self.stats.duplicates);
            trace!("duplicate key rejected");
            return false;
        }

        if self.root.is_full(t) {
            let old_root = std::mem::replace(&mut self.root, Node::new_leaf());
            let Split {
                left,
                middle,
                right,
            } = old_root.split(t);
            self.root = Node::new_root(left, middle, right);

            TreeStats::bump(&self.stats.root_splits);
            debug!(height = self.height(), "root split, tree grew one level");
        }

        let inserted = Self::insert_non_full(&mut self.root, key, t, &self.comparator, &self.stats);

        if inserted {
            self.len += 1;
            TreeStats::bump(&self.stats.inserts);
        } else {
            TreeStats::bump(&self.stats.duplicates);
            trace!("duplicate key rejected");
        }
        inserted
    }

    /// Descend from `node` (which is not full) to the leaf that takes `key`,
    /// splitting every full child before stepping into it.
    fn insert_non_full(
        mut node: &mut Node<K>,
        key: K,
        min_degree: usize,
        comparator: &C,
        stats: &TreeStats,
    ) -> bool {
        loop {
            let mut index = match node.search(&key, comparator) {
                Search::Found(_) => return false,
                Search::GoDown(i) => i,
            };

            if node.is_leaf() {
                node.insert_into_leaf(index, key);
                return true;
            }

            if node.child(index).is_some_and(|child| child.is_full(min_degree)) {
                node.split_child(index, min_degree);
                TreeStats::bump(&stats.node_splits);
                trace!(index, "split full child during descent");

                // The median now sits at keys[index]; pick the half the key belongs to.
                match comparator.compare(&key, &node.keys[index]) {
                    Ordering::Less => {}
                    Ordering::Greater => index += 1,
                    Ordering::Equal => return false,
                }
            }

            let Some(child) = node.children[index].as_deref_mut() else {
                debug_assert!(false, "internal node with an absent child slot");
                return false;
            };
            node = child;
        }
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Remove `key` from the tree.
    ///
    /// Deletion is not implemented.
    ///
    /// # Errors
    /// Always returns `Error::NotImplemented`.
    pub fn remove(&mut self, _key: &K) -> Result<bool> {
        warn!("remove called on a tree without deletion support");
        Err(Error::NotImplemented("remove"))
    }
}

impl<K, C> BTree<K, C> {
    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Minimum degree `t` the tree was built with.
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Number of levels. An empty tree has height 1 (the empty root).
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = &self.root;
        while let Some(child) = node.child(0) {
            height += 1;
            node = child;
        }
        height
    }

    /// Drop every key, keeping the minimum degree and comparator.
    pub fn clear(&mut self) {
        self.root = Node::new_leaf();
        self.len = 0;
    }

    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Keys in comparator order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.root, self.len)
    }

    /// Breadth-first view of the tree: one item per level, each holding the
    /// key slices of that level's nodes from left to right.
    ///
    /// Lazy and restartable: every call starts again at the root.
    pub fn levels(&self) -> Levels<'_, K> {
        Levels::new(&self.root)
    }

    /// Displayable level-by-level rendering; see [`BTree::dump`].
    pub fn display_levels(&self) -> LevelDump<'_, K> {
        LevelDump::new(&self.root)
    }

    /// Render the tree one level per line, each node as `[k1, k2]`, nodes
    /// separated by a single space.
    ///
    /// ```
    /// use ordered_btree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.extend([1, 2, 3, 4]);
    /// assert_eq!(tree.dump(), "[2]\n[1] [3, 4]\n");
    /// ```
    pub fn dump(&self) -> String
    where
        K: fmt::Display,
    {
        self.display_levels().to_string()
    }

    /// Like [`BTree::dump`], with each key shown as `render(key)`.
    ///
    /// Works for keys that are not `Display` themselves:
    ///
    /// ```
    /// use ordered_btree::BTree;
    ///
    /// struct User { id: u32 }
    ///
    /// let mut users = BTree::with_comparator(2, |a: &User, b: &User| a.id.cmp(&b.id)).unwrap();
    /// users.extend((1..=4).map(|id| User { id }));
    /// assert_eq!(users.dump_with(|u| u.id), "[2]\n[1] [3, 4]\n");
    /// ```
    pub fn dump_with<F, D>(&self, render: F) -> String
    where
        F: Fn(&K) -> D,
        D: fmt::Display,
    {
        let mut out = String::new();
        // Writing into a String never fails.
        let _ = write_levels(&mut out, &self.root, |out, key| {
            fmt::Write::write_fmt(out, format_args!("{}", render(key)))
        });
        out
    }

    pub(crate) fn root(&self) -> &Node<K> {
        &self.root
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.comparator
    }
}

impl<K, C: Comparator<K>> Extend<K> for BTree<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K, C> IntoIterator for &'a BTree<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, C> fmt::Debug for BTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
