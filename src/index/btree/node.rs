//! B-tree node record and the split mechanics.
//!
//! A [`Node`] is plain data: an ordered key list plus one child slot per
//! gap between keys. The arity invariant `children.len() == keys.len() + 1`
//! holds for every node, leaves included. A leaf's slots are all `None`.
//!
//! ```text
//!            keys:     k0     k1     k2
//!        children:  c0     c1     c2     c3
//! ```
//!
//! Every key in `c_i` sorts before `k_i` and after `k_{i-1}`.

use std::cmp::Ordering;

use crate::index::btree::Comparator;

/// A child slot. `None` marks an absent child (leaf position).
pub(crate) type Child<K> = Option<Box<Node<K>>>;

/// Outcome of scanning one node for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Search {
    /// `keys[i]` equals the key.
    Found(usize),
    /// The key is not in this node; `i` is the child slot to descend into
    /// (or, in a leaf, the position to insert at).
    GoDown(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<Child<K>>,
}

/// Result of splitting a full node.
#[derive(Debug)]
pub(crate) struct Split<K> {
    pub(crate) left: Node<K>,
    pub(crate) middle: K,
    pub(crate) right: Node<K>,
}

impl<K> Node<K> {
    /// An empty leaf: no keys, one absent child slot.
    pub(crate) fn new_leaf() -> Self {
        Self {
            keys: Vec::new(),
            children: vec![None],
        }
    }

    /// An internal node holding one key and two present children.
    pub(crate) fn new_root(left: Node<K>, middle: K, right: Node<K>) -> Self {
        Self {
            keys: vec![middle],
            children: vec![Some(Box::new(left)), Some(Box::new(right))],
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// A node is a leaf iff all its child slots are absent.
    ///
    /// Slots are either all present or all absent, so the first one decides.
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.children.first(), Some(None) | None)
    }

    /// `true` when the node holds `2t - 1` keys.
    #[inline]
    pub(crate) fn is_full(&self, min_degree: usize) -> bool {
        self.len() == max_keys(min_degree)
    }

    /// Ordered scan for `key`.
    ///
    /// Returns the first index whose key equals `key`, or the smallest index
    /// `i` with `key < keys[i]` (`keys.len()` if there is none).
    pub(crate) fn search<C>(&self, key: &K, cmp: &C) -> Search
    where
        C: Comparator<K>,
    {
        for (i, k) in self.keys.iter().enumerate() {
            match cmp.compare(key, k) {
                Ordering::Equal => return Search::Found(i),
                Ordering::Less => return Search::GoDown(i),
                Ordering::Greater => {}
            }
        }
        Search::GoDown(self.keys.len())
    }

    /// Insert `key` into a leaf at `index` and grow the slot list by one.
    pub(crate) fn insert_into_leaf(&mut self, index: usize, key: K) {
        debug_assert!(self.is_leaf());
        self.keys.insert(index, key);
        self.children.push(None);
    }

    /// Split a full node into two halves and the promoted median.
    ///
    /// For a node with `2t - 1` keys and `2t` children:
    /// - `left` gets keys `0..t-1` and children `0..t`
    /// - `middle` is key `t-1`
    /// - `right` gets keys `t..2t-1` and children `t..2t`
    ///
    /// Both halves come out with exactly `t - 1` keys and `t` children.
    pub(crate) fn split(self, min_degree: usize) -> Split<K> {
        debug_assert!(self.is_full(min_degree), "split called on a non-full node");

        let t = min_degree;
        let mut keys = self.keys;
        let mut children = self.children;

        let right_keys = keys.split_off(t);
        let middle = keys.remove(t - 1);
        let right_children = children.split_off(t);

        let split = Split {
            left: Node {
                keys,
                children,
            },
            middle,
            right: Node {
                keys: right_keys,
                children: right_children,
            },
        };

        debug_assert_eq!(split.left.keys.len(), t - 1);
        debug_assert_eq!(split.right.keys.len(), t - 1);
        debug_assert_eq!(split.left.children.len(), t);
        debug_assert_eq!(split.right.children.len(), t);

        split
    }

    /// Split the full child at `index` in place.
    ///
    /// The median moves into `self.keys[index]`, the left half stays in slot
    /// `index` and the right half lands in slot `index + 1`. `self` must not
    /// be full.
    ///
    /// Returns `false` (and changes nothing) if the slot is absent.
    pub(crate) fn split_child(&mut self, index: usize, min_degree: usize) -> bool {
        debug_assert!(!self.is_full(min_degree), "parent of a split must have room");

        let Some(child) = self.children[index].take() else {
            return false;
        };

        let Split {
            left,
            middle,
            right,
        } = child.split(min_degree);

        self.children[index] = Some(Box::new(left));
        self.keys.insert(index, middle);
        self.children.insert(index + 1, Some(Box::new(right)));
        true
    }

    /// Borrow the present child at `index`, if any.
    #[inline]
    pub(crate) fn child(&self, index: usize) -> Option<&Node<K>> {
        self.children.get(index).and_then(|c| c.as_deref())
    }

    /// Iterate over the present children, left to right.
    pub(crate) fn present_children(&self) -> impl Iterator<Item = &Node<K>> {
        self.children.iter().filter_map(|c| c.as_deref())
    }
}

/// Maximum number of keys a node may hold: `2t - 1`.
#[inline]
pub(crate) fn max_keys(min_degree: usize) -> usize {
    2 * min_degree - 1
}

/// Minimum number of keys a non-root node must hold: `t - 1`.
#[inline]
pub(crate) fn min_keys(min_degree: usize) -> usize {
    min_degree - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::btree::NaturalOrder;
    use proptest::prelude::*;

    fn leaf(keys: &[i32]) -> Node<i32> {
        Node {
            keys: keys.to_vec(),
            children: vec![None; keys.len() + 1],
        }
    }

    #[test]
    fn test_new_leaf_arity() {
        let node: Node<i32> = Node::new_leaf();
        assert_eq!(node.len(), 0);
        assert_eq!(node.children.len(), 1);
        assert!(node.is_leaf());
    }

    #[test]
    fn test_search() {
        let node = leaf(&[10, 20, 30]);

        assert_eq!(node.search(&5, &NaturalOrder), Search::GoDown(0));
        assert_eq!(node.search(&10, &NaturalOrder), Search::Found(0));
        assert_eq!(node.search(&25, &NaturalOrder), Search::GoDown(2));
        assert_eq!(node.search(&30, &NaturalOrder), Search::Found(2));
        assert_eq!(node.search(&99, &NaturalOrder), Search::GoDown(3));
    }

    #[test]
    fn test_insert_into_leaf_keeps_arity() {
        let mut node = leaf(&[1, 3]);
        node.insert_into_leaf(1, 2);

        assert_eq!(node.keys, vec![1, 2, 3]);
        assert_eq!(node.children.len(), 4);
        assert!(node.is_leaf());
    }

    #[test]
    fn test_split_leaf() {
        // t = 3: full at 5 keys
        let node = leaf(&[1, 2, 3, 4, 5]);
        assert!(node.is_full(3));

        let split = node.split(3);
        assert_eq!(split.left.keys, vec![1, 2]);
        assert_eq!(split.middle, 3);
        assert_eq!(split.right.keys, vec![4, 5]);
        assert_eq!(split.left.children.len(), 3);
        assert_eq!(split.right.children.len(), 3);
        assert!(split.left.is_leaf());
        assert!(split.right.is_leaf());
    }

    #[test]
    fn test_split_internal_moves_children() {
        // t = 2: full at 3 keys, 4 children
        let node = Node {
            keys: vec![10, 20, 30],
            children: vec![
                Some(Box::new(leaf(&[5]))),
                Some(Box::new(leaf(&[15]))),
                Some(Box::new(leaf(&[25]))),
                Some(Box::new(leaf(&[35]))),
            ],
        };

        let split = node.split(2);
        assert_eq!(split.middle, 20);
        assert_eq!(split.left.keys, vec![10]);
        assert_eq!(split.right.keys, vec![30]);

        let left_children: Vec<_> = split.left.present_children().map(|c| c.keys[0]).collect();
        let right_children: Vec<_> = split.right.present_children().map(|c| c.keys[0]).collect();
        assert_eq!(left_children, vec![5, 15]);
        assert_eq!(right_children, vec![25, 35]);
    }

    #[test]
    fn test_split_min_degree_one() {
        // t = 1: a single key is already full; halves are empty
        let node = leaf(&[7]);
        assert!(node.is_full(1));

        let split = node.split(1);
        assert_eq!(split.middle, 7);
        assert!(split.left.keys.is_empty());
        assert!(split.right.keys.is_empty());
        assert_eq!(split.left.children.len(), 1);
        assert_eq!(split.right.children.len(), 1);
    }

    #[test]
    fn test_split_child_promotes_median() {
        let mut parent = Node {
            keys: vec![100],
            children: vec![
                Some(Box::new(leaf(&[1, 2, 3, 4, 5]))),
                Some(Box::new(leaf(&[200]))),
            ],
        };

        assert!(parent.split_child(0, 3));
        assert_eq!(parent.keys, vec![3, 100]);
        assert_eq!(parent.children.len(), 3);
        assert_eq!(parent.child(0).unwrap().keys, vec![1, 2]);
        assert_eq!(parent.child(1).unwrap().keys, vec![4, 5]);
        assert_eq!(parent.child(2).unwrap().keys, vec![200]);
    }

    #[test]
    fn test_split_child_absent_slot() {
        let mut node = leaf(&[1]);
        assert!(!node.split_child(0, 3));
        assert_eq!(node.keys, vec![1]);
    }

    proptest! {
        #[test]
        fn prop_split_halves_and_median(t in 1usize..40) {
            let keys: Vec<i32> = (0..max_keys(t) as i32).map(|k| k * 2).collect();
            let split = leaf(&keys).split(t);

            prop_assert_eq!(split.left.len(), t - 1);
            prop_assert_eq!(split.right.len(), t - 1);
            prop_assert_eq!(split.left.children.len(), t);
            prop_assert_eq!(split.right.children.len(), t);
            prop_assert!(split.left.keys.iter().all(|&k| k < split.middle));
            prop_assert!(split.right.keys.iter().all(|&k| k > split.middle));
        }
    }

    #[test]
    fn test_degree_bounds() {
        assert_eq!(max_keys(1), 1);
        assert_eq!(min_keys(1), 0);
        assert_eq!(max_keys(3), 5);
        assert_eq!(min_keys(3), 2);
    }
}
