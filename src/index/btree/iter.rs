//! Read-only traversals: in-order keys and breadth-first levels.

use std::fmt;
use std::iter::FusedIterator;

use crate::index::btree::node::Node;

/// In-order iterator over a tree's keys.
///
/// Keeps a stack of `(node, next key index)` along the current root-to-leaf
/// path, so memory use is `O(height)`.
pub struct Iter<'a, K> {
    stack: Vec<(&'a Node<K>, usize)>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(root: &'a Node<K>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_leftmost(root);
        iter
    }

    fn push_leftmost(&mut self, mut node: &'a Node<K>) {
        loop {
            self.stack.push((node, 0));
            match node.child(0) {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        loop {
            let (node, index) = {
                let top = self.stack.last_mut()?;
                let current = (top.0, top.1);
                top.1 += 1;
                current
            };

            if index < node.keys.len() {
                // Everything in the child right of this key comes next.
                if let Some(child) = node.child(index + 1) {
                    self.push_leftmost(child);
                }
                self.remaining = self.remaining.saturating_sub(1);
                return Some(&node.keys[index]);
            }

            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

/// Breadth-first iterator over the tree, one item per depth level.
///
/// Each item lists the key slices of that level's nodes, left to right.
/// The iterator is finite (it ends after the leaf level) and borrowing the
/// tree again with `levels()` starts over from the root.
pub struct Levels<'a, K> {
    frontier: Vec<&'a Node<K>>,
}

impl<'a, K> Levels<'a, K> {
    pub(crate) fn new(root: &'a Node<K>) -> Self {
        Self {
            frontier: vec![root],
        }
    }
}

impl<K> Clone for Levels<'_, K> {
    fn clone(&self) -> Self {
        Self {
            frontier: self.frontier.clone(),
        }
    }
}

impl<'a, K> Iterator for Levels<'a, K> {
    type Item = Vec<&'a [K]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frontier.is_empty() {
            return None;
        }

        let level = self.frontier.iter().map(|&node| node.keys.as_slice()).collect();
        self.frontier = self
            .frontier
            .iter()
            .flat_map(|&node| node.present_children())
            .collect();

        Some(level)
    }
}

impl<K> FusedIterator for Levels<'_, K> {}

/// Text rendering of [`Levels`].
///
/// One line per level; every node as `[k1, k2, ...]`; nodes on a line
/// separated by a single space.
///
/// ```text
/// [10]
/// [5, 6, 7] [12, 17, 20, 30]
/// ```
pub struct LevelDump<'a, K> {
    root: &'a Node<K>,
}

impl<'a, K> LevelDump<'a, K> {
    pub(crate) fn new(root: &'a Node<K>) -> Self {
        Self { root }
    }
}

impl<K: fmt::Display> fmt::Display for LevelDump<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_levels(f, self.root, |f, key| write!(f, "{}", key))
    }
}

/// Write the level rendering of `root` into `out`, formatting each key with
/// `render`.
pub(crate) fn write_levels<K, W, F>(out: &mut W, root: &Node<K>, mut render: F) -> fmt::Result
where
    W: fmt::Write,
    F: FnMut(&mut W, &K) -> fmt::Result,
{
    for level in Levels::new(root) {
        for (i, group) in level.iter().enumerate() {
            if i > 0 {
                out.write_str(" ")?;
            }
            out.write_str("[")?;
            for (j, key) in group.iter().enumerate() {
                if j > 0 {
                    out.write_str(", ")?;
                }
                render(out, key)?;
            }
            out.write_str("]")?;
        }
        out.write_str("\n")?;
    }
    Ok(())
}
