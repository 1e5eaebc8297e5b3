//! Structural self-check for tests and debugging.

use std::cmp::Ordering;

use crate::common::InvariantViolation;
use crate::index::btree::node::{max_keys, min_keys, Node};
use crate::index::btree::{BTree, Comparator};

impl<K, C: Comparator<K>> BTree<K, C> {
    /// Walk the whole tree and report the first broken invariant.
    ///
    /// Checks, for every node:
    /// 1. keys strictly increasing under the comparator
    /// 2. keys within the bounds set by the parent's separators
    /// 3. all leaves at the same depth
    /// 4. key count within `t-1..=2t-1` (root: `0..=2t-1`)
    /// 5. `children == keys + 1`, slots all present or all absent
    ///
    /// and that `len()` matches the number of stored keys.
    ///
    /// Costs `O(n)`; meant for tests and debug builds.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut checker = Checker {
            comparator: self.comparator(),
            min_degree: self.min_degree(),
            leaf_depth: None,
            keys_seen: 0,
        };

        checker.check(self.root(), 0, None, None)?;

        if checker.keys_seen != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                reported: self.len(),
                actual: checker.keys_seen,
            });
        }
        Ok(())
    }
}

struct Checker<'a, C> {
    comparator: &'a C,
    min_degree: usize,
    leaf_depth: Option<usize>,
    keys_seen: usize,
}

impl<C> Checker<'_, C> {
    fn check<K>(
        &mut self,
        node: &Node<K>,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<(), InvariantViolation>
    where
        C: Comparator<K>,
    {
        let keys = node.keys.len();
        let children = node.children.len();

        if children != keys + 1 {
            return Err(InvariantViolation::Arity {
                depth,
                keys,
                children,
            });
        }

        let min = if depth == 0 { 0 } else { min_keys(self.min_degree) };
        let max = max_keys(self.min_degree);
        if keys < min || keys > max {
            return Err(InvariantViolation::KeyCount {
                depth,
                keys,
                min,
                max,
            });
        }

        for pair in node.keys.windows(2) {
            if self.comparator.compare(&pair[0], &pair[1]) != Ordering::Less {
                return Err(InvariantViolation::UnorderedKeys { depth });
            }
        }

        for key in &node.keys {
            let above_lower = lower.map_or(true, |lo| self.comparator.compare(key, lo) == Ordering::Greater);
            let below_upper = upper.map_or(true, |hi| self.comparator.compare(key, hi) == Ordering::Less);
            if !above_lower || !below_upper {
                return Err(InvariantViolation::SeparatorBound { depth });
            }
        }

        self.keys_seen += keys;

        let present = node.children.iter().filter(|c| c.is_some()).count();
        if present == 0 {
            return match self.leaf_depth {
                None => {
                    self.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => Err(InvariantViolation::UnevenLeaves {
                    expected,
                    found: depth,
                }),
            };
        }
        if present != children {
            return Err(InvariantViolation::MixedChildren { depth });
        }

        for (i, child) in node.present_children().enumerate() {
            let lo = if i == 0 { lower } else { node.keys.get(i - 1) };
            let hi = if i == keys { upper } else { node.keys.get(i) };
            self.check(child, depth + 1, lo, hi)?;
        }
        Ok(())
    }
}
