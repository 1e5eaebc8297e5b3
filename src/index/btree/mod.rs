//! B-tree index implementation.
//!
//! An in-memory B-tree set parameterized by its minimum degree `t` and a
//! key [`Comparator`].
//!
//! # Components
//! - [`BTree`] - The tree: lookup, top-down insertion, traversals
//! - [`Comparator`] / [`NaturalOrder`] - Key ordering
//! - [`SharedBTree`] - Readers-writer wrapper for use across threads
//! - [`Iter`] / [`Levels`] / [`LevelDump`] - In-order and level-order views
//! - [`TreeStats`] - Activity counters
//!
//! Deletion is not supported; [`BTree::remove`] reports `NotImplemented`.

mod comparator;
mod invariants;
mod iter;
mod node;
mod shared;
mod stats;
mod tree;

pub use comparator::{Comparator, NaturalOrder};
pub use iter::{Iter, LevelDump, Levels};
pub use shared::SharedBTree;
pub use stats::{StatsSnapshot, TreeStats};
pub use tree::BTree;
