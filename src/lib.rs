//! ordered-btree - An in-memory B-tree with configurable minimum degree and
//! key ordering.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          ordered-btree                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          SharedBTree (index/btree/shared)               │   │
//! │  │        RwLock<BTree>: one writer or many readers        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │               BTree<K, C> (index/btree/tree)            │   │
//! │  │   contains · insert (top-down split) · iter · levels    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │               Node<K> (index/btree/node)                │   │
//! │  │     keys + child slots (children == keys + 1), split    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Error, config)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use ordered_btree::BTree;
//!
//! let mut tree = BTree::new(3).unwrap();
//! tree.extend([10, 20, 5, 6, 12, 30, 7, 17]);
//!
//! assert!(tree.contains(&12));
//! print!("{}", tree.dump());
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::DEFAULT_MIN_DEGREE;
pub use common::{Error, InvariantViolation, Result, TreeConfig};

pub use index::btree::{
    BTree, Comparator, Iter, LevelDump, Levels, NaturalOrder, SharedBTree, StatsSnapshot,
    TreeStats,
};
