//! Error types for ordered-btree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All errors a caller of this crate can observe.
///
/// Tree operations themselves are total: only construction, configuration
/// loading and the unimplemented deletion entry point can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The minimum degree was below 1.
    ///
    /// No tree is produced in this case.
    #[error("invalid configuration: minimum degree must be >= 1, got {min_degree}")]
    InvalidConfiguration { min_degree: usize },

    /// The operation is part of the public surface but has no implementation.
    #[error("operation not implemented: {0}")]
    NotImplemented(&'static str),

    /// An environment variable held a value that could not be used.
    #[error("invalid value for {name}: {message}")]
    InvalidEnvVar { name: String, message: String },
}

/// A broken structural invariant, found by `BTree::check_invariants`.
///
/// These are defects in the tree algorithms, never recoverable conditions.
/// Only tests and debug assertions look at them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Keys inside a node are not strictly increasing.
    #[error("keys out of order in node at depth {depth}")]
    UnorderedKeys { depth: usize },

    /// A key in a subtree falls outside the range its parent separators allow.
    #[error("key outside separator bounds at depth {depth}")]
    SeparatorBound { depth: usize },

    /// Leaves were found at different depths.
    #[error("leaf at depth {found}, expected all leaves at depth {expected}")]
    UnevenLeaves { expected: usize, found: usize },

    /// A node holds too few or too many keys.
    #[error("node at depth {depth} holds {keys} keys, allowed range is {min}..={max}")]
    KeyCount {
        depth: usize,
        keys: usize,
        min: usize,
        max: usize,
    },

    /// `children != keys + 1`.
    #[error("node at depth {depth} has {keys} keys but {children} child slots")]
    Arity {
        depth: usize,
        keys: usize,
        children: usize,
    },

    /// A node mixes absent and present child slots.
    #[error("node at depth {depth} mixes present and absent children")]
    MixedChildren { depth: usize },

    /// The cached length disagrees with the number of stored keys.
    #[error("tree reports {reported} keys but holds {actual}")]
    LengthMismatch { reported: usize, actual: usize },
}
