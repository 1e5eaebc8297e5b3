//! Configuration constants and environment-driven settings.
//!
//! # Environment Variables
//!
//! - `BTREE_MIN_DEGREE`: Minimum degree `t` of the tree (default: `3`)
//! - `BTREE_KEY_COUNT`: Number of keys the demo inserts (default: `12`)
//! - `BTREE_KEY_RANGE`: Demo keys are drawn from `0..range` (default: `20`)

use crate::common::{Error, Result};

/// Minimum degree used when none is configured.
///
/// With `t = 3` a node holds between 2 and 5 keys (root: 0 to 5).
pub const DEFAULT_MIN_DEGREE: usize = 3;

/// Smallest minimum degree a tree accepts.
///
/// At `t = 1` every node holds at most one key and the tree degenerates
/// into a chain-like shape, but all invariants still hold.
pub const MIN_DEGREE_FLOOR: usize = 1;

/// Number of keys the demo driver inserts by default.
pub const DEFAULT_KEY_COUNT: usize = 12;

/// Upper bound (exclusive) of the demo's random keys.
pub const DEFAULT_KEY_RANGE: u32 = 20;

pub const ENV_MIN_DEGREE: &str = "BTREE_MIN_DEGREE";
pub const ENV_KEY_COUNT: &str = "BTREE_KEY_COUNT";
pub const ENV_KEY_RANGE: &str = "BTREE_KEY_RANGE";

/// Settings for building and exercising a tree.
///
/// # Post-conditions
///
/// When constructed via `from_env()`:
/// - `min_degree >= MIN_DEGREE_FLOOR`
/// - `key_range >= 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Minimum degree `t` passed to `BTree::new`.
    pub min_degree: usize,
    /// How many keys to insert.
    pub key_count: usize,
    /// Keys are drawn uniformly from `0..key_range`.
    pub key_range: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            min_degree: DEFAULT_MIN_DEGREE,
            key_count: DEFAULT_KEY_COUNT,
            key_range: DEFAULT_KEY_RANGE,
        }
    }
}

impl TreeConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEnvVar` if a variable is set but not a valid
    /// number, or if `BTREE_MIN_DEGREE` / `BTREE_KEY_RANGE` is zero.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` is this with `std::env::var`; tests pass a map instead of
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let min_degree = parse_var(&lookup, ENV_MIN_DEGREE, DEFAULT_MIN_DEGREE)?;
        if min_degree < MIN_DEGREE_FLOOR {
            return Err(Error::InvalidEnvVar {
                name: ENV_MIN_DEGREE.to_string(),
                message: format!("must be at least {}", MIN_DEGREE_FLOOR),
            });
        }

        let key_count = parse_var(&lookup, ENV_KEY_COUNT, DEFAULT_KEY_COUNT)?;

        let key_range = parse_var(&lookup, ENV_KEY_RANGE, DEFAULT_KEY_RANGE)?;
        if key_range == 0 {
            return Err(Error::InvalidEnvVar {
                name: ENV_KEY_RANGE.to_string(),
                message: "must not be zero".to_string(),
            });
        }

        Ok(Self {
            min_degree,
            key_count,
            key_range,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| Error::InvalidEnvVar {
            name: name.to_string(),
            message: format!("{:?}: {}", raw, e),
        }),
    }
}
