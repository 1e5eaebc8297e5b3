//! Common types and utilities shared across the crate.
//!
//! This module contains:
//! - Configuration constants and the environment loader
//! - Error types

pub mod config;
pub mod error;

pub use config::TreeConfig;
pub use error::{Error, InvariantViolation, Result};
