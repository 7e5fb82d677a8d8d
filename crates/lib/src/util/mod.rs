//! Shared utilities.
//!
//! Filesystem helpers and test support.

pub mod fs;

#[cfg(test)]
pub mod testutil;
