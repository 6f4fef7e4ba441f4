//! Configuration errors.
//!
//! The workload engine itself has no recoverable failures: a backend that
//! panics fails the trial. Only the configuration surface (profile names,
//! fixture-size overrides, driver iteration counts) can be rejected.

use std::fmt as StdFmt;

/// Errors raised while resolving a profile or driver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Profile name is not `small` or `large`.
    UnknownProfile(String),

    /// Fixture-size override is not a non-negative integer that fits an `i32` index.
    InvalidFixtureSize(String),

    /// Iteration count is not a positive integer.
    InvalidIterations(String),

    /// Iteration count was zero.
    ZeroIterations,

    /// Operation name is not one of `get`, `put_update`, `put_remove`, `copy`.
    UnknownOperation(String),
}

impl StdFmt::Display for ConfigError {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::UnknownProfile(name) => {
                write!(f, "unknown profile {name:?} (expected \"small\" or \"large\")")
            }

            Self::InvalidFixtureSize(raw) => write!(f, "invalid fixture size {raw:?}"),

            Self::InvalidIterations(raw) => write!(f, "invalid iteration count {raw:?}"),

            Self::ZeroIterations => write!(f, "iteration count must be at least 1"),

            Self::UnknownOperation(name) => write!(f, "unknown operation {name:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}
