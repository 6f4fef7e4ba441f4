//! # `mapbench`
//!
//! A reproducible micro-benchmark harness for ranking `i64 -> Value` map
//! backends under a fixed set of access patterns.
//!
//! ## Pieces
//!
//! - [`value`]: the closed payload type with structural equality and hash.
//! - [`generator`]: random payloads in the shape of a [`Profile`].
//! - [`context`]: per-trial fixtures (keys `0..N`, primary and secondary values).
//! - [`workload`]: the four sequences (Get, PutUpdate, PutRemove, Copy).
//! - [`backend`]: the [`MapBackend`] trait and one adapter per candidate map.
//! - [`harness`]: entry points that apply each backend's [`SyncPolicy`].
//! - [`driver`]: a wall-clock trial runner used by the `mapbench` binary.
//!
//! ## Example
//!
//! ```rust
//! use mapbench::backend::{DashMapBackend, MapBackend, StdHashMap};
//! use mapbench::{Profile, WorkloadContext, harness};
//!
//! let mut ctx = WorkloadContext::setup_seeded(Profile::custom(100), 42);
//!
//! // Populate, then 50 hit + 50 miss lookups. StdHashMap runs under a harness lock.
//! let map: StdHashMap = harness::run_get(&mut ctx);
//! assert_eq!(map.len(), 100);
//!
//! // Populate, then duplicate. DashMap synchronizes itself.
//! let copy: DashMapBackend = harness::run_copy(&ctx);
//! assert_eq!(copy.len(), 100);
//!
//! ctx.teardown();
//! ```
//!
//! ## Fairness
//!
//! Every sequence includes its populate phase in the measured work. Values are
//! reference counted, so every backend pays the same constant cost to store a
//! payload regardless of its variant. Lock-wrapped single-threaded maps pay one
//! lock acquisition per sequence, mirroring a thread-safe caller.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod context;
pub mod driver;
pub mod error;
pub mod generator;
pub mod harness;
pub mod profile;
pub mod random;
pub mod value;
pub mod workload;

mod tracing_helpers;

// Re-export main types for convenience
pub use backend::{MapBackend, SyncPolicy};
pub use context::{Fixtures, WorkloadContext};
pub use error::ConfigError;
pub use generator::PayloadGenerator;
pub use profile::Profile;
pub use random::RandomSource;
pub use value::{CompositePayload, Key, Value, VariantKind};
pub use workload::Operation;

/// Install a console `tracing` subscriber filtered by `RUST_LOG`.
///
/// Defaults to `info` when `RUST_LOG` is unset. Safe to call more than once;
/// later calls are ignored.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .compact()
        .try_init();
}

/// No-op without the `tracing` feature.
#[cfg(not(feature = "tracing"))]
pub const fn init_tracing() {}
