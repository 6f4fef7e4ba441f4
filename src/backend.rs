//! The map capability set every candidate backend exposes.
//!
//! The workload engine only ever talks to [`MapBackend`]. Each adapter also
//! declares a [`SyncPolicy`], which the harness honours identically for every
//! sequence run against that backend:
//!
//! | Policy            | Harness behaviour                                       |
//! |-------------------|---------------------------------------------------------|
//! | `None`            | No locking. Baseline for single-threaded maps.          |
//! | `ExternalLock`    | One mutex scope around populate + operate (+ duplicate).|
//! | `BackendManaged`  | No harness lock; the backend synchronizes internally.   |
//!
//! ## Adapter contract
//!
//! - `put` inserts or overwrites.
//! - `get` after `remove` reports absent.
//! - `duplicate` returns a map with the same associations that shares no
//!   mutable state with the source, in either direction.

use std::fmt as StdFmt;

use crate::value::{Key, Value};

mod concurrent;
mod std_maps;
mod wrappers;

pub use concurrent::{DashMapBackend, PapayaBackend, SkipMapBackend, TreeIndexBackend};
pub use std_maps::{ArrayMap, HashbrownMap, StdBTreeMap, StdHashMap};
pub use wrappers::{Synchronized, Unlocked};

// ============================================================================
//  SyncPolicy
// ============================================================================

/// How the harness synchronizes a backend during a sequence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncPolicy {
    /// Used from one logical thread; the harness takes no lock.
    None,

    /// The harness holds a mutex across the whole sequence.
    ExternalLock,

    /// The backend provides its own concurrency safety.
    BackendManaged,
}

impl SyncPolicy {
    /// Whether the harness must wrap the sequence in a lock scope.
    #[must_use]
    #[inline]
    pub const fn requires_harness_lock(self) -> bool {
        matches!(self, Self::ExternalLock)
    }

    /// Short name, used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ExternalLock => "external-lock",
            Self::BackendManaged => "backend-managed",
        }
    }
}

impl StdFmt::Display for SyncPolicy {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
//  MapBackend
// ============================================================================

/// Minimal `Key -> Value` map capability set.
///
/// Concurrent maps take `&self` internally; the trait uses `&mut self` for
/// mutation so plain maps bind without interior mutability.
pub trait MapBackend: Sized {
    /// Adapter name.
    const NAME: &'static str;

    /// Synchronization the harness applies around sequence runs.
    const SYNC: SyncPolicy;

    /// Report label, unique per concrete backend type.
    ///
    /// Wrappers include their inner backend's label.
    fn label() -> String {
        Self::NAME.to_string()
    }

    /// Fresh, empty map.
    fn new() -> Self;

    /// Insert or overwrite `key`.
    fn put(&mut self, key: Key, value: Value);

    /// Look up `key`.
    fn get(&self, key: Key) -> Option<Value>;

    /// Remove `key` if present.
    fn remove(&mut self, key: Key);

    /// Structurally independent copy of the current associations.
    #[must_use]
    fn duplicate(&self) -> Self;

    /// Number of associations.
    fn len(&self) -> usize;

    /// True when the map holds no associations.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
