//! The four canonical operation sequences.
//!
//! Every sequence starts with the same **populate** phase: `put(keys[i],
//! primary[i])` for `i` in ascending order. Populate is part of the measured
//! work, not a warm-up. The phase-specific work follows:
//!
//! | Sequence      | After populate                                            |
//! |---------------|-----------------------------------------------------------|
//! | `get`         | `N / 2` rounds of one hit lookup and one miss lookup      |
//! | `put_update`  | `put(keys[i], secondary[i])` for every `i`, ascending     |
//! | `put_remove`  | `remove(keys[i])` for every `i`, ascending                |
//! | `copy`        | one `duplicate()`                                         |
//!
//! Lookup results are never inspected. They pass through [`black_box`] so
//! the calls cannot be optimized away.

use std::fmt as StdFmt;
use std::hint::black_box;
use std::str::FromStr;

use crate::backend::MapBackend;
use crate::context::Fixtures;
use crate::error::ConfigError;
use crate::random::RandomSource;
use crate::value::Key;

// ============================================================================
//  Operation
// ============================================================================

/// Names one of the four sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    /// Populate, then mixed hit/miss lookups.
    Get,
    /// Populate, then overwrite every key with its secondary value.
    PutUpdate,
    /// Populate, then remove every key.
    PutRemove,
    /// Populate, then duplicate the map.
    Copy,
}

impl Operation {
    /// All sequences, in report order.
    pub const ALL: [Self; 4] = [Self::Get, Self::PutUpdate, Self::PutRemove, Self::Copy];

    /// Snake-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::PutUpdate => "put_update",
            Self::PutRemove => "put_remove",
            Self::Copy => "copy",
        }
    }

    /// Number of backend calls one run makes against a fixture of `n` slots.
    ///
    /// Counts `put`, `get` and `remove` calls; `duplicate` counts as one.
    #[must_use]
    pub const fn call_count(self, n: usize) -> usize {
        match self {
            Self::Get => n + (n / 2) * 2,
            Self::PutUpdate | Self::PutRemove => 2 * n,
            Self::Copy => n + 1,
        }
    }
}

impl StdFmt::Display for Operation {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "get" => Ok(Self::Get),
            "put_update" | "update" => Ok(Self::PutUpdate),
            "put_remove" | "remove" => Ok(Self::PutRemove),
            "copy" => Ok(Self::Copy),
            _ => Err(ConfigError::UnknownOperation(s.to_string())),
        }
    }
}

// ============================================================================
//  Sequences
// ============================================================================

/// Key for a designed-to-miss lookup.
///
/// `i32::MIN + nonneg_below(i32::MAX) - 1` in wrapping 32-bit arithmetic,
/// widened to a key. A zero draw wraps to `i32::MAX`. The key is not checked
/// against the fixture key set.
#[inline]
pub fn miss_key<R: RandomSource + ?Sized>(rng: &mut R) -> Key {
    Key::from(
        i32::MIN
            .wrapping_add(rng.nonneg_i32_below(i32::MAX))
            .wrapping_sub(1),
    )
}

/// Shared first phase: `put(keys[i], primary[i])` for `i` ascending.
#[inline]
pub fn populate<B: MapBackend>(map: &mut B, fixtures: &Fixtures) {
    for (key, value) in fixtures.primary_entries() {
        map.put(key, value.clone());
    }
}

/// Populate, then `N / 2` rounds of one hit and one miss lookup.
///
/// Hit keys are drawn uniformly from the fixture keys; miss keys come from
/// [`miss_key`]. For odd `N` the last round is dropped.
pub fn get<B: MapBackend, R: RandomSource + ?Sized>(map: &mut B, fixtures: &Fixtures, rng: &mut R) {
    populate(map, fixtures);

    let keys = fixtures.keys();
    for _ in 0..keys.len() / 2 {
        let hit = keys.get(rng.index_below(keys.len())).copied().unwrap_or_default();
        black_box(map.get(hit));
        black_box(map.get(miss_key(rng)));
    }
}

/// Populate, then overwrite every key with its secondary value.
pub fn put_update<B: MapBackend>(map: &mut B, fixtures: &Fixtures) {
    populate(map, fixtures);

    for (key, value) in fixtures.secondary_entries() {
        map.put(key, value.clone());
    }
}

/// Populate, then remove every key.
pub fn put_remove<B: MapBackend>(map: &mut B, fixtures: &Fixtures) {
    populate(map, fixtures);

    for &key in fixtures.keys() {
        map.remove(key);
    }
}

/// Populate, then return one duplicate of the map.
#[must_use]
pub fn copy<B: MapBackend>(map: &mut B, fixtures: &Fixtures) -> B {
    populate(map, fixtures);
    map.duplicate()
}
