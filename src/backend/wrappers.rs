//! Adapters that change how another backend is synchronized.

use std::fmt as StdFmt;

use parking_lot::Mutex;

use super::{MapBackend, SyncPolicy};
use crate::value::{Key, Value};

/// Self-synchronizing wrapper: every call takes an internal mutex.
///
/// Pays one lock acquisition per operation instead of one per sequence, so
/// it is reported as backend-managed. Compare against the same inner map
/// under [`SyncPolicy::ExternalLock`] to see per-call locking cost.
pub struct Synchronized<B>(Mutex<B>);

impl<B: MapBackend> Synchronized<B> {
    /// Consume the wrapper and return the inner map.
    pub fn into_inner(self) -> B {
        self.0.into_inner()
    }
}

impl<B: MapBackend> MapBackend for Synchronized<B> {
    const NAME: &'static str = "synchronized";
    const SYNC: SyncPolicy = SyncPolicy::BackendManaged;

    fn label() -> String {
        format!("synchronized<{}>", B::label())
    }

    fn new() -> Self {
        Self(Mutex::new(B::new()))
    }

    #[inline]
    fn put(&mut self, key: Key, value: Value) {
        self.0.lock().put(key, value);
    }

    #[inline]
    fn get(&self, key: Key) -> Option<Value> {
        self.0.lock().get(key)
    }

    #[inline]
    fn remove(&mut self, key: Key) {
        self.0.lock().remove(key);
    }

    fn duplicate(&self) -> Self {
        Self(Mutex::new(self.0.lock().duplicate()))
    }

    fn len(&self) -> usize {
        self.0.lock().len()
    }
}

impl<B: MapBackend + StdFmt::Debug> StdFmt::Debug for Synchronized<B> {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_tuple("Synchronized").field(&*self.0.lock()).finish()
    }
}

/// Runs the inner map with no harness lock at all.
///
/// Baseline for measuring what the external lock scope costs.
#[derive(Debug, Clone, Default)]
pub struct Unlocked<B>(B);

impl<B: MapBackend> Unlocked<B> {
    /// Consume the wrapper and return the inner map.
    pub fn into_inner(self) -> B {
        self.0
    }
}

impl<B: MapBackend> MapBackend for Unlocked<B> {
    const NAME: &'static str = "unlocked";
    const SYNC: SyncPolicy = SyncPolicy::None;

    fn label() -> String {
        format!("unlocked<{}>", B::label())
    }

    fn new() -> Self {
        Self(B::new())
    }

    #[inline]
    fn put(&mut self, key: Key, value: Value) {
        self.0.put(key, value);
    }

    #[inline]
    fn get(&self, key: Key) -> Option<Value> {
        self.0.get(key)
    }

    #[inline]
    fn remove(&mut self, key: Key) {
        self.0.remove(key);
    }

    fn duplicate(&self) -> Self {
        Self(self.0.duplicate())
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
