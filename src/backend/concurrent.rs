//! Maps that synchronize internally. The harness never locks them.
//!
//! - `dashmap::DashMap`: sharded `RwLock`s over SwissTable shards.
//! - `papaya::HashMap`: lock-free reads, incremental resizing, epoch guards.
//! - `crossbeam_skiplist::SkipMap`: lock-free ordered skip list.
//! - `scc::TreeIndex`: concurrent B+tree with lock-free reads.

use std::fmt as StdFmt;

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use papaya::HashMap as PapayaMap;
use scc::TreeIndex;
use sdd::Guard as SddGuard;

use super::{MapBackend, SyncPolicy};
use crate::value::{Key, Value};

// ============================================================================
//  DashMap
// ============================================================================

/// `dashmap::DashMap`.
#[derive(Clone, Default)]
pub struct DashMapBackend(DashMap<Key, Value>);

impl MapBackend for DashMapBackend {
    const NAME: &'static str = "dashmap";
    const SYNC: SyncPolicy = SyncPolicy::BackendManaged;

    fn new() -> Self {
        Self(DashMap::new())
    }

    #[inline]
    fn put(&mut self, key: Key, value: Value) {
        self.0.insert(key, value);
    }

    #[inline]
    fn get(&self, key: Key) -> Option<Value> {
        self.0.get(&key).map(|r| r.value().clone())
    }

    #[inline]
    fn remove(&mut self, key: Key) {
        self.0.remove(&key);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl StdFmt::Debug for DashMapBackend {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_struct("DashMapBackend").field("len", &self.0.len()).finish()
    }
}

// ============================================================================
//  papaya
// ============================================================================

/// `papaya::HashMap`. Each call pins its own guard.
pub struct PapayaBackend(PapayaMap<Key, Value>);

impl MapBackend for PapayaBackend {
    const NAME: &'static str = "papaya";
    const SYNC: SyncPolicy = SyncPolicy::BackendManaged;

    fn new() -> Self {
        Self(PapayaMap::new())
    }

    #[inline]
    fn put(&mut self, key: Key, value: Value) {
        self.0.pin().insert(key, value);
    }

    #[inline]
    fn get(&self, key: Key) -> Option<Value> {
        self.0.pin().get(&key).cloned()
    }

    #[inline]
    fn remove(&mut self, key: Key) {
        self.0.pin().remove(&key);
    }

    fn duplicate(&self) -> Self {
        let source = self.0.pin();
        let copy = PapayaMap::with_capacity(source.len());
        {
            let target = copy.pin();
            for (key, value) in source.iter() {
                target.insert(*key, value.clone());
            }
        }
        Self(copy)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl StdFmt::Debug for PapayaBackend {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_struct("PapayaBackend").field("len", &self.0.len()).finish()
    }
}

// ============================================================================
//  SkipMap
// ============================================================================

/// `crossbeam_skiplist::SkipMap`.
pub struct SkipMapBackend(SkipMap<Key, Value>);

impl MapBackend for SkipMapBackend {
    const NAME: &'static str = "skipmap";
    const SYNC: SyncPolicy = SyncPolicy::BackendManaged;

    fn new() -> Self {
        Self(SkipMap::new())
    }

    #[inline]
    fn put(&mut self, key: Key, value: Value) {
        self.0.insert(key, value);
    }

    #[inline]
    fn get(&self, key: Key) -> Option<Value> {
        self.0.get(&key).map(|e| e.value().clone())
    }

    #[inline]
    fn remove(&mut self, key: Key) {
        self.0.remove(&key);
    }

    fn duplicate(&self) -> Self {
        let copy = SkipMap::new();
        for entry in &self.0 {
            copy.insert(*entry.key(), entry.value().clone());
        }
        Self(copy)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl StdFmt::Debug for SkipMapBackend {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_struct("SkipMapBackend").field("len", &self.0.len()).finish()
    }
}

// ============================================================================
//  scc::TreeIndex
// ============================================================================

/// `scc::TreeIndex`.
///
/// `insert_sync` refuses existing keys, so an overwrite is remove + insert.
pub struct TreeIndexBackend(TreeIndex<Key, Value>);

impl MapBackend for TreeIndexBackend {
    const NAME: &'static str = "scc_treeindex";
    const SYNC: SyncPolicy = SyncPolicy::BackendManaged;

    fn new() -> Self {
        Self(TreeIndex::new())
    }

    #[inline]
    fn put(&mut self, key: Key, value: Value) {
        if let Err((key, value)) = self.0.insert_sync(key, value) {
            self.0.remove_sync(&key);
            let _ = self.0.insert_sync(key, value);
        }
    }

    #[inline]
    fn get(&self, key: Key) -> Option<Value> {
        self.0.peek(&key, &SddGuard::new()).cloned()
    }

    #[inline]
    fn remove(&mut self, key: Key) {
        self.0.remove_sync(&key);
    }

    fn duplicate(&self) -> Self {
        let guard = SddGuard::new();
        let copy = TreeIndex::new();
        for (key, value) in self.0.iter(&guard) {
            let _ = copy.insert_sync(*key, value.clone());
        }
        Self(copy)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl StdFmt::Debug for TreeIndexBackend {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_struct("TreeIndexBackend").field("len", &self.0.len()).finish()
    }
}
