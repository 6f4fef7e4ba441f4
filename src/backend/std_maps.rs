//! Single-threaded maps. The harness locks them externally.

use std::collections::{BTreeMap, HashMap};

use smallvec::SmallVec;

use super::{MapBackend, SyncPolicy};
use crate::value::{Key, Value};

/// `std::collections::HashMap` (SipHash).
#[derive(Debug, Clone, Default)]
pub struct StdHashMap(HashMap<Key, Value>);

impl MapBackend for StdHashMap {
    const NAME: &'static str = "std_hashmap";
    const SYNC: SyncPolicy = SyncPolicy::ExternalLock;

    fn new() -> Self {
        Self(HashMap::new())
    }

    #[inline]
    fn put(&mut self, key: Key, value: Value) {
        self.0.insert(key, value);
    }

    #[inline]
    fn get(&self, key: Key) -> Option<Value> {
        self.0.get(&key).cloned()
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

/// `std::collections::BTreeMap`. The only ordered map among the lock-wrapped backends.
#[derive(Debug, Clone, Default)]
pub struct StdBTreeMap(BTreeMap<Key, Value>);

impl MapBackend for StdBTreeMap {
    const NAME: &'static str = "std_btreemap";
    const SYNC: SyncPolicy = SyncPolicy::ExternalLock;

    fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[inline]
    fn put(&mut self, key: Key, value: Value) {
        self.0.insert(key, value);
    }

    #[inline]
    fn get(&self, key: Key) -> Option<Value> {
        self.0.get(&key).cloned()
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

/// `hashbrown::HashMap`: SwissTable open addressing with the crate's default hasher.
#[derive(Debug, Clone, Default)]
pub struct HashbrownMap(hashbrown::HashMap<Key, Value>);

impl MapBackend for HashbrownMap {
    const NAME: &'static str = "hashbrown";
    const SYNC: SyncPolicy = SyncPolicy::ExternalLock;

    fn new() -> Self {
        Self(hashbrown::HashMap::new())
    }

    #[inline]
    fn put(&mut self, key: Key, value: Value) {
        self.0.insert(key, value);
    }

    #[inline]
    fn get(&self, key: Key) -> Option<Value> {
        self.0.get(&key).cloned()
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

/// Inline capacity before an [`ArrayMap`] spills to the heap.
const ARRAY_MAP_INLINE: usize = 16;

/// Unordered parallel key/value arrays with linear lookup.
///
/// Every `get`, `put` and `remove` scans the keys, so sequences cost
/// `O(N^2)`. Removal swaps the last entry into the hole.
#[derive(Debug, Clone, Default)]
pub struct ArrayMap {
    keys: SmallVec<[Key; ARRAY_MAP_INLINE]>,
    values: SmallVec<[Value; ARRAY_MAP_INLINE]>,
}

impl ArrayMap {
    #[inline]
    fn position(&self, key: Key) -> Option<usize> {
        self.keys.iter().position(|&k| k == key)
    }
}

impl MapBackend for ArrayMap {
    const NAME: &'static str = "array_map";
    const SYNC: SyncPolicy = SyncPolicy::ExternalLock;

    fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn put(&mut self, key: Key, value: Value) {
        match self.position(key) {
            Some(i) => self.values[i] = value,
            None => {
                self.keys.push(key);
                self.values.push(value);
            }
        }
    }

    #[inline]
    fn get(&self, key: Key) -> Option<Value> {
        self.position(key).map(|i| self.values[i].clone())
    }

    #[inline]
    fn remove(&mut self, key: Key) {
        if let Some(i) = self.position(key) {
            self.keys.swap_remove(i);
            self.values.swap_remove(i);
        }
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}
