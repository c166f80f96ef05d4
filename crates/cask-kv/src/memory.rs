use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::batch::WriteBatch;
use crate::error::KvResult;
use crate::traits::KvEngine;

/// In-memory, `BTreeMap`-based ordered engine.
///
/// Intended for tests and embedding. All pairs are held in memory behind a
/// `RwLock` for safe concurrent access; the `BTreeMap` keeps keys in raw
/// byte order, matching the on-disk engines the contract models.
pub struct MemoryKvEngine {
    map: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryKvEngine {
    /// Create a new empty engine.
    pub fn new() -> Self {
        Self {
            map: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.map.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the engine holds no keys.
    pub fn is_empty(&self) -> bool {
        self.map.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored values.
    pub fn total_bytes(&self) -> u64 {
        self.map
            .read()
            .expect("lock poisoned")
            .values()
            .map(|v| v.len() as u64)
            .sum()
    }

    /// Remove all keys.
    pub fn clear(&self) {
        self.map.write().expect("lock poisoned").clear();
    }

    /// All keys, in byte order.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.map
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

impl Default for MemoryKvEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl KvEngine for MemoryKvEngine {
    fn get(&self, key: &[u8]) -> KvResult<Option<Vec<u8>>> {
        let map = self.map.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> KvResult<()> {
        let mut map = self.map.write().expect("lock poisoned");
        map.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn write(&self, batch: &WriteBatch) -> KvResult<()> {
        // One write lock for the whole batch makes application atomic with
        // respect to every other reader and writer of this engine.
        let mut map = self.map.write().expect("lock poisoned");
        for (key, value) in batch.entries() {
            map.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

impl std::fmt::Debug for MemoryKvEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("MemoryKvEngine")
            .field("key_count", &count)
            .finish()
    }
}
