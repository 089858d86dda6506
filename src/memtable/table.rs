//! MemTable implementation
//!
//! Skiplist-based memtable with an atomic size counter.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use crossbeam_skiplist::SkipMap;

use super::{Lookup, MemTableEntry};

/// In-memory table for recent writes
///
/// ## Concurrency:
/// - `data`: concurrent skiplist, no external lock needed for point ops
/// - `approx_size`: atomic counter, only ever incremented
/// - All methods use `&self`
pub struct MemTable {
    /// Sorted entries, tombstones included
    data: SkipMap<Bytes, MemTableEntry>,

    /// Sum of `key.len() + value.len()` over every value write.
    /// Overwrites add again and tombstones add nothing, so this is an
    /// upper bound on live bytes that never decreases.
    approx_size: AtomicUsize,
}

impl MemTable {
    /// Create a new empty MemTable
    pub fn new() -> Self {
        Self {
            data: SkipMap::new(),
            approx_size: AtomicUsize::new(0),
        }
    }

    /// Look up a key, keeping tombstones distinct from absence
    pub fn lookup(&self, key: &[u8]) -> Lookup {
        match self.data.get(key) {
            Some(entry) => match entry.value() {
                MemTableEntry::Value(value) => Lookup::Found(value.clone()),
                MemTableEntry::Tombstone => Lookup::Tombstone,
            },
            None => Lookup::Absent,
        }
    }

    /// Get the raw entry for a key, if this table has one
    pub fn get(&self, key: &[u8]) -> Option<MemTableEntry> {
        self.data.get(key).map(|entry| entry.value().clone())
    }

    /// Put a key-value pair
    ///
    /// Returns the approximate size after the write.
    pub fn put(&self, key: Bytes, value: Bytes) -> usize {
        let added = key.len() + value.len();
        self.data.insert(key, MemTableEntry::Value(value));

        // Rotation re-reads this under the chain's exclusive lock, after
        // every writer holding the shared lock has finished.
        self.approx_size.fetch_add(added, Ordering::Relaxed) + added
    }

    /// Delete a key (inserts tombstone)
    ///
    /// Tombstones are not charged to the size counter. Returns the current
    /// approximate size.
    pub fn delete(&self, key: Bytes) -> usize {
        self.data.insert(key, MemTableEntry::Tombstone);
        self.size()
    }

    /// Get approximate size in bytes
    pub fn size(&self) -> usize {
        self.approx_size.load(Ordering::Relaxed)
    }

    /// Get entry count (tombstones included)
    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    /// Check if the table holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if should rotate (size >= limit)
    pub fn should_rotate(&self, size_limit: usize) -> bool {
        self.size() >= size_limit
    }

    /// Snapshot of all entries in ascending key order, tombstones included
    pub fn entries(&self) -> Vec<(Bytes, MemTableEntry)> {
        self.data
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl Default for MemTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only handle to a table that has been rotated out of the write path
///
/// Only exposes lookups and iteration, so a frozen table cannot be written
/// through this handle.
#[derive(Clone)]
pub struct FrozenMemTable {
    inner: Arc<MemTable>,
}

impl FrozenMemTable {
    pub(crate) fn new(table: Arc<MemTable>) -> Self {
        Self { inner: table }
    }

    /// Look up a key, keeping tombstones distinct from absence
    pub fn lookup(&self, key: &[u8]) -> Lookup {
        self.inner.lookup(key)
    }

    /// Approximate size in bytes at the moment it was frozen (plus any
    /// writes that were in flight then)
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    pub fn entry_count(&self) -> usize {
        self.inner.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Snapshot of all entries in ascending key order, tombstones included
    pub fn entries(&self) -> Vec<(Bytes, MemTableEntry)> {
        self.inner.entries()
    }

    /// Whether two handles name the same underlying table
    pub fn ptr_eq(&self, other: &FrozenMemTable) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for FrozenMemTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrozenMemTable")
            .field("size", &self.size())
            .field("entries", &self.entry_count())
            .finish()
    }
}
