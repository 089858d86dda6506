//! Table chain
//!
//! One writable table plus the frozen tables rotated out of it.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::Result;

use super::{FrozenMemTable, Lookup, MemTable, MemTableEntry};

/// The tables the chain lock protects
struct Layers {
    /// The only writable table
    active: Arc<MemTable>,

    /// Rotated tables, oldest first. Append-only.
    frozen: Vec<FrozenMemTable>,
}

/// Active memtable plus the chain of frozen memtables
///
/// ## Concurrency:
/// - `layers`: RwLock guarding *which* table is active and the frozen list
///   - Shared: every read and every write (writes do not serialize)
///   - Exclusive: only the rotation swap
/// - Table contents are guarded by each table's own skiplist
pub struct TableChain {
    layers: RwLock<Layers>,
}

impl TableChain {
    /// Create a chain with an empty active table and no frozen tables
    pub fn new() -> Self {
        Self {
            layers: RwLock::new(Layers {
                active: Arc::new(MemTable::new()),
                frozen: Vec::new(),
            }),
        }
    }

    /// Apply a value or a tombstone to the active table
    ///
    /// Holds the shared lock for the whole write, so a rotation cannot swap
    /// the table out from under it. Returns the active table's approximate
    /// size after the write.
    pub fn write(&self, key: Bytes, entry: MemTableEntry) -> Result<usize> {
        let layers = self.layers.read();

        let size = match entry {
            MemTableEntry::Value(value) => layers.active.put(key, value),
            MemTableEntry::Tombstone => layers.active.delete(key),
        };

        Ok(size)
    }

    /// Resolve a key across all layers
    ///
    /// Search order:
    /// 1. Active table
    /// 2. Frozen tables (newest to oldest)
    ///
    /// The first layer that has the key decides: a value is returned, a
    /// tombstone yields `None` without consulting older layers.
    pub fn read(&self, key: &[u8]) -> Option<Bytes> {
        let (active, frozen) = {
            let layers = self.layers.read();
            (Arc::clone(&layers.active), layers.frozen.clone())
        };

        match active.lookup(key) {
            Lookup::Found(value) => return Some(value),
            Lookup::Tombstone => return None,
            Lookup::Absent => {}
        }

        for table in frozen.iter().rev() {
            match table.lookup(key) {
                Lookup::Found(value) => return Some(value),
                Lookup::Tombstone => return None,
                Lookup::Absent => continue,
            }
        }

        None
    }

    /// Freeze the active table if it has reached `size_limit`
    ///
    /// Concurrent callers that all observed the same full table produce
    /// exactly one rotation: the size is checked again under the exclusive
    /// lock, and a freshly installed table is below the limit.
    ///
    /// Returns `true` if this call performed the rotation.
    pub fn maybe_rotate(&self, size_limit: usize) -> bool {
        if !self.layers.read().active.should_rotate(size_limit) {
            return false;
        }

        // Allocated before taking the exclusive lock
        let fresh = Arc::new(MemTable::new());

        let mut layers = self.layers.write();
        if !layers.active.should_rotate(size_limit) {
            debug!(size_limit, "memtable already rotated by another writer");
            return false;
        }

        Self::swap_active(&mut layers, fresh);
        true
    }

    /// Freeze the active table unconditionally
    ///
    /// An empty active table is left in place. Returns `true` if a table was
    /// frozen.
    pub fn freeze(&self) -> bool {
        let fresh = Arc::new(MemTable::new());

        let mut layers = self.layers.write();
        if layers.active.is_empty() {
            return false;
        }

        Self::swap_active(&mut layers, fresh);
        true
    }

    /// Called with the exclusive lock held
    fn swap_active(layers: &mut Layers, fresh: Arc<MemTable>) {
        let old = std::mem::replace(&mut layers.active, fresh);
        let size = old.size();
        let entries = old.entry_count();

        layers.frozen.push(FrozenMemTable::new(old));

        debug!(
            size,
            entries,
            frozen_tables = layers.frozen.len(),
            "memtable frozen"
        );
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Approximate size of the active table
    pub fn active_size(&self) -> usize {
        self.layers.read().active.size()
    }

    /// Entry count of the active table
    pub fn active_entry_count(&self) -> usize {
        self.layers.read().active.entry_count()
    }

    /// Snapshot of the frozen tables, oldest first
    pub fn frozen(&self) -> Vec<FrozenMemTable> {
        self.layers.read().frozen.clone()
    }

    /// Number of frozen tables
    pub fn frozen_count(&self) -> usize {
        self.layers.read().frozen.len()
    }
}

impl Default for TableChain {
    fn default() -> Self {
        Self::new()
    }
}
