//! Engine Module
//!
//! The storage engine façade over the memtable chain.
//!
//! ## Responsibilities
//! - Expose put/get/delete to callers
//! - Check the size threshold after every write
//! - Trigger memtable rotation through the chain
//! - Hand frozen tables to whoever persists them (future flush)

use bytes::Bytes;
use tracing::{info, trace};

use crate::config::Config;
use crate::error::Result;
use crate::memtable::{FrozenMemTable, MemTableEntry, TableChain};
use crate::protocol::{Command, Response};

/// The main storage engine
///
/// ## Concurrency Model: Shared writes, exclusive rotation
///
/// - **Writes** (put/delete): take the chain lock in shared mode
///   - Writers never serialize against each other
///   - The active table's skiplist handles concurrent inserts
///
/// - **Reads** (get): shared lock only long enough to snapshot the layers
///
/// - **Rotation**: exclusive lock, held for a size re-check and a swap
///
/// All methods take `&self`; wrap the engine in an `Arc` to share it
/// between threads.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Active memtable plus frozen memtables
    chain: TableChain,
}

/// Point-in-time view of the memtable layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    /// Approximate size of the active memtable
    pub active_size: usize,

    /// Entries (tombstones included) in the active memtable
    pub active_entries: usize,

    /// Number of frozen memtables awaiting flush
    pub frozen_tables: usize,

    /// Sum of approximate sizes of the frozen memtables
    pub frozen_size: usize,
}

impl Engine {
    /// Create an engine with the given config
    ///
    /// Starts with an empty active memtable and no frozen tables.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        info!(
            memtable_size_limit = config.memtable_size_limit,
            "engine opened"
        );

        Ok(Self {
            config,
            chain: TableChain::new(),
        })
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&self, command: Command) -> Result<Response> {
        match command {
            Command::Get { key } => Ok(match self.get(&key)? {
                Some(value) => Response::ok(Some(value)),
                None => Response::not_found(),
            }),
            Command::Put { key, value } => {
                self.put(&key, &value)?;
                Ok(Response::ok(None))
            }
            Command::Delete { key } => {
                self.delete(&key)?;
                Ok(Response::ok(None))
            }
            Command::Freeze => {
                let frozen = self.freeze()?;
                let message = if frozen { "frozen" } else { "active memtable empty" };
                Ok(Response::ok(Some(Bytes::from_static(message.as_bytes()))))
            }
            Command::Stats => {
                let stats = self.stats();
                let report = format!(
                    "active_size={} active_entries={} frozen_tables={} frozen_size={}",
                    stats.active_size, stats.active_entries, stats.frozen_tables, stats.frozen_size
                );
                Ok(Response::ok(Some(Bytes::from(report))))
            }
            Command::Ping => Ok(Response::ok(Some(Bytes::from_static(b"PONG")))),
        }
    }

    /// Get a value by key
    ///
    /// Search order:
    /// 1. Active memtable (most recent writes)
    /// 2. Frozen memtables (newest to oldest)
    ///
    /// A delete in a newer layer hides any value in an older one.
    pub fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        Ok(self.chain.read(key))
    }

    /// Put a key-value pair
    ///
    /// Steps:
    /// 1. Write to the active memtable (shared lock)
    /// 2. Rotate if the memtable reached the size limit
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        trace!(key_len = key.len(), value_len = value.len(), "put");

        let entry = MemTableEntry::Value(Bytes::copy_from_slice(value));
        let new_size = self.chain.write(Bytes::copy_from_slice(key), entry)?;

        self.rotate_if_full(new_size);
        Ok(())
    }

    /// Delete a key
    ///
    /// Records a tombstone in the active memtable; the same rotation check
    /// as `put` follows.
    pub fn delete(&self, key: &[u8]) -> Result<()> {
        trace!(key_len = key.len(), "delete");

        let new_size = self
            .chain
            .write(Bytes::copy_from_slice(key), MemTableEntry::Tombstone)?;

        self.rotate_if_full(new_size);
        Ok(())
    }

    /// Rotate the active memtable now, whatever its size
    ///
    /// Returns `false` if the active memtable was empty.
    pub fn freeze(&self) -> Result<bool> {
        Ok(self.chain.freeze())
    }

    fn rotate_if_full(&self, new_size: usize) {
        let limit = self.config.memtable_size_limit;
        if new_size >= limit {
            self.chain.maybe_rotate(limit);
        }
    }

    // =========================================================================
    // Accessors (for flush collaborators, testing and debugging)
    // =========================================================================

    /// Snapshot of frozen memtables, oldest first
    pub fn frozen_tables(&self) -> Vec<FrozenMemTable> {
        self.chain.frozen()
    }

    /// Get the current active memtable size
    pub fn memtable_size(&self) -> usize {
        self.chain.active_size()
    }

    /// Get the active memtable entry count
    pub fn memtable_entry_count(&self) -> usize {
        self.chain.active_entry_count()
    }

    /// Get the number of frozen memtables
    pub fn frozen_count(&self) -> usize {
        self.chain.frozen_count()
    }

    pub fn stats(&self) -> EngineStats {
        let frozen = self.chain.frozen();
        EngineStats {
            active_size: self.chain.active_size(),
            active_entries: self.chain.active_entry_count(),
            frozen_tables: frozen.len(),
            frozen_size: frozen.iter().map(FrozenMemTable::size).sum(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
