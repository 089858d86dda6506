//! MemTable Module
//!
//! In-memory data structures for recent writes.
//!
//! ## Responsibilities
//! - Fast concurrent reads and writes in memory
//! - Track approximate size for rotation triggers
//! - Rotate a full active table into a read-only frozen chain
//! - Resolve reads across layers in recency order
//!
//! ## Layers
//! ```text
//!   write ──► ┌──────────────┐
//!             │    active    │  (MemTable, writable)
//!   read ───► └──────┬───────┘
//!                    │ Absent
//!                    ▼
//!             ┌──────────────┐
//!             │  frozen[n-1] │  (newest rotation)
//!             └──────┬───────┘
//!                    │ Absent
//!                    ▼
//!                   ...
//!             ┌──────────────┐
//!             │  frozen[0]   │  (oldest rotation)
//!             └──────────────┘
//! ```
//!
//! A `Found` or a `Tombstone` in any layer ends the search.
//!
//! ## Data Structure Choice
//! Each table is a `crossbeam_skiplist::SkipMap`: ordered keys (needed by a
//! future flush) and lock-free concurrent point operations, so the chain
//! lock only has to guard which table is active.

mod table;
mod chain;

use bytes::Bytes;

pub use table::{FrozenMemTable, MemTable};
pub use chain::TableChain;

/// Entry stored in the MemTable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemTableEntry {
    /// A live value
    Value(Bytes),

    /// A tombstone (deleted key)
    Tombstone,
}

/// Outcome of a point lookup in a single table
///
/// `Tombstone` and `Absent` are deliberately distinct: a tombstone ends a
/// layered search, absence moves it on to the next older table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The key holds a live value in this table
    Found(Bytes),

    /// The key was deleted in this table
    Tombstone,

    /// This table has never seen the key
    Absent,
}
