//! # MiniLSM
//!
//! The in-memory write/read path of an LSM key-value engine:
//! - Concurrent skiplist memtable with approximate size tracking
//! - Rotation of a full memtable into a chain of frozen tables
//! - Layered reads where tombstones shadow older values
//! - Shared-lock writes, exclusive lock only for the rotation swap
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Engine (put/get/delete)                    │
//! │              size check after every write                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      TableChain                              │
//! │        RwLock<active + frozen> (shared / exclusive)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────────┐
//!   │  MemTable   │  rotate  │ Frozen MemTables │
//!   │  (active)   │ ───────► │ (read-only, n)   │
//!   └─────────────┘          └──────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod memtable;
pub mod protocol;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MiniLsmError, Result};
pub use config::Config;
pub use engine::{Engine, EngineStats};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of MiniLSM
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
