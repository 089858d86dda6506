//! Configuration for MiniLSM
//!
//! Centralized configuration with sensible defaults.

use crate::error::{MiniLsmError, Result};

/// Main configuration for a MiniLSM engine
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // MemTable Configuration
    // -------------------------------------------------------------------------
    /// Approximate size (in bytes) at which the active memtable is frozen.
    ///
    /// Not a hard cap: a table may overshoot it slightly before the
    /// rotation lands.
    pub memtable_size_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memtable_size_limit: 64 * 1024 * 1024, // 64 MB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        // A zero limit would freeze the table on every single write,
        // tombstones included.
        if self.memtable_size_limit == 0 {
            return Err(MiniLsmError::Config(
                "memtable_size_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the memtable size limit (in bytes)
    pub fn memtable_size_limit(mut self, size: usize) -> Self {
        self.config.memtable_size_limit = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
