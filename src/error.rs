//! Error types for MiniLSM
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using MiniLsmError
pub type Result<T> = std::result::Result<T, MiniLsmError>;

/// Unified error type for MiniLSM operations
///
/// The memtable path itself has nothing fallible in steady state; the
/// variants below cover the edges around it (configuration, the command
/// surface and terminal I/O in the binary).
#[derive(Debug, Error)]
pub enum MiniLsmError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("Command error: {0}")]
    Command(String),
}
