//! Protocol Module
//!
//! In-process command surface used by the CLI. There is no wire format:
//! commands are parsed from text lines and executed directly against an
//! `Engine`.
//!
//! ### Commands
//! ```text
//! GET    <key>
//! PUT    <key> <value>     (value = rest of the line; alias: SET)
//! DEL    <key>             (alias: DELETE)
//! FREEZE                   (rotate the active memtable now)
//! STATS
//! PING
//! ```
//!
//! ### Status Codes
//! - OK
//! - NOT_FOUND
//! - ERROR

mod command;
mod response;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
