//! Command definitions
//!
//! Represents commands typed by a client.

use crate::error::{MiniLsmError, Result};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Get,
    Put,
    Delete,
    Freeze,
    Stats,
    Ping,
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Get a value by key
    Get { key: Vec<u8> },

    /// Put a key-value pair
    Put { key: Vec<u8>, value: Vec<u8> },

    /// Delete a key
    Delete { key: Vec<u8> },

    /// Rotate the active memtable regardless of its size
    Freeze,

    /// Report memtable statistics
    Stats,

    /// Ping (health check)
    Ping,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Get { .. } => CommandType::Get,
            Command::Put { .. } => CommandType::Put,
            Command::Delete { .. } => CommandType::Delete,
            Command::Freeze => CommandType::Freeze,
            Command::Stats => CommandType::Stats,
            Command::Ping => CommandType::Ping,
        }
    }

    /// Parse a single command line
    ///
    /// The verb is case-insensitive. For `PUT` everything after the key,
    /// inner whitespace included, is the value.
    pub fn parse(line: &str) -> Result<Self> {
        let (verb, rest) = split_word(line.trim());

        match verb.to_ascii_uppercase().as_str() {
            "GET" => Ok(Command::Get {
                key: single_key("GET", rest)?,
            }),
            "PUT" | "SET" => {
                let (key, value) = split_word(rest);
                if key.is_empty() || value.is_empty() {
                    return Err(MiniLsmError::Command(
                        "PUT requires a key and a value".to_string(),
                    ));
                }
                Ok(Command::Put {
                    key: key.as_bytes().to_vec(),
                    value: value.as_bytes().to_vec(),
                })
            }
            "DEL" | "DELETE" => Ok(Command::Delete {
                key: single_key("DEL", rest)?,
            }),
            "FREEZE" => no_args(Command::Freeze, rest),
            "STATS" => no_args(Command::Stats, rest),
            "PING" => no_args(Command::Ping, rest),
            "" => Err(MiniLsmError::Command("empty command".to_string())),
            other => Err(MiniLsmError::Command(format!("unknown command: {}", other))),
        }
    }
}

/// Split off the first whitespace-delimited word
fn split_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim_start()),
        None => (s, ""),
    }
}

fn single_key(verb: &str, rest: &str) -> Result<Vec<u8>> {
    let (key, extra) = split_word(rest);
    if key.is_empty() {
        return Err(MiniLsmError::Command(format!("{} requires a key", verb)));
    }
    if !extra.is_empty() {
        return Err(MiniLsmError::Command(format!(
            "{} takes exactly one key",
            verb
        )));
    }
    Ok(key.as_bytes().to_vec())
}

fn no_args(command: Command, rest: &str) -> Result<Command> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(MiniLsmError::Command(format!(
            "{:?} takes no arguments",
            command.command_type()
        )))
    }
}
