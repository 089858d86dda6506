//! Response definitions
//!
//! Represents responses to clients.

use bytes::Bytes;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
    Error,
}

/// A response to hand back to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Optional payload (value for GET, report for STATS, message for ERROR)
    pub payload: Option<Bytes>,
}

impl Response {
    /// Create an OK response with optional payload
    pub fn ok(payload: Option<Bytes>) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    /// Create a NOT_FOUND response
    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            payload: None,
        }
    }

    /// Create an ERROR response
    pub fn error(message: &str) -> Self {
        Self {
            status: Status::Error,
            payload: Some(Bytes::copy_from_slice(message.as_bytes())),
        }
    }

    /// Human-readable rendering for terminal output
    pub fn render(&self) -> String {
        let payload = self
            .payload
            .as_ref()
            .map(|p| String::from_utf8_lossy(p).into_owned());

        match (self.status, payload) {
            (Status::Ok, Some(text)) => text,
            (Status::Ok, None) => "OK".to_string(),
            (Status::NotFound, _) => "(not found)".to_string(),
            (Status::Error, Some(text)) => format!("ERR {}", text),
            (Status::Error, None) => "ERR".to_string(),
        }
    }
}
