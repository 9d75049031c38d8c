//! Error types for cmdsync.

use thiserror::Error;

/// Errors produced while encoding or decoding wire payloads.
#[derive(Debug, Error)]
pub enum WireError {
    /// JSON deserialization of a payload failed.
    #[error("payload decode failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// A command envelope carried an empty id.
    #[error("command id must not be empty")]
    EmptyCommandId,

    /// An identity token could not be parsed.
    #[error("invalid identity token")]
    InvalidToken,
}
