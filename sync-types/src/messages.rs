//! Protocol messages for cmdsync.
//!
//! The transport channel carries named events with string payloads; each
//! payload is a compact JSON object with camelCase field names. The engine
//! owns two message shapes (auth and fetch-since). Command envelopes are
//! produced and parsed by the command store; the engine only reads the
//! [`CommandHeader`] view of them.

use serde::{Deserialize, Serialize};

use crate::{ClientId, GroupKey, Timestamp, WireError};

/// Inbound event: the transport connected (or reconnected).
pub const EVENT_EXECUTE_COMMAND: &str = "executeCommand";
/// Outbound event: identify this client/session to the relay.
pub const EVENT_AUTH: &str = "auth";
/// Outbound event: request replay of commands after the watermark.
pub const EVENT_FETCH_COMMANDS: &str = "fetchCommands";
/// Outbound event: propagate a locally issued command.
pub const EVENT_POST_COMMAND: &str = "postCommand";

/// Handshake message identifying this client/session to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auth {
    /// Target sync group.
    pub group_key: GroupKey,
    /// This session's identifier.
    pub client_id: ClientId,
    /// Client software version.
    pub version: String,
}

impl Auth {
    /// Serialize to the wire string.
    ///
    /// The shape is static, so encoding cannot fail at runtime; a failure
    /// here is an internal invariant violation and panics.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("auth message shape is static")
    }

    /// Deserialize from the wire string.
    pub fn decode(payload: &str) -> Result<Self, WireError> {
        serde_json::from_str(payload).map_err(WireError::Deserialization)
    }
}

/// Handshake message requesting replay of commands after the watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchCommands {
    /// Return commands with a timestamp after this value.
    pub since: Timestamp,
}

impl FetchCommands {
    /// Serialize to the wire string. Static shape; see [`Auth::encode`].
    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("fetch-since message shape is static")
    }

    /// Deserialize from the wire string.
    pub fn decode(payload: &str) -> Result<Self, WireError> {
        serde_json::from_str(payload).map_err(WireError::Deserialization)
    }
}

/// The engine-visible view of a command envelope.
///
/// Command envelopes are opaque to the engine beyond the timestamp carried at
/// the JSON root; all other fields belong to the command store's own format
/// and are ignored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandHeader {
    /// Issue timestamp of the command, used to advance the watermark.
    pub timestamp: Timestamp,
}

impl CommandHeader {
    /// Deserialize the header from a command envelope string.
    pub fn decode(payload: &str) -> Result<Self, WireError> {
        serde_json::from_str(payload).map_err(WireError::Deserialization)
    }
}
