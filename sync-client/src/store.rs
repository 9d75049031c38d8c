//! Collaborator traits for cmdsync.
//!
//! The engine replicates commands but never interprets them: creating,
//! encoding, decoding and applying commands belongs to the host application's
//! command store. Likewise the durable settings (group key, watermark) live
//! in whatever key-value storage the host already has. Both collaborators
//! are expressed as traits here.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sync_types::{CommandId, Timestamp, WireError};

/// Settings key for the durable group key token.
pub const SETTING_SYNC_KEY: &str = "syncKey";
/// Settings key for the durable last-synchronized watermark.
pub const SETTING_LAST_SYNC: &str = "lastSync";

/// A command as seen by the sync engine: an opaque operation with a stable
/// identity and an issue timestamp.
pub trait ReplicatedCommand {
    /// The command's globally unique id, assigned at creation.
    fn id(&self) -> &CommandId;

    /// The command's issue time, monotonic per origin.
    fn timestamp(&self) -> Timestamp;
}

/// The host application's command store.
///
/// Supplies the wire form of outgoing commands and applies incoming ones.
pub trait CommandStore: Send + Sync {
    /// The application's command type.
    type Command: ReplicatedCommand + Send;

    /// Serialize a command to its wire envelope.
    ///
    /// The envelope must be a JSON object carrying a `timestamp` field at the
    /// root. Returning `None` marks the command as malformed; the engine
    /// drops it silently (no emit, no outbox entry). Callers should treat a
    /// `None` here as a latent bug upstream.
    fn encode(&self, command: &Self::Command) -> Option<String>;

    /// Parse a received wire envelope back into a command.
    fn decode(&self, payload: &str) -> Result<Self::Command, WireError>;

    /// Apply a command received from another client.
    ///
    /// Implementations must NOT re-broadcast the command or route it back
    /// into `post_command` (that would start an echo storm), and must not
    /// treat it as an undoable interactive edit.
    fn apply_remote(&self, command: Self::Command);
}

/// Durable key-value settings storage.
///
/// Holds the sync group key and the last-synchronized watermark across
/// process restarts. Values are strings; the engine handles parsing.
pub trait SettingsStore: Send + Sync {
    /// Read a setting.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a setting.
    fn put(&self, key: &str, value: &str);
}

/// In-memory settings store.
///
/// Clones share state, so a test can hold one handle while the engine holds
/// another. "Durable" here means durable for the lifetime of the map - real
/// hosts back this trait with their preference storage.
#[derive(Debug, Default)]
pub struct MemorySettings {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySettings {
    /// Create an empty settings store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clone for MemorySettings {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.insert(key.to_string(), value.to_string());
    }
}
