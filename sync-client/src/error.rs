//! Engine errors for cmdsync.

use thiserror::Error;

use crate::channel::ChannelError;
use sync_types::WireError;

/// Errors surfaced by [`SyncEngine`](crate::SyncEngine).
///
/// Only `Config` and `Channel` (at construction) are fatal. `Wire` and
/// `Protocol` are scoped to a single inbound event: the engine stays
/// connected and keeps processing subsequent events.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine configuration is invalid; the engine cannot start.
    #[error("invalid engine configuration: {0}")]
    Config(String),

    /// The transport channel failed.
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    /// An inbound payload could not be decoded. Per-message, recoverable.
    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    /// A decoded envelope did not yield a valid command. Per-message.
    #[error("protocol violation: {0}")]
    Protocol(String),
}
