//! Channel abstraction for cmdsync.
//!
//! This module provides a pluggable transport layer over any bidirectional,
//! at-least-once, ordered-per-connection message channel that speaks named
//! events with string payloads (socket.io-style transports, websockets with a
//! thin framing layer, or the mock used in tests).
//!
//! # Design
//!
//! The engine never pumps the channel itself. The transport owns the event
//! loop and feeds [`ChannelEvent`]s into `SyncEngine::handle_event`, one at a
//! time in arrival order; the engine only produces `emit` calls. Reconnection
//! and retry live entirely in the transport - the engine just re-runs its
//! handshake whenever another [`ChannelEvent::Connected`] arrives.

mod mock;

pub use mock::MockChannel;

use async_trait::async_trait;
use thiserror::Error;

/// Channel errors.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Opening the connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Not connected.
    #[error("not connected")]
    NotConnected,

    /// Emitting a frame failed.
    #[error("emit failed: {0}")]
    EmitFailed(String),

    /// The channel was closed.
    #[error("channel closed")]
    Closed,
}

/// An event delivered by the transport to the engine.
///
/// The transport delivers events one at a time, in the order it produces
/// them; the engine relies on that serialization instead of taking its own
/// inbound lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The connection is up. May arrive multiple times across reconnects.
    Connected,
    /// The relay delivered a command envelope (possibly this client's own
    /// echo). Transports map the
    /// [`executeCommand`](sync_types::EVENT_EXECUTE_COMMAND) wire event to
    /// this variant.
    Command(String),
}

/// Transport trait for the cmdsync named-event channel.
///
/// Implementations handle the underlying connection mechanism. All sends are
/// fire-and-forget from the engine's point of view: `emit` returning `Ok`
/// means the frame was handed to the transport, not that it was delivered.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Open a connection to the relay at `endpoint` (host:port).
    ///
    /// Connection establishment may complete later; the transport reports it
    /// by delivering [`ChannelEvent::Connected`].
    async fn open(&self, endpoint: &str) -> Result<(), ChannelError>;

    /// Emit a named event with a string payload.
    async fn emit(&self, event: &str, payload: &str) -> Result<(), ChannelError>;

    /// Check if currently connected.
    fn is_connected(&self) -> bool;

    /// Close the connection gracefully.
    async fn close(&self) -> Result<(), ChannelError>;
}
