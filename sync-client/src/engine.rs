//! SyncEngine - the command-replication protocol engine.
//!
//! This module provides [`SyncEngine`], the state machine that propagates
//! locally-issued commands to the relay and applies commands received from
//! other clients of the sync group, suppressing echoes of its own.
//!
//! # Architecture
//!
//! ```text
//! local mutation → CommandStore → post_command → Outbox + emit(postCommand)
//!
//! transport event → handle_event → decode header → watermark → echo check
//!                                                  ├─ matched: discard
//!                                                  └─ remote:  apply_remote
//! ```
//!
//! The engine uses the pure state machine from sync-core for its connection
//! lifecycle and interprets the produced actions against the [`Channel`].
//! All inbound events are delivered serially by the transport; the only
//! cross-thread contention is a post racing an inbound echo, which the
//! outbox mutex covers.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use sync_core::{Outbox, QueuedEmit, SendQueue, SessionAction, SessionEvent, SessionState, Watermark};
use sync_types::{
    Auth, ClientId, CommandHeader, FetchCommands, GroupKey, Timestamp, EVENT_AUTH,
    EVENT_FETCH_COMMANDS, EVENT_POST_COMMAND,
};

use crate::channel::{Channel, ChannelEvent};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::identity::SyncIdentity;
use crate::store::{CommandStore, ReplicatedCommand, SettingsStore};
use crate::watermark::WatermarkStore;

/// The command-replication sync engine.
///
/// One engine owns one logical connection for its lifetime. Reconnection is
/// the transport's job; the engine re-runs its handshake on every
/// [`ChannelEvent::Connected`] it is handed.
pub struct SyncEngine<S: CommandStore, C: Channel> {
    config: EngineConfig,
    identity: SyncIdentity,
    store: S,
    channel: C,
    durable: WatermarkStore,
    session: Mutex<SessionState>,
    outbox: Mutex<Outbox>,
    queue: Mutex<SendQueue>,
    watermark: Mutex<Watermark>,
}

impl<S: CommandStore, C: Channel> SyncEngine<S, C> {
    /// Construct an engine and open its channel.
    ///
    /// Loads (or creates) the durable group key, generates a fresh client id
    /// for this session, and opens the transport channel to the configured
    /// endpoint. A malformed endpoint or a channel open failure is fatal:
    /// the engine does not start and nothing is retried here.
    pub async fn connect(
        config: EngineConfig,
        store: S,
        channel: C,
        settings: Arc<dyn SettingsStore>,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let identity = SyncIdentity::load_or_create(settings.as_ref());
        let durable = WatermarkStore::new(settings);
        let last_sync = durable.get();

        let (session, actions) = SessionState::new().on_event(SessionEvent::OpenRequested);

        let engine = Self {
            outbox: Mutex::new(Outbox::new(config.outbox_capacity)),
            queue: Mutex::new(SendQueue::new(config.queue_capacity)),
            watermark: Mutex::new(Watermark::new(last_sync)),
            session: Mutex::new(session),
            config,
            identity,
            store,
            channel,
            durable,
        };

        for action in actions {
            if action == SessionAction::OpenChannel {
                engine.channel.open(&engine.config.endpoint).await?;
            }
        }

        Ok(engine)
    }

    /// Handle an event delivered by the transport.
    ///
    /// Events must be delivered one at a time, in the order the transport
    /// produces them. Errors from a `Command` event are scoped to that one
    /// message; the engine remains connected and usable.
    pub async fn handle_event(&self, event: ChannelEvent) -> Result<(), EngineError> {
        match event {
            ChannelEvent::Connected => self.on_connected().await,
            ChannelEvent::Command(payload) => self.on_command(&payload).await,
        }
    }

    /// Propagate a locally issued command to the sync group.
    ///
    /// Fire-and-forget: the command is serialized, emitted (or queued for
    /// the next connect if the session is not up yet), and recorded in the
    /// outbox so its echo can be suppressed. A command whose serialization
    /// yields nothing is dropped silently - no emit, no outbox entry.
    pub async fn post_command(&self, command: &S::Command) {
        let Some(envelope) = self.store.encode(command) else {
            return;
        };

        let connected = self.session.lock().await.is_connected();
        if connected {
            if let Err(err) = self.channel.emit(EVENT_POST_COMMAND, &envelope).await {
                warn!(error = %err, "post emit failed, queueing frame for next connect");
                self.enqueue_frame(QueuedEmit::new(EVENT_POST_COMMAND, envelope))
                    .await;
            }
        } else {
            self.enqueue_frame(QueuedEmit::new(EVENT_POST_COMMAND, envelope))
                .await;
        }

        self.outbox.lock().await.record(command.id().clone());
    }

    /// Close the engine's channel.
    ///
    /// Safe to call more than once; calls after the first are no-ops.
    pub async fn close(&self) -> Result<(), EngineError> {
        let actions = {
            let mut session = self.session.lock().await;
            let (next, actions) = session.on_event(SessionEvent::CloseRequested);
            *session = next;
            actions
        };

        for action in actions {
            if action == SessionAction::CloseChannel {
                self.channel.close().await?;
            }
        }
        Ok(())
    }

    /// The durable group key this engine authenticates with.
    pub fn group_key(&self) -> &GroupKey {
        self.identity.group_key()
    }

    /// This session's client id.
    pub fn client_id(&self) -> &ClientId {
        self.identity.client_id()
    }

    /// The durable last-synchronized watermark.
    pub fn last_sync(&self) -> Timestamp {
        self.durable.get()
    }

    /// Number of local commands awaiting their echo.
    pub async fn outbox_len(&self) -> usize {
        self.outbox.lock().await.len()
    }

    /// Number of frames queued for the next connect.
    pub async fn queued_len(&self) -> usize {
        self.queue.lock().await.len()
    }

    /// Get a reference to the underlying channel (for testing).
    pub fn channel(&self) -> &C {
        &self.channel
    }

    async fn on_connected(&self) -> Result<(), EngineError> {
        let actions = {
            let mut session = self.session.lock().await;
            let (next, actions) = session.on_event(SessionEvent::ChannelConnected);
            *session = next;
            actions
        };

        if !actions.is_empty() {
            info!("channel connected, issuing handshake");
        }
        for action in actions {
            self.run_action(action).await;
        }
        Ok(())
    }

    /// Execute one action produced by the session state machine.
    ///
    /// Handshake emits are fire-and-forget: a failed emit is logged and the
    /// connection is left to the transport, which will deliver another
    /// connect event if it re-establishes the link.
    async fn run_action(&self, action: SessionAction) {
        match action {
            SessionAction::SendAuth => {
                let auth = Auth {
                    group_key: *self.identity.group_key(),
                    client_id: *self.identity.client_id(),
                    version: self.config.version.clone(),
                };
                if let Err(err) = self.channel.emit(EVENT_AUTH, &auth.encode()).await {
                    warn!(error = %err, "auth emit failed");
                }
            }
            SessionAction::SendFetchSince => {
                let fetch = FetchCommands {
                    since: self.durable.get(),
                };
                if let Err(err) = self.channel.emit(EVENT_FETCH_COMMANDS, &fetch.encode()).await {
                    warn!(error = %err, "fetch-since emit failed");
                }
            }
            SessionAction::FlushQueued => {
                let frames = self.queue.lock().await.drain();
                for frame in frames {
                    if let Err(err) = self.channel.emit(&frame.event, &frame.payload).await {
                        warn!(error = %err, event = %frame.event, "queued emit failed, frame dropped");
                    }
                }
            }
            // Open and close are driven from connect()/close(), not from
            // transport events.
            SessionAction::OpenChannel | SessionAction::CloseChannel => {}
        }
    }

    /// Handle a received command envelope.
    ///
    /// The watermark is advanced and persisted before the command is handed
    /// to the store, so a crash in between re-fetches the command on the
    /// next handshake (at-least-once) instead of silently skipping it.
    async fn on_command(&self, payload: &str) -> Result<(), EngineError> {
        let header = CommandHeader::decode(payload)?;

        {
            let mut watermark = self.watermark.lock().await;
            if watermark.advance(header.timestamp) {
                self.durable.set(header.timestamp);
            }
        }

        let command = self.store.decode(payload).map_err(|err| {
            EngineError::Protocol(format!("received command failed to parse: {err}"))
        })?;

        if self.outbox.lock().await.take(command.id()) {
            debug!(command_id = %command.id(), "received own command echo, discarded");
            return Ok(());
        }

        debug!(command_id = %command.id(), "received remote command, applying");
        self.store.apply_remote(command);
        Ok(())
    }

    async fn enqueue_frame(&self, frame: QueuedEmit) {
        if let Err(err) = self.queue.lock().await.enqueue(frame) {
            warn!(error = %err, "send queue full, dropping frame");
        }
    }
}
