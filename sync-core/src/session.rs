//! Session state machine for cmdsync.
//!
//! This module provides a pure, side-effect-free state machine for the
//! engine's connection lifecycle. The state machine takes events as input and
//! produces a new state plus a list of actions to execute.
//!
//! The actual I/O (opening the channel, emitting handshake messages) is
//! performed by sync-client, not by this module. This enables instant unit
//! testing without channel mocks.

/// Session state machine - NO I/O, just state transitions.
///
/// The engine opens its channel at construction and then reacts to connect
/// events from the transport. The transport may report `ChannelConnected`
/// any number of times across reconnects; the handshake actions are produced
/// on every one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No channel open (initial, or after close).
    Disconnected,
    /// Channel opened, waiting for the transport to report a connection.
    Connecting,
    /// Transport reported a live connection; handshake has been issued.
    Connected,
}

impl SessionState {
    /// Create a new state machine in the Disconnected state.
    pub fn new() -> Self {
        Self::Disconnected
    }

    /// Process an event and return the new state plus actions to execute.
    ///
    /// This is a pure function - no side effects. The caller (sync-client)
    /// is responsible for executing the returned actions in order.
    pub fn on_event(self, event: SessionEvent) -> (Self, Vec<SessionAction>) {
        match (self, event) {
            // Construction opens the channel immediately.
            (Self::Disconnected, SessionEvent::OpenRequested) => {
                (Self::Connecting, vec![SessionAction::OpenChannel])
            }

            // Every connect - first or reconnect - triggers the handshake:
            // auth first, then fetch-since with the watermark at this moment,
            // then any frames queued while the channel was down.
            (Self::Connecting | Self::Connected, SessionEvent::ChannelConnected) => (
                Self::Connected,
                vec![
                    SessionAction::SendAuth,
                    SessionAction::SendFetchSince,
                    SessionAction::FlushQueued,
                ],
            ),

            (Self::Connecting | Self::Connected, SessionEvent::CloseRequested) => {
                (Self::Disconnected, vec![SessionAction::CloseChannel])
            }

            // Repeated close is a safe no-op.
            (Self::Disconnected, SessionEvent::CloseRequested) => (Self::Disconnected, vec![]),

            // Invalid transitions - stay in current state.
            (state, _) => (state, vec![]),
        }
    }

    /// Check if the handshake has been issued on a live connection.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Check if the channel is open (connected or awaiting connection).
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Disconnected)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events that can occur in the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Engine construction requested the channel be opened.
    OpenRequested,
    /// The transport reported a (re)connection.
    ChannelConnected,
    /// The host application requested shutdown.
    CloseRequested,
}

/// Actions to be executed by the sync-client.
///
/// These are instructions, not side effects. The sync-client interprets
/// these and performs the actual I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Open the transport channel to the configured endpoint.
    OpenChannel,
    /// Emit the auth message (group key, client id, version).
    SendAuth,
    /// Emit the fetch-since message using the current durable watermark.
    SendFetchSince,
    /// Emit frames queued while the channel was unavailable.
    FlushQueued,
    /// Close the transport channel.
    CloseChannel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected() {
        let state = SessionState::new();
        assert!(matches!(state, SessionState::Disconnected));
        assert!(!state.is_open());
    }

    #[test]
    fn open_request_transitions_to_connecting() {
        let (state, actions) = SessionState::Disconnected.on_event(SessionEvent::OpenRequested);

        assert!(matches!(state, SessionState::Connecting));
        assert_eq!(actions, vec![SessionAction::OpenChannel]);
    }

    #[test]
    fn connect_triggers_handshake_in_order() {
        let (state, actions) = SessionState::Connecting.on_event(SessionEvent::ChannelConnected);

        assert!(state.is_connected());
        assert_eq!(
            actions,
            vec![
                SessionAction::SendAuth,
                SessionAction::SendFetchSince,
                SessionAction::FlushQueued,
            ]
        );
    }

    #[test]
    fn reconnect_triggers_handshake_again() {
        let (state, _) = SessionState::Connecting.on_event(SessionEvent::ChannelConnected);
        let (state, actions) = state.on_event(SessionEvent::ChannelConnected);

        assert!(state.is_connected());
        assert_eq!(
            actions,
            vec![
                SessionAction::SendAuth,
                SessionAction::SendFetchSince,
                SessionAction::FlushQueued,
            ]
        );
    }

    #[test]
    fn close_from_connected() {
        let (state, actions) = SessionState::Connected.on_event(SessionEvent::CloseRequested);

        assert!(matches!(state, SessionState::Disconnected));
        assert_eq!(actions, vec![SessionAction::CloseChannel]);
    }

    #[test]
    fn close_before_connect_works() {
        let (state, actions) = SessionState::Connecting.on_event(SessionEvent::CloseRequested);

        assert!(matches!(state, SessionState::Disconnected));
        assert_eq!(actions, vec![SessionAction::CloseChannel]);
    }

    #[test]
    fn repeated_close_is_noop() {
        let (state, _) = SessionState::Connected.on_event(SessionEvent::CloseRequested);
        let (state, actions) = state.on_event(SessionEvent::CloseRequested);

        assert!(matches!(state, SessionState::Disconnected));
        assert!(actions.is_empty());
    }

    #[test]
    fn open_while_open_is_ignored() {
        let (state, actions) = SessionState::Connecting.on_event(SessionEvent::OpenRequested);
        assert!(matches!(state, SessionState::Connecting));
        assert!(actions.is_empty());

        let (state, actions) = SessionState::Connected.on_event(SessionEvent::OpenRequested);
        assert!(matches!(state, SessionState::Connected));
        assert!(actions.is_empty());
    }

    #[test]
    fn connect_while_disconnected_is_ignored() {
        // A stale transport callback after close must not resurrect the session.
        let (state, actions) = SessionState::Disconnected.on_event(SessionEvent::ChannelConnected);
        assert!(matches!(state, SessionState::Disconnected));
        assert!(actions.is_empty());
    }

    #[test]
    fn is_connected_helper() {
        assert!(!SessionState::Disconnected.is_connected());
        assert!(!SessionState::Connecting.is_connected());
        assert!(SessionState::Connected.is_connected());
    }

    #[test]
    fn is_open_helper() {
        assert!(!SessionState::Disconnected.is_open());
        assert!(SessionState::Connecting.is_open());
        assert!(SessionState::Connected.is_open());
    }
}
