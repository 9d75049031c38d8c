//! Mock channel for testing.
//!
//! Captures emitted frames for verification and supports forced failures.

use super::{Channel, ChannelError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mock channel for testing.
///
/// Records every `emit` as an `(event, payload)` pair and allows forcing the
/// next open or emit to fail.
#[derive(Debug, Default)]
pub struct MockChannel {
    inner: Arc<Mutex<MockChannelInner>>,
}

#[derive(Debug, Default)]
struct MockChannelInner {
    connected: bool,
    opened_endpoint: Option<String>,
    emitted: Vec<(String, String)>,
    fail_next_open: Option<String>,
    fail_next_emit: Option<String>,
}

impl MockChannel {
    /// Create a new mock channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all emitted frames as `(event, payload)` pairs, in emit order.
    pub fn emitted(&self) -> Vec<(String, String)> {
        let inner = self.inner.lock().unwrap();
        inner.emitted.clone()
    }

    /// Get the payloads emitted for a specific event name, in emit order.
    pub fn emitted_for(&self, event: &str) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .emitted
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    /// Get the last emitted frame.
    pub fn last_emitted(&self) -> Option<(String, String)> {
        let inner = self.inner.lock().unwrap();
        inner.emitted.last().cloned()
    }

    /// Get the endpoint that was opened.
    pub fn opened_endpoint(&self) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner.opened_endpoint.clone()
    }

    /// Cause the next open() to fail with the given error.
    pub fn fail_next_open(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_open = Some(error.to_string());
    }

    /// Cause the next emit() to fail with the given error.
    pub fn fail_next_emit(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_emit = Some(error.to_string());
    }

    /// Clear all state (frames, connection, forced failures).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockChannelInner::default();
    }
}

impl Clone for MockChannel {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Channel for MockChannel {
    async fn open(&self, endpoint: &str) -> Result<(), ChannelError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_open.take() {
            return Err(ChannelError::ConnectionFailed(error));
        }

        inner.connected = true;
        inner.opened_endpoint = Some(endpoint.to_string());
        Ok(())
    }

    async fn emit(&self, event: &str, payload: &str) -> Result<(), ChannelError> {
        let mut inner = self.inner.lock().unwrap();

        if !inner.connected {
            return Err(ChannelError::NotConnected);
        }

        if let Some(error) = inner.fail_next_emit.take() {
            return Err(ChannelError::EmitFailed(error));
        }

        inner.emitted.push((event.to_string(), payload.to_string()));
        Ok(())
    }

    fn is_connected(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.connected
    }

    async fn close(&self) -> Result<(), ChannelError> {
        let mut inner = self.inner.lock().unwrap();
        inner.connected = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_channel_opens() {
        let channel = MockChannel::new();
        assert!(!channel.is_connected());

        channel.open("relay.test:4000").await.unwrap();

        assert!(channel.is_connected());
        assert_eq!(
            channel.opened_endpoint(),
            Some("relay.test:4000".to_string())
        );
    }

    #[tokio::test]
    async fn mock_channel_records_emits() {
        let channel = MockChannel::new();
        channel.open("relay.test:4000").await.unwrap();

        channel.emit("auth", "{}").await.unwrap();
        channel.emit("postCommand", "one").await.unwrap();

        let emitted = channel.emitted();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0], ("auth".to_string(), "{}".to_string()));
        assert_eq!(channel.emitted_for("postCommand"), vec!["one".to_string()]);
    }

    #[tokio::test]
    async fn emit_without_open_fails() {
        let channel = MockChannel::new();

        let result = channel.emit("auth", "{}").await;
        assert!(matches!(result, Err(ChannelError::NotConnected)));
    }

    #[tokio::test]
    async fn forced_open_failure() {
        let channel = MockChannel::new();
        channel.fail_next_open("network unreachable");

        let result = channel.open("relay.test:4000").await;
        assert!(matches!(result, Err(ChannelError::ConnectionFailed(_))));
        assert!(!channel.is_connected());
    }

    #[tokio::test]
    async fn forced_emit_failure_is_one_shot() {
        let channel = MockChannel::new();
        channel.open("relay.test:4000").await.unwrap();
        channel.fail_next_emit("buffer full");

        let result = channel.emit("postCommand", "one").await;
        assert!(matches!(result, Err(ChannelError::EmitFailed(_))));

        channel.emit("postCommand", "two").await.unwrap();
        assert_eq!(channel.emitted().len(), 1);
    }

    #[tokio::test]
    async fn mock_channel_clone_shares_state() {
        let channel1 = MockChannel::new();
        let channel2 = channel1.clone();

        channel1.open("relay.test:4000").await.unwrap();
        assert!(channel2.is_connected());

        channel1.emit("auth", "a").await.unwrap();
        channel2.emit("auth", "b").await.unwrap();
        assert_eq!(channel1.emitted().len(), 2);
    }

    #[tokio::test]
    async fn mock_channel_closes_and_resets() {
        let channel = MockChannel::new();
        channel.open("relay.test:4000").await.unwrap();
        channel.emit("auth", "{}").await.unwrap();

        channel.close().await.unwrap();
        assert!(!channel.is_connected());

        channel.reset();
        assert!(channel.emitted().is_empty());
        assert!(channel.opened_endpoint().is_none());
    }

    #[tokio::test]
    async fn last_emitted_returns_most_recent() {
        let channel = MockChannel::new();
        channel.open("relay.test:4000").await.unwrap();

        assert!(channel.last_emitted().is_none());

        channel.emit("auth", "first").await.unwrap();
        channel.emit("fetchCommands", "second").await.unwrap();
        assert_eq!(
            channel.last_emitted(),
            Some(("fetchCommands".to_string(), "second".to_string()))
        );
    }
}
