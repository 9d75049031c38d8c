//! Engine configuration for cmdsync.

use crate::error::EngineError;

/// The default relay endpoint.
pub const DEFAULT_ENDPOINT: &str = "sync.cmdsync.dev:4000";

/// Default bound on in-flight (unechoed) local commands.
pub const DEFAULT_OUTBOX_CAPACITY: usize = 256;

/// Default bound on frames queued while the channel is down.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Configuration for [`SyncEngine`](crate::SyncEngine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Relay endpoint as `host:port`. Fixed per deployment, not a user
    /// setting at this layer.
    pub endpoint: String,
    /// Client software version reported in the auth handshake.
    pub version: String,
    /// Maximum in-flight local commands awaiting their echo.
    pub outbox_capacity: usize,
    /// Maximum frames buffered while the channel is unavailable.
    pub queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            outbox_capacity: DEFAULT_OUTBOX_CAPACITY,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Set the relay endpoint.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Set the reported client version.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Validate the configuration.
    ///
    /// A malformed endpoint is fatal at construction: the engine cannot
    /// start and the error is surfaced immediately, never retried.
    pub fn validate(&self) -> Result<(), EngineError> {
        let Some((host, port)) = self.endpoint.rsplit_once(':') else {
            return Err(EngineError::Config(format!(
                "endpoint must be host:port, got {:?}",
                self.endpoint
            )));
        };
        if host.is_empty() || port.parse::<u16>().is_err() {
            return Err(EngineError::Config(format!(
                "endpoint must be host:port, got {:?}",
                self.endpoint
            )));
        }
        Ok(())
    }
}
