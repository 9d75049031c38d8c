//! Durable watermark storage for cmdsync.
//!
//! The in-memory monotonic guard lives in sync-core; this wrapper handles the
//! string round-trip through the host's settings store.

use std::sync::Arc;

use sync_types::Timestamp;

use crate::store::{SettingsStore, SETTING_LAST_SYNC};

/// Reads and writes the `lastSync` watermark in the settings store.
#[derive(Clone)]
pub struct WatermarkStore {
    settings: Arc<dyn SettingsStore>,
}

impl WatermarkStore {
    /// Create a watermark store over the given settings.
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Read the durable watermark.
    ///
    /// A missing or unparseable value means "sync from the beginning of
    /// time" - zero.
    pub fn get(&self) -> Timestamp {
        self.settings
            .get(SETTING_LAST_SYNC)
            .and_then(|value| value.parse::<u64>().ok())
            .map(Timestamp::new)
            .unwrap_or_else(Timestamp::zero)
    }

    /// Persist a new watermark value.
    pub fn set(&self, timestamp: Timestamp) {
        self.settings
            .put(SETTING_LAST_SYNC, &timestamp.value().to_string());
    }
}
