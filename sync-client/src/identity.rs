//! Sync identity for cmdsync.
//!
//! Two tokens identify an engine: the durable group key shared by all
//! clients of one sync group, and a per-session client id. Both are owned by
//! the engine instance - multiple engines (e.g. in tests) never share
//! identity state.

use sync_types::{ClientId, GroupKey};

use crate::store::{SettingsStore, SETTING_SYNC_KEY};

/// The identity an engine presents in its auth handshake.
#[derive(Debug, Clone, Copy)]
pub struct SyncIdentity {
    group_key: GroupKey,
    client_id: ClientId,
}

impl SyncIdentity {
    /// Load the durable group key from the settings store, creating and
    /// persisting a fresh one if none exists, and generate a new client id.
    ///
    /// A persisted token that no longer parses is replaced the same way a
    /// missing one is, so a corrupted setting cannot brick the engine.
    pub fn load_or_create(settings: &dyn SettingsStore) -> Self {
        let group_key = settings
            .get(SETTING_SYNC_KEY)
            .and_then(|token| GroupKey::parse(&token))
            .unwrap_or_else(|| {
                let key = GroupKey::random();
                settings.put(SETTING_SYNC_KEY, &key.to_string());
                key
            });

        Self {
            group_key,
            client_id: ClientId::random(),
        }
    }

    /// The durable group key.
    pub fn group_key(&self) -> &GroupKey {
        &self.group_key
    }

    /// This session's client id.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }
}
