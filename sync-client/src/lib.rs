//! # sync-client
//!
//! Client engine for the cmdsync command-replication protocol.
//!
//! This is the library host applications embed to replicate locally-issued
//! commands to a relay and to the other clients of a sync group, while
//! suppressing echoes of their own commands.
//!
//! ## Features
//!
//! - **Channel Abstraction**: Pluggable named-event transport (mock for tests)
//! - **Pure State Machine**: Uses sync-core for side-effect-free logic
//! - **Echo Suppression**: Locally posted commands are never applied twice
//! - **Durable Watermark**: Reconnects resume from the last synced timestamp
//!
//! ## Example
//!
//! ```ignore
//! use cmdsync_client::{ChannelEvent, EngineConfig, MemorySettings, SyncEngine};
//!
//! let engine = SyncEngine::connect(config, store, channel, settings).await?;
//!
//! // Propagate a local mutation
//! engine.post_command(&command).await;
//!
//! // Feed transport events into the engine
//! engine.handle_event(ChannelEvent::Connected).await?;
//! engine.handle_event(ChannelEvent::Command(payload)).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod identity;
pub mod store;
pub mod watermark;

pub use channel::{Channel, ChannelError, ChannelEvent, MockChannel};
pub use config::EngineConfig;
pub use engine::SyncEngine;
pub use error::EngineError;
pub use identity::SyncIdentity;
pub use store::{
    CommandStore, MemorySettings, ReplicatedCommand, SettingsStore, SETTING_LAST_SYNC,
    SETTING_SYNC_KEY,
};
pub use watermark::WatermarkStore;
