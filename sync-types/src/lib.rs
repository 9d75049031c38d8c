//! # sync-types
//!
//! Wire format types for the cmdsync command-replication protocol.
//!
//! This crate provides the foundational types used across all cmdsync crates:
//! - [`GroupKey`], [`ClientId`], [`CommandId`], [`Timestamp`] - Identity and ordering types
//! - [`Auth`], [`FetchCommands`], [`CommandHeader`] - Protocol message shapes
//! - [`WireError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod ids;
mod messages;

pub use error::WireError;
pub use ids::{ClientId, CommandId, GroupKey, Timestamp};
pub use messages::{
    Auth, CommandHeader, FetchCommands, EVENT_AUTH, EVENT_EXECUTE_COMMAND, EVENT_FETCH_COMMANDS,
    EVENT_POST_COMMAND,
};
