//! # sync-core
//!
//! Pure logic for cmdsync (no I/O, instant tests).
//!
//! This crate implements the state machine and bookkeeping for command
//! replication without any network or disk I/O, enabling fast unit tests.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about state transitions
//!
//! The actual I/O (channel emits, durable settings) is performed by
//! `sync-client`, which interprets the actions produced by these modules.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod outbox;
pub mod queue;
pub mod session;
pub mod watermark;

pub use outbox::Outbox;
pub use queue::{QueueError, QueuedEmit, SendQueue};
pub use session::{SessionAction, SessionEvent, SessionState};
pub use watermark::Watermark;
