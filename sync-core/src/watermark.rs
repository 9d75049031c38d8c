//! Watermark tracking for cmdsync.
//!
//! The watermark is the timestamp below which all commands are known to be
//! already synchronized. It advances to the timestamp carried by each
//! processed inbound command and is sent as `since` in the fetch-commands
//! handshake, so the relay only replays what this client has not seen.

use sync_types::Timestamp;

/// A monotonically non-decreasing sync watermark.
///
/// Persistence is the caller's job; this type only enforces that the value
/// never moves backwards, so an out-of-order command with an older timestamp
/// cannot cause already-synchronized history to be re-fetched forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watermark {
    last: Timestamp,
}

impl Watermark {
    /// Resume from a persisted watermark value.
    pub fn new(last: Timestamp) -> Self {
        Self { last }
    }

    /// Advance to `timestamp` if it is ahead of the current value.
    ///
    /// Returns `true` if the watermark moved (the caller should persist the
    /// new value), `false` if `timestamp` was not ahead.
    pub fn advance(&mut self, timestamp: Timestamp) -> bool {
        if timestamp > self.last {
            self.last = timestamp;
            true
        } else {
            false
        }
    }

    /// The current watermark value.
    pub fn current(&self) -> Timestamp {
        self.last
    }
}

impl Default for Watermark {
    fn default() -> Self {
        Self::new(Timestamp::zero())
    }
}
