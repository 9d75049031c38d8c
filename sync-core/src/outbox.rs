//! Outbox tracking for cmdsync.
//!
//! The outbox records commands this client has posted but not yet seen echoed
//! back by the relay. When the relay broadcasts a command to the whole group,
//! the originating client receives its own command again; the outbox is how
//! that echo is recognized and suppressed instead of being applied twice.
//!
//! The outbox is purely in-session state - it does not survive restarts. It
//! is a de-duplication window, not a delivery guarantee.

use std::collections::{HashSet, VecDeque};
use sync_types::CommandId;

/// In-flight command ids, insertion-ordered, keyed by id.
///
/// Membership checks and removal are O(1) via the id set; the order list is
/// only touched on record and on a successful take, and stays small (bounded
/// by `max_size`), so the linear `retain` there is a deliberate bound rather
/// than an oversight.
#[derive(Debug, Clone)]
pub struct Outbox {
    /// Insertion order, oldest first.
    order: VecDeque<CommandId>,
    /// Membership index.
    ids: HashSet<CommandId>,
    /// Maximum number of in-flight entries.
    max_size: usize,
}

impl Outbox {
    /// Create a new outbox holding at most `max_size` in-flight commands.
    pub fn new(max_size: usize) -> Self {
        Self {
            order: VecDeque::new(),
            ids: HashSet::new(),
            max_size: max_size.max(1),
        }
    }

    /// Record a posted command as awaiting its echo.
    ///
    /// Duplicate ids are a no-op. When the outbox is full, the oldest entry
    /// is evicted: a command whose echo never arrives must not pin memory for
    /// the whole session. A late echo of an evicted entry is then treated as
    /// a genuinely remote command, which is safe because command application
    /// is idempotent by id under at-least-once delivery.
    pub fn record(&mut self, id: CommandId) {
        if self.ids.contains(&id) {
            return;
        }
        if self.order.len() >= self.max_size {
            if let Some(evicted) = self.order.pop_front() {
                self.ids.remove(&evicted);
            }
        }
        self.ids.insert(id.clone());
        self.order.push_back(id);
    }

    /// Consume the echo of a posted command.
    ///
    /// Returns `true` and removes the entry if `id` is in flight - the caller
    /// must suppress the command. Returns `false` if unknown - the caller
    /// must treat the command as genuinely remote. A second take of the same
    /// id therefore finds nothing.
    pub fn take(&mut self, id: &CommandId) -> bool {
        if !self.ids.remove(id) {
            return false;
        }
        self.order.retain(|entry| entry != id);
        true
    }

    /// Check whether a command id is currently in flight.
    pub fn contains(&self, id: &CommandId) -> bool {
        self.ids.contains(id)
    }

    /// Number of in-flight commands.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no commands are in flight.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
