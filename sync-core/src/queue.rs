//! Send queue for cmdsync.
//!
//! Command posts are fire-and-forget, but a frame emitted before the channel
//! has ever connected would be silently lost by most transports. The send
//! queue holds such frames until the next successful connect, when the engine
//! drains it right after the handshake.
//!
//! Bounded to prevent unbounded memory growth while offline for a long time.

use std::collections::VecDeque;
use thiserror::Error;

/// Error type for queue operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Queue is at capacity.
    #[error("send queue full (capacity: {capacity})")]
    Full {
        /// Current queue capacity.
        capacity: usize,
    },
}

/// A frame waiting to be emitted on the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedEmit {
    /// The channel event name.
    pub event: String,
    /// The string payload.
    pub payload: String,
}

impl QueuedEmit {
    /// Create a new queued frame.
    pub fn new(event: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            payload: payload.into(),
        }
    }
}

/// Bounded FIFO of frames to emit on the next successful connect.
#[derive(Debug)]
pub struct SendQueue {
    max_size: usize,
    queue: VecDeque<QueuedEmit>,
}

impl SendQueue {
    /// Create a new queue holding at most `max_size` frames.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            queue: VecDeque::new(),
        }
    }

    /// Add a frame to the queue.
    ///
    /// Returns an error if the queue is full; the caller decides whether to
    /// drop the frame (the engine logs and drops - posts are best-effort).
    pub fn enqueue(&mut self, frame: QueuedEmit) -> Result<(), QueueError> {
        if self.queue.len() >= self.max_size {
            return Err(QueueError::Full {
                capacity: self.max_size,
            });
        }
        self.queue.push_back(frame);
        Ok(())
    }

    /// Take all queued frames, oldest first, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<QueuedEmit> {
        self.queue.drain(..).collect()
    }

    /// Number of queued frames.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_holds_frames_in_order() {
        let mut queue = SendQueue::new(8);
        queue.enqueue(QueuedEmit::new("postCommand", "one")).unwrap();
        queue.enqueue(QueuedEmit::new("postCommand", "two")).unwrap();

        let frames = queue.drain();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].payload, "one");
        assert_eq!(frames[1].payload, "two");
    }

    #[test]
    fn drain_empties_the_queue() {
        let mut queue = SendQueue::new(8);
        queue.enqueue(QueuedEmit::new("postCommand", "one")).unwrap();

        assert_eq!(queue.drain().len(), 1);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn queue_respects_max_size() {
        let mut queue = SendQueue::new(2);
        queue.enqueue(QueuedEmit::new("postCommand", "one")).unwrap();
        queue.enqueue(QueuedEmit::new("postCommand", "two")).unwrap();

        let overflow = queue.enqueue(QueuedEmit::new("postCommand", "three"));
        assert_eq!(overflow, Err(QueueError::Full { capacity: 2 }));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn drain_frees_capacity() {
        let mut queue = SendQueue::new(1);
        queue.enqueue(QueuedEmit::new("postCommand", "one")).unwrap();
        queue.drain();

        assert!(queue.enqueue(QueuedEmit::new("postCommand", "two")).is_ok());
    }
}
