//! # Pending Event Queue
//!
//! FIFO of published events awaiting dispatch, built on an unbounded
//! crossbeam channel. The bus owns both ends.

use std::any::{Any, TypeId};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::event::Event;

/// A published event, erased to its kind.
pub struct QueuedEvent {
    /// Kind routing key.
    kind: TypeId,
    /// Kind name, for diagnostics.
    name: &'static str,
    /// The event itself. Never mutated after enqueue.
    payload: Box<dyn Any + Send + Sync>,
}

impl QueuedEvent {
    /// Erases a fully constructed event.
    #[must_use]
    pub fn new<E: Event>(event: E) -> Self {
        Self {
            kind: TypeId::of::<E>(),
            name: std::any::type_name::<E>(),
            payload: Box::new(event),
        }
    }

    /// Kind routing key.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> TypeId {
        self.kind
    }

    /// Kind name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read-only view of the payload.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &dyn Any {
        &*self.payload
    }
}

impl std::fmt::Debug for QueuedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedEvent").field("kind", &self.name).finish()
    }
}

/// FIFO buffer of pending events.
pub struct EventQueue {
    /// Producer end.
    sender: Sender<QueuedEvent>,
    /// Consumer end.
    receiver: Receiver<QueuedEvent>,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Appends an event.
    ///
    /// Returns `false` only if the channel is disconnected, which cannot
    /// happen while the queue holds its own receiver.
    #[inline]
    pub fn push(&self, event: QueuedEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    /// Pops the oldest event (non-blocking).
    #[inline]
    pub fn pop(&self) -> Option<QueuedEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if nothing is pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Drops every pending event. Returns how many were dropped.
    pub fn clear(&self) -> usize {
        self.receiver.try_iter().count()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Numbered(u32);
    impl Event for Numbered {}

    struct Empty;
    impl Event for Empty {}

    #[test]
    fn test_fifo_across_kinds() {
        let queue = EventQueue::new();
        assert!(queue.push(QueuedEvent::new(Numbered(1))));
        assert!(queue.push(QueuedEvent::new(Empty)));
        assert!(queue.push(QueuedEvent::new(Numbered(2))));
        assert_eq!(queue.len(), 3);

        let first = queue.pop().unwrap();
        assert_eq!(first.kind(), TypeId::of::<Numbered>());
        assert_eq!(first.payload().downcast_ref::<Numbered>(), Some(&Numbered(1)));

        assert_eq!(queue.pop().unwrap().kind(), TypeId::of::<Empty>());

        let third = queue.pop().unwrap();
        assert_eq!(third.payload().downcast_ref::<Numbered>(), Some(&Numbered(2)));
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_counts_dropped() {
        let queue = EventQueue::new();
        for i in 0..5 {
            let _ = queue.push(QueuedEvent::new(Numbered(i)));
        }
        assert_eq!(queue.clear(), 5);
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.clear(), 0);
    }

    #[test]
    fn test_name_is_type_name() {
        let event = QueuedEvent::new(Empty);
        assert!(event.name().ends_with("Empty"));
    }
}
