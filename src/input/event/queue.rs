use super::Event;

/// Default number of events a controller buffers between polls
pub const DEFAULT_QUEUE_SIZE: usize = 32;

/// Fixed capacity FIFO of normalized events.
///
/// The queue is a ring buffer with independent read and write cursors. When
/// the queue is full, newly pushed events are dropped so a slow consumer can
/// never stall the native poll path. Events are never reordered.
#[derive(Debug, Clone)]
pub struct EventQueue {
    events: Vec<Option<Event>>,
    head: usize,
    tail: usize,
    len: usize,
}

impl EventQueue {
    /// Create a new queue that holds at most `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            events: vec![None; capacity],
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.events.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Append an event to the queue. Returns false and drops the event if the
    /// queue is full.
    pub fn push(&mut self, event: Event) -> bool {
        if self.is_full() {
            log::trace!("Event queue full, dropping event: {:?}", event);
            return false;
        }
        self.events[self.tail] = Some(event);
        self.tail = (self.tail + 1) % self.capacity();
        self.len += 1;
        true
    }

    /// Remove and return the oldest event, or `None` if the queue is empty
    pub fn pop(&mut self) -> Option<Event> {
        if self.is_empty() {
            return None;
        }
        let event = self.events[self.head].take();
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        event
    }

    /// Remove and return all queued events, oldest first
    pub fn drain(&mut self) -> Vec<Event> {
        let mut events = Vec::with_capacity(self.len);
        while let Some(event) = self.pop() {
            events.push(event);
        }
        events
    }

    /// Discard all queued events
    pub fn clear(&mut self) {
        self.events.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use crate::input::{
        event::Event,
        identifier::{Axis, Identifier},
    };

    use super::EventQueue;

    fn event(n: u64) -> Event {
        Event::new(0, Identifier::Axis(Axis::X), n as f32, n)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = EventQueue::new(4);
        for n in 0..3 {
            assert!(queue.push(event(n)));
        }
        let nanos: Vec<u64> = queue.drain().iter().map(|e| e.nanos()).collect();
        assert_eq!(nanos, vec![0, 1, 2]);
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_full_queue_drops_newest() {
        let capacity = 8;
        let mut queue = EventQueue::new(capacity);
        for n in 0..capacity as u64 {
            assert!(queue.push(event(n)));
        }
        assert!(queue.is_full());
        assert!(!queue.push(event(99)), "push on a full queue should be dropped");

        let events = queue.drain();
        assert_eq!(events.len(), capacity);
        let nanos: Vec<u64> = events.iter().map(|e| e.nanos()).collect();
        assert_eq!(nanos, (0..capacity as u64).collect::<Vec<_>>());
    }

    #[test]
    fn test_wraps_around() {
        let mut queue = EventQueue::new(3);
        let mut expected = Vec::new();
        let mut produced = Vec::new();
        for n in 0..20 {
            assert!(queue.push(event(n)));
            expected.push(n);
            if queue.is_full() {
                produced.extend(queue.pop().map(|e| e.nanos()));
            }
        }
        produced.extend(queue.drain().iter().map(|e| e.nanos()));

        // Nothing is dropped when the consumer keeps up
        assert_eq!(produced, expected);
    }

    #[test]
    fn test_zero_capacity() {
        let mut queue = EventQueue::new(0);
        assert!(queue.is_full());
        assert!(!queue.push(event(1)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_clear() {
        let mut queue = EventQueue::new(2);
        queue.push(event(1));
        queue.push(event(2));
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.push(event(3)));
        assert_eq!(queue.pop().map(|e| e.nanos()), Some(3));
    }
}
