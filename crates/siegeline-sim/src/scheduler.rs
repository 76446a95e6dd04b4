//! Virtual-time event queue.
//!
//! Deferred work (wave preparation, staggered spawns) is keyed by absolute
//! simulation time in milliseconds and drained by the owning system each
//! tick. Events due at the same instant pop in insertion order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct Entry<T> {
    due_ms: f64,
    seq: u64,
    event: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed: BinaryHeap is a max-heap and the earliest entry must surface first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-queue of events ordered by due time, then by scheduling order.
#[derive(Debug, Clone)]
pub struct EventQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire at virtual time `due_ms`.
    pub fn schedule(&mut self, due_ms: f64, event: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { due_ms, seq, event });
    }

    /// Pop the earliest event if it is due at or before `now_ms`,
    /// together with its scheduled time.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, T)> {
        if self.heap.peek()?.due_ms > now_ms {
            return None;
        }
        self.heap.pop().map(|entry| (entry.due_ms, entry.event))
    }

    /// Due time of the earliest pending event.
    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.due_ms)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut queue = EventQueue::new();
        queue.schedule(300.0, "c");
        queue.schedule(100.0, "a");
        queue.schedule(200.0, "b");

        assert_eq!(queue.next_due(), Some(100.0));
        assert_eq!(queue.pop_due(1000.0), Some((100.0, "a")));
        assert_eq!(queue.pop_due(1000.0), Some((200.0, "b")));
        assert_eq!(queue.pop_due(1000.0), Some((300.0, "c")));
        assert!(queue.is_empty());
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut queue = EventQueue::new();
        for label in ["first", "second", "third"] {
            queue.schedule(50.0, label);
        }
        let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(50.0))
            .map(|(_, e)| e)
            .collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn holds_events_not_yet_due() {
        let mut queue = EventQueue::new();
        queue.schedule(1500.0, 1u32);
        assert_eq!(queue.pop_due(1499.9), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(1500.0), Some((1500.0, 1)));
    }
}
