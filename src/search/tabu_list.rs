//! Bounded FIFO memory of visited states.

use std::collections::VecDeque;

/// Bounded FIFO of previously visited values.
///
/// Membership is value equality. Once full, every push evicts the oldest
/// entry, so the list always holds the `capacity` most recent pushes.
#[derive(Debug, Clone)]
pub struct TabuList<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T: PartialEq> TabuList<T> {
    /// Creates an empty list holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry, evicting the oldest when full.
    ///
    /// With zero capacity nothing is ever retained.
    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Whether an equal entry is remembered.
    pub fn contains(&self, entry: &T) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Number of remembered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}
