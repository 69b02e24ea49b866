use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::cards::Suit;
use crate::tableau::Tableau;

/// Most undo steps kept; older ones are dropped first.
pub const HISTORY_CAPACITY: usize = 30;

/// Deep copy of everything undo restores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Columns and stock, face-up flags included
    pub tableau: Tableau,
    pub move_count: u32,
    /// Suits of the sets removed so far, in removal order
    pub completed: Vec<Suit>,
}

impl Snapshot {
    pub fn completed_sets(&self) -> usize {
        self.completed.len()
    }
}

/// Bounded undo stack.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a snapshot, returning the oldest one if it had to be evicted.
    pub fn push(&mut self, snapshot: Snapshot) -> Option<Snapshot> {
        if self.capacity == 0 {
            return Some(snapshot);
        }
        self.entries.push_back(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    /// Oldest snapshot still kept.
    pub fn oldest(&self) -> Option<&Snapshot> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(move_count: u32) -> Snapshot {
        Snapshot {
            tableau: Tableau::empty(),
            move_count,
            completed: Vec::new(),
        }
    }

    #[test]
    fn pops_most_recent_first() {
        let mut h = History::new();
        h.push(snap(1));
        h.push(snap(2));
        assert_eq!(h.pop().map(|s| s.move_count), Some(2));
        assert_eq!(h.pop().map(|s| s.move_count), Some(1));
        assert!(h.pop().is_none());
    }

    #[test]
    fn thirty_first_push_evicts_oldest() {
        let mut h = History::new();
        for i in 0..HISTORY_CAPACITY as u32 {
            assert!(h.push(snap(i)).is_none());
        }
        let evicted = h.push(snap(30)).expect("overflow evicts");
        assert_eq!(evicted.move_count, 0);
        assert_eq!(h.len(), HISTORY_CAPACITY);
        assert_eq!(h.oldest().map(|s| s.move_count), Some(1));
        assert_eq!(h.pop().map(|s| s.move_count), Some(30));
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut h = History::with_capacity(0);
        assert!(h.push(snap(1)).is_some());
        assert!(h.is_empty());
    }
}
