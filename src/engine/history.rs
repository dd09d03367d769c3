//! Bounded batch history.
//!
//! A LIFO for undo with FIFO eviction at capacity: push/pop happen at the
//! back, overflow drops the oldest entry at the front. Purely in-memory,
//! process lifetime only.

use std::collections::VecDeque;

use crate::model::MoveBatch;

/// Default number of batches retained for undo.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

#[derive(Debug)]
pub struct History {
    batches: VecDeque<MoveBatch>,
    capacity: usize,
}

impl History {
    /// A zero capacity would make every batch unrecoverable; clamp to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            batches: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Push a batch, evicting the oldest entry when full.
    pub fn push(&mut self, batch: MoveBatch) {
        if self.batches.len() == self.capacity {
            self.batches.pop_front();
        }
        self.batches.push_back(batch);
    }

    /// Take the most recent batch. Once popped a batch is consumed for good;
    /// undo never re-pushes it.
    pub fn pop_last(&mut self) -> Option<MoveBatch> {
        self.batches.pop_back()
    }

    pub fn has_any(&self) -> bool {
        !self.batches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MoveRecord;

    fn batch(tag: &str) -> MoveBatch {
        MoveBatch::new(
            vec![MoveRecord::new(
                format!("/src/{tag}.jpg"),
                format!("/dst/{tag}.jpg"),
                "Alice",
            )],
            "/dst",
        )
    }

    #[test]
    fn pop_returns_most_recent_first() {
        let mut h = History::with_capacity(5);
        h.push(batch("a"));
        h.push(batch("b"));
        let last = h.pop_last().unwrap();
        assert!(last.records[0].from.ends_with("b.jpg"));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn overflow_evicts_oldest() {
        let mut h = History::with_capacity(3);
        for tag in ["a", "b", "c", "d"] {
            h.push(batch(tag));
        }
        assert_eq!(h.len(), 3);
        // Pop back-to-front: d, c, b; a was evicted.
        for expect in ["d", "c", "b"] {
            let got = h.pop_last().unwrap();
            assert!(got.records[0].from.ends_with(format!("{expect}.jpg")));
        }
        assert!(h.pop_last().is_none());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut h = History::with_capacity(0);
        h.push(batch("a"));
        assert!(h.has_any());
    }
}
