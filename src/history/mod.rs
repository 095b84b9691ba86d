use std::collections::VecDeque;

use crate::models::HistoryEntry;

pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Bounded, insertion-ordered record of recent readings (oldest first).
///
/// Pushing past capacity evicts exactly one entry from the front. Nothing is merged or
/// deduplicated, and there is no way to clear it short of dropping the buffer.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero capacity is bumped to one so the latest reading is always retained.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(
                capacity.min(DEFAULT_HISTORY_CAPACITY).saturating_add(1),
            ),
            capacity,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);

        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
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
