//! Bounded linear undo/redo history.
//!
//! The stack holds immutable snapshots and a cursor pointing at the current
//! one. Pushing truncates everything after the cursor (no branches), undo and
//! redo only move the cursor.

use std::collections::VecDeque;

use crate::constants::DEFAULT_HISTORY_LIMIT;

/// Bounded undo/redo container of snapshots.
///
/// The stack is never empty: it is created with a seed entry and `reset`
/// replaces everything with a new seed.
#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    entries: VecDeque<T>,
    cursor: usize,
    capacity: usize,
}

impl<T> HistoryStack<T> {
    /// Creates a history seeded with one entry.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn new(seed: T, capacity: usize) -> Self {
        let mut entries = VecDeque::with_capacity(capacity.max(1));
        entries.push_back(seed);
        Self {
            entries,
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Creates a history with the default capacity.
    #[must_use]
    pub fn with_default_capacity(seed: T) -> Self {
        Self::new(seed, DEFAULT_HISTORY_LIMIT)
    }

    /// Records a new entry after the current one.
    ///
    /// Redoable entries are discarded. When the bound is exceeded the oldest
    /// entries are evicted; the cursor keeps pointing at the pushed entry.
    pub fn push(&mut self, next: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(next);

        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back one entry. Returns `None` if there is nothing to undo.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Steps forward one entry. Returns `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Replaces the whole history with a single seed entry.
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.cursor = 0;
    }

    /// The entry at the cursor.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    /// True if `undo` would move the cursor.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// True if `redo` would move the cursor.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of stored entries (including redoable ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current entry.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Maximum number of stored entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}
