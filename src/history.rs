//! Bounded linear undo/redo history over whole-buffer snapshots.
//!
//! [`HistoryStore`] keeps an ordered sequence of text snapshots and a cursor
//! selecting the current one. Committing after an undo discards the abandoned
//! future, so history is always a single line, never a tree.
//!
//! # Examples
//!
//! ```
//! use textfmt::HistoryStore;
//!
//! let mut history = HistoryStore::new("");
//! history.commit("Hello");
//! history.commit("Hello World");
//! assert_eq!(history.current(), "Hello World");
//!
//! history.undo();
//! assert_eq!(history.current(), "Hello");
//!
//! history.redo();
//! assert_eq!(history.current(), "Hello World");
//! ```

use std::collections::VecDeque;

/// Default maximum number of snapshots to retain.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Snapshot history with a cursor and bounded memory usage.
///
/// Invariants:
///
/// - `1 <= len() <= capacity()`
/// - `cursor() < len()`
/// - `current()` is the snapshot at `cursor()`
#[derive(Clone, Debug)]
pub struct HistoryStore {
    snapshots: VecDeque<String>,
    cursor: usize,
    /// Maximum number of snapshots. Oldest entries are dropped when exceeded.
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new("")
    }
}

impl HistoryStore {
    /// Create a history holding a single initial snapshot.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_capacity(initial, DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a history with a custom capacity.
    ///
    /// A capacity of zero is treated as one: the current snapshot must always
    /// be retained.
    #[must_use]
    pub fn with_capacity(initial: impl Into<String>, capacity: usize) -> Self {
        let mut snapshots = VecDeque::with_capacity(capacity.clamp(1, DEFAULT_HISTORY_CAPACITY));
        snapshots.push_back(initial.into());
        Self {
            snapshots,
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn current(&self) -> &str {
        // The cursor invariant guarantees the index is in bounds.
        &self.snapshots[self.cursor]
    }

    /// Commit a new snapshot.
    ///
    /// Returns `false` without touching history when `text` equals the current
    /// snapshot. Otherwise any redo-able future is discarded, the snapshot is
    /// appended, the oldest snapshot is evicted if capacity is exceeded, and
    /// the cursor moves to the new snapshot.
    pub fn commit(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.current() {
            return false;
        }

        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(text);
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.cursor = self.snapshots.len() - 1;
        true
    }

    /// Step back one snapshot.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one snapshot.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// History is never empty; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the current snapshot.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Maximum number of retained snapshots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over retained snapshots, oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &str> {
        self.snapshots.iter().map(String::as_str)
    }
}
