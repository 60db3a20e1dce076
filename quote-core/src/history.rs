//! Snapshot-based undo/redo history.
//!
//! Lives outside the pricing engine: the editor records a snapshot of its
//! state before each action and steps back and forth through them.

use std::collections::VecDeque;

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Undo/redo stack of whole-state snapshots.
#[derive(Debug, Clone)]
pub struct History<T: Clone> {
    past: VecDeque<T>,
    future: Vec<T>,
    capacity: usize,
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<T: Clone> History<T> {
    /// Create a history keeping at most `capacity` undo steps.
    pub fn new(capacity: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record the state as it was before an action.
    ///
    /// Clears the redo branch; the oldest snapshot is dropped when full.
    pub fn record(&mut self, snapshot: T) {
        self.future.clear();
        if self.past.len() == self.capacity {
            self.past.pop_front();
        }
        self.past.push_back(snapshot);
    }

    /// Step back. `current` becomes redoable; returns the state to restore.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    /// Step forward again. `current` becomes undoable.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.future.pop()?;
        self.past.push_back(current);
        if self.past.len() > self.capacity {
            self.past.pop_front();
        }
        Some(next)
    }

    /// Check if there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Check if there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undo steps available.
    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    /// Drop all snapshots.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
