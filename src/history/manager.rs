// HistoryManager - Manages undo/redo snapshot stacks

use std::collections::VecDeque;

/// Default maximum number of snapshots to keep in history
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Errors returned when history has nothing to offer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Manages full-state snapshots for undo/redo
///
/// The HistoryManager maintains two stacks:
/// - Undo stack: states the document was in before each edit
/// - Redo stack: states that have been undone and can be restored again
///
/// When a new edit is recorded:
/// 1. Push the pre-edit state onto the undo stack
/// 2. Clear the redo stack (since we're on a new timeline)
/// 3. Evict the oldest snapshot if the limit is exceeded
///
/// # Memory Management
/// Each snapshot is a deep copy of the document, so the undo stack is capped.
/// When the limit is reached the oldest snapshot is silently dropped.
#[derive(Debug, Clone)]
pub struct HistoryManager<S> {
    /// States that can be restored by undo (most recent at the back)
    undo_stack: VecDeque<S>,

    /// States that can be restored by redo (most recent at the back)
    redo_stack: VecDeque<S>,

    /// Maximum number of snapshots to keep in history
    max_history: usize,
}

impl<S> HistoryManager<S> {
    /// Create a new HistoryManager with default settings
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_HISTORY)
    }

    /// Create a new HistoryManager with a custom history limit
    pub fn with_capacity(max_history: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_history),
            redo_stack: VecDeque::new(),
            max_history,
        }
    }

    /// Record the state the document is in right before an edit
    pub fn record(&mut self, state: S) {
        self.undo_stack.push_back(state);

        // Clear redo stack (we're on a new timeline now)
        self.redo_stack.clear();

        while self.undo_stack.len() > self.max_history {
            self.undo_stack.pop_front();
        }
    }

    /// Step back one edit
    ///
    /// `current` is the live state, which becomes redoable. Returns the state
    /// to restore.
    ///
    /// # Errors
    /// Returns [`HistoryError::NothingToUndo`] when the undo stack is empty;
    /// `current` is dropped in that case.
    pub fn undo(&mut self, current: S) -> HistoryResult<S> {
        let previous = self
            .undo_stack
            .pop_back()
            .ok_or(HistoryError::NothingToUndo)?;

        self.redo_stack.push_back(current);
        Ok(previous)
    }

    /// Step forward one undone edit
    ///
    /// # Errors
    /// Returns [`HistoryError::NothingToRedo`] when the redo stack is empty.
    pub fn redo(&mut self, current: S) -> HistoryResult<S> {
        let next = self
            .redo_stack
            .pop_back()
            .ok_or(HistoryError::NothingToRedo)?;

        self.undo_stack.push_back(current);
        while self.undo_stack.len() > self.max_history {
            self.undo_stack.pop_front();
        }
        Ok(next)
    }

    /// Check if there are states that can be restored by undo
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if there are states that can be restored by redo
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }
}

impl<S> Default for HistoryManager<S> {
    fn default() -> Self {
        Self::new()
    }
}
