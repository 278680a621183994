//! Linear undo/redo history of window placements.
//!
//! Two stacks of [`HistoryEntry`] transitions, owned by the dispatcher (an
//! explicit context object, not process-global state, so the component is
//! unit-testable).  The semantics are a standard linear history: recording
//! any new forward action clears the redo stack — there is no branching
//! timeline.  Nothing is persisted; both stacks start empty every run.
//!
//! The dispatcher performs the actual host moves.  When it undoes an entry
//! it re-reads the window's *actual* post-move rectangle (the host may clamp
//! or snap) and pushes the inverse transition here via [`History::push_redo`]
//! / [`History::push_undo`], which deliberately do not clear anything.

use crate::rect::Rect;
use crate::traits::WindowHandle;
use log::debug;
use std::time::SystemTime;

/// One recorded placement transition.
///
/// `from` is the rectangle before the action, `to` the rectangle after.
/// Undoing moves the window back to `from`; redoing moves it to `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub handle: WindowHandle,
    pub from: Rect,
    pub to: Rect,
    pub at: SystemTime,
}

impl HistoryEntry {
    /// Build an entry timestamped now.
    pub fn new(handle: WindowHandle, from: Rect, to: Rect) -> Self {
        Self {
            handle,
            from,
            to,
            at: SystemTime::now(),
        }
    }
}

/// The undo and redo stacks.
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new forward action.
    ///
    /// Any forward action invalidates the redo timeline, so the redo stack
    /// is cleared entirely.
    pub fn record(&mut self, handle: WindowHandle, from: Rect, to: Rect) {
        if !self.redo.is_empty() {
            debug!("new action discards {} redo entries", self.redo.len());
            self.redo.clear();
        }
        self.undo.push(HistoryEntry::new(handle, from, to));
    }

    /// Pop the most recent undoable transition, if any.
    pub fn pop_undo(&mut self) -> Option<HistoryEntry> {
        self.undo.pop()
    }

    /// Pop the most recent redoable transition, if any.
    pub fn pop_redo(&mut self) -> Option<HistoryEntry> {
        self.redo.pop()
    }

    /// Push the inverse of an undone transition.  Does not clear anything.
    pub fn push_redo(&mut self, entry: HistoryEntry) {
        self.redo.push(entry);
    }

    /// Push the inverse of a redone transition.  Does not clear anything.
    pub fn push_undo(&mut self, entry: HistoryEntry) {
        self.undo.push(entry);
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}
