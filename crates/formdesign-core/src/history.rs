//! Bounded undo/redo of whole-document snapshots.

use crate::config::MAX_UNDO_HISTORY;
use crate::document::Document;
use crate::elements::ElementId;
use crate::selection::Selection;
use std::collections::VecDeque;
use web_time::SystemTime;

/// A deep copy of document state plus the selection at that point.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub document: Document,
    pub selected_ids: Vec<ElementId>,
    /// Describes the action that followed this snapshot.
    pub label: String,
    pub timestamp: SystemTime,
}

impl HistoryEntry {
    fn snapshot(document: &Document, selection: &Selection, label: &str) -> Self {
        Self {
            document: document.clone(),
            selected_ids: selection.to_vec(),
            label: label.to_string(),
            timestamp: SystemTime::now(),
        }
    }

    fn restore(self, document: &mut Document, selection: &mut Selection) {
        *document = self.document;
        selection.set(self.selected_ids);
        selection.prune(document);
    }
}

/// Linear undo/redo stacks. The undo stack holds at most `capacity`
/// entries and drops the oldest first.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(MAX_UNDO_HISTORY)
    }
}

impl HistoryManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(capacity.min(MAX_UNDO_HISTORY)),
            redo_stack: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record the current state before a mutating action (call before making
    /// changes). Clears the redo stack.
    pub fn capture(&mut self, label: &str, document: &Document, selection: &Selection) {
        if self.capacity == 0 {
            return;
        }
        self.undo_stack
            .push_back(HistoryEntry::snapshot(document, selection, label));
        self.redo_stack.clear();
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        log::debug!("Captured \"{label}\" ({} undo entries)", self.undo_stack.len());
    }

    /// Undo the last captured action.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, document: &mut Document, selection: &mut Selection) -> bool {
        let Some(entry) = self.undo_stack.pop_back() else {
            log::debug!("Nothing to undo");
            return false;
        };
        log::debug!("Undo \"{}\"", entry.label);
        self.redo_stack
            .push(HistoryEntry::snapshot(document, selection, &entry.label));
        entry.restore(document, selection);
        true
    }

    /// Redo the last undone action.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, document: &mut Document, selection: &mut Selection) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            log::debug!("Nothing to redo");
            return false;
        };
        log::debug!("Redo \"{}\"", entry.label);
        self.undo_stack
            .push_back(HistoryEntry::snapshot(document, selection, &entry.label));
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        entry.restore(document, selection);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the action the next undo would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.label.as_str())
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.label.as_str())
    }

    /// Entries from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undo_stack.iter()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
