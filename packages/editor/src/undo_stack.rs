//! # Undo/Redo Stack
//!
//! Tracks template history for undo/redo.
//!
//! ## Design
//!
//! - Each applied mutation records the template before and after it
//! - Undo restores the "before" snapshot and moves the entry to the redo stack
//! - Redo restores the "after" snapshot
//! - New mutations clear the redo stack
//! - Batches group several mutations into one undo step
//!
//! Snapshots never rewind the id generator, so ids stay unique across undo.

use pagecraft_document::Template;

/// One undoable step
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub before: Template,
    pub after: Template,
    pub description: Option<String>,
}

/// Undo/redo stack for template editing
#[derive(Debug)]
pub struct UndoStack {
    /// Applied steps (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Undone steps (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<HistoryEntry>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record an applied change. Any redo history is discarded, batched or not.
    pub fn record(&mut self, before: Template, after: &Template, description: &str) {
        if let Some(batch) = &mut self.current_batch {
            batch.after = after.clone();
            self.redo_stack.clear();
            return;
        }

        self.push_entry(HistoryEntry {
            before,
            after: after.clone(),
            description: Some(description.to_string()),
        });
    }

    /// Start a batch; everything recorded until `end_batch` is one step
    pub fn begin_batch(&mut self, current: &Template, description: impl Into<String>) {
        self.current_batch = Some(HistoryEntry {
            before: current.clone(),
            after: current.clone(),
            description: Some(description.into()),
        });
    }

    /// End the current batch and push it if anything changed
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if batch.before != batch.after {
                self.push_entry(batch);
            }
        }
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the future
        self.redo_stack.clear();
    }

    /// Undo the most recent step, returning the template to restore
    pub fn undo(&mut self) -> Option<Template> {
        let entry = self.undo_stack.pop()?;
        let restored = entry.before.clone();
        self.redo_stack.push(entry);
        Some(restored)
    }

    /// Redo the most recently undone step, returning the template to restore
    pub fn redo(&mut self) -> Option<Template> {
        let entry = self.redo_stack.pop()?;
        let restored = entry.after.clone();
        self.undo_stack.push(entry);
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
