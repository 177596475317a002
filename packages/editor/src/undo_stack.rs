//! # Undo/Redo Stack
//!
//! Tracks edit history for one token field session.
//!
//! ## Design
//!
//! - Each entry stores the segment list and caret before and after the edit
//! - Undo restores `before` and moves the entry to the redo stack
//! - Redo restores `after`
//! - New edits clear the redo stack
//! - Consecutive typing coalesces into one entry until something else happens
//! - Batches group several edits into one undo step
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! stack.record(before, after, "insertText", true);
//!
//! if let Some(snapshot) = stack.undo() {
//!     // restore snapshot.segments / snapshot.anchor
//! }
//! ```

use polaris_parser::{CursorAnchor, Segment};

/// Segment list and caret at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub segments: Vec<Segment>,
    pub anchor: CursorAnchor,
}

/// One undoable step
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub before: Snapshot,
    pub after: Snapshot,

    /// Optional description of this step
    pub description: Option<String>,
}

/// Batch under construction
#[derive(Debug, Default)]
struct PendingBatch {
    before: Option<Snapshot>,
    after: Option<Snapshot>,
    description: Option<String>,
}

/// Undo/redo stack for token field editing
#[derive(Debug)]
pub struct UndoStack {
    /// Applied steps (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Undone steps (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<PendingBatch>,

    /// Description of the open coalescing run, if any
    coalescing: Option<String>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
            coalescing: None,
        }
    }

    /// Record an applied edit
    ///
    /// With `coalesce`, an edit with the same description as the open run
    /// extends the previous entry instead of pushing a new one.
    pub fn record(
        &mut self,
        before: Snapshot,
        after: Snapshot,
        description: impl Into<String>,
        coalesce: bool,
    ) {
        let description = description.into();

        if let Some(batch) = &mut self.current_batch {
            batch.description.get_or_insert(description);
            batch.before.get_or_insert(before);
            batch.after = Some(after);
            return;
        }

        let extends_run = coalesce && self.coalescing.as_deref() == Some(description.as_str());
        if let (true, Some(last)) = (extends_run, self.undo_stack.last_mut()) {
            last.after = after;
            self.redo_stack.clear();
            return;
        }

        self.coalescing = coalesce.then(|| description.clone());
        self.push_entry(HistoryEntry {
            before,
            after,
            description: Some(description),
        });
    }

    /// Close the open coalescing run (e.g. after a cursor move)
    pub fn break_coalescing(&mut self) {
        self.coalescing = None;
    }

    /// Start a batch of edits (will be undone/redone together)
    ///
    /// Batches do not nest: an open batch is closed into its own step first.
    pub fn begin_batch(&mut self) {
        self.end_batch();
        self.coalescing = None;
        self.current_batch = Some(PendingBatch::default());
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(PendingBatch {
            before: Some(before),
            after: Some(after),
            description,
        }) = self.current_batch.take()
        {
            self.push_entry(HistoryEntry {
                before,
                after,
                description,
            });
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the redo history
        self.redo_stack.clear();
    }

    /// Undo the most recent step, returning the state to restore
    pub fn undo(&mut self) -> Option<Snapshot> {
        self.coalescing = None;
        let entry = self.undo_stack.pop()?;
        let snapshot = entry.before.clone();
        self.redo_stack.push(entry);
        Some(snapshot)
    }

    /// Redo the most recently undone step, returning the state to restore
    pub fn redo(&mut self) -> Option<Snapshot> {
        self.coalescing = None;
        let entry = self.redo_stack.pop()?;
        let snapshot = entry.after.clone();
        self.undo_stack.push(entry);
        Some(snapshot)
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

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
        self.coalescing = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    /// Get description of the next redo operation
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
