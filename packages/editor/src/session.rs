//! # Edit Session Management
//!
//! One token field being edited. The session owns the segment list, the
//! caret, the id generator, and the undo history, and arbitrates between
//! two kinds of writes:
//!
//! - **Internal**: commands dispatched through [`EditSession::dispatch`].
//!   A changing edit sets the `mutating` guard until the host calls
//!   [`EditSession::settle`] after restoring the caret.
//! - **External**: the host replaces the flat value
//!   ([`EditSession::sync_external`]). Segments are re-derived only while the
//!   guard is clear; the host's echo of our own value is acknowledged.

use crate::navigation::{end_anchor, resolve_anchor, step};
use crate::suggestions::{SuggestionMatch, SuggestionMatcher};
use crate::undo_stack::{Snapshot, UndoStack};
use crate::{Command, Edit, EditorConfig, EditorError, MutationEngine};
use polaris_parser::{
    display_text, parse_with_ids, plain_text, serialize, validate, CursorAnchor, IdGenerator,
    Segment, SegmentId, SuggestionCandidate,
};
use serde::{Deserialize, Serialize};

/// What the host needs after a dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub value: String,
    pub anchor: CursorAnchor,
    pub changed: bool,
    pub suggestions: SuggestionMatch,
}

/// How an external write was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncOutcome {
    /// Value already matches the session
    Unchanged,
    /// Segments re-derived from the new value
    Reparsed,
    /// Dropped because an internal edit has not settled yet
    Suppressed,
}

/// Editing state for one token field
#[derive(Debug)]
pub struct EditSession {
    /// Session key (usually the field name)
    pub id: String,

    segments: Vec<Segment>,
    anchor: CursorAnchor,
    ids: IdGenerator,
    config: EditorConfig,
    engine: MutationEngine,
    matcher: SuggestionMatcher,
    candidates: Vec<SuggestionCandidate>,
    history: UndoStack,

    /// Set by internal edits, cleared by `settle`
    mutating: bool,
}

impl EditSession {
    /// Create a session from a flat value; the caret starts at the end
    pub fn new(key: impl Into<String>, value: &str, config: EditorConfig) -> Self {
        let id = key.into();
        let mut ids = IdGenerator::new(&id);
        let segments = parse_with_ids(value, &mut ids);

        tracing::debug!(session = %id, segments = segments.len(), "opened edit session");
        Self::assemble(id, segments, ids, config)
    }

    /// Create a session from an existing segment list
    ///
    /// Unlike edits, this is strict: the list must already be canonical.
    pub fn from_segments(
        key: impl Into<String>,
        segments: Vec<Segment>,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        validate(&segments)?;

        let id = key.into();
        let mut ids = IdGenerator::new(&id);
        ids.reserve(segments.iter().map(|s| s.id.as_str()));
        Ok(Self::assemble(id, segments, ids, config))
    }

    fn assemble(
        id: String,
        segments: Vec<Segment>,
        ids: IdGenerator,
        config: EditorConfig,
    ) -> Self {
        let anchor = end_of(&segments);
        Self {
            id,
            segments,
            anchor,
            ids,
            engine: MutationEngine::from_config(&config),
            matcher: SuggestionMatcher::from_config(&config),
            history: UndoStack::with_max_levels(config.history_depth),
            config,
            candidates: Vec::new(),
            mutating: false,
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<SuggestionCandidate>) -> Self {
        self.set_candidates(candidates);
        self
    }

    /// Replace the candidate list and relabel existing variables
    pub fn set_candidates(&mut self, candidates: Vec<SuggestionCandidate>) {
        self.candidates = candidates;
        self.apply_labels();
    }

    pub fn candidates(&self) -> &[SuggestionCandidate] {
        &self.candidates
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn anchor(&self) -> &CursorAnchor {
        &self.anchor
    }

    /// Stored flat value
    pub fn value(&self) -> String {
        serialize(&self.segments)
    }

    pub fn plain_text(&self) -> String {
        plain_text(&self.segments)
    }

    pub fn display_text(&self) -> String {
        display_text(&self.segments)
    }

    pub fn is_mutating(&self) -> bool {
        self.mutating
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Group the following edits into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    /// Single entry point for input events
    pub fn dispatch(&mut self, command: Command) -> DispatchResult {
        tracing::trace!(session = %self.id, command = command.name(), "dispatch");

        let changed = match command {
            Command::MoveCursor { direction } => {
                self.anchor = step(&self.segments, &self.anchor, direction);
                self.history.break_coalescing();
                false
            }
            Command::SetCursor { anchor } => {
                self.anchor = resolve_anchor(&self.segments, &anchor);
                self.history.break_coalescing();
                false
            }
            Command::Undo => {
                let snapshot = self.history.undo();
                self.restore(snapshot)
            }
            Command::Redo => {
                let snapshot = self.history.redo();
                self.restore(snapshot)
            }
            Command::SelectSuggestion { value } => match self.candidate(&value) {
                Some(candidate) => self.apply(Edit::InsertVariable { candidate }),
                None => {
                    tracing::debug!(value = %value, "no candidate for suggestion");
                    false
                }
            },
            other => match other.as_edit() {
                Some(edit) => self.apply(edit),
                None => false,
            },
        };

        self.result(changed)
    }

    /// Commit the candidate with `value` at the caret
    pub fn select_suggestion(&mut self, value: &str) -> Result<DispatchResult, EditorError> {
        if self.candidate(value).is_none() {
            return Err(EditorError::UnknownSuggestion(value.to_string()));
        }

        Ok(self.dispatch(Command::SelectSuggestion {
            value: value.to_string(),
        }))
    }

    /// Suggestion state at the caret
    pub fn suggestions(&self) -> SuggestionMatch {
        self.matcher
            .find(&self.segments, &self.anchor, &self.candidates)
    }

    /// Handle a flat value written by the host
    pub fn sync_external(&mut self, value: &str) -> SyncOutcome {
        if value == self.value() {
            return SyncOutcome::Unchanged;
        }

        if self.mutating {
            tracing::debug!(session = %self.id, "external write suppressed during edit");
            return SyncOutcome::Suppressed;
        }

        self.segments = parse_with_ids(value, &mut self.ids);
        self.apply_labels();
        self.anchor = end_of(&self.segments);
        self.history.clear();

        tracing::debug!(session = %self.id, segments = self.segments.len(), "re-parsed external value");
        SyncOutcome::Reparsed
    }

    /// The host has restored the caret; external writes apply again
    pub fn settle(&mut self) {
        self.mutating = false;
    }

    fn apply(&mut self, edit: Edit) -> bool {
        let before = self.snapshot();
        let outcome = self.engine.apply(
            &self.segments,
            &edit,
            &self.anchor,
            &self.candidates,
            &mut self.ids,
        );

        self.segments = outcome.segments;
        self.anchor = outcome.anchor;

        if outcome.changed {
            self.apply_labels();
            let coalesce = matches!(edit, Edit::InsertText { .. } | Edit::ReplaceText { .. });
            self.history
                .record(before, self.snapshot(), edit.name(), coalesce);
            self.mutating = true;
        }

        outcome.changed
    }

    fn restore(&mut self, snapshot: Option<Snapshot>) -> bool {
        let Some(snapshot) = snapshot else {
            return false;
        };

        self.segments = snapshot.segments;
        self.anchor = snapshot.anchor;
        self.ids
            .reserve(self.segments.iter().map(|s| s.id.as_str()));
        self.apply_labels();
        self.mutating = true;
        true
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.segments.clone(),
            anchor: self.anchor.clone(),
        }
    }

    fn candidate(&self, value: &str) -> Option<SuggestionCandidate> {
        self.candidates.iter().find(|c| c.value == value).cloned()
    }

    /// Variables show their candidate's label when one is known
    fn apply_labels(&mut self) {
        for segment in self.segments.iter_mut().filter(|s| s.is_variable()) {
            segment.display_value = self
                .candidates
                .iter()
                .find(|c| c.value == segment.raw_value)
                .map(|c| c.label.clone())
                .unwrap_or_else(|| segment.raw_value.clone());
        }
    }

    fn result(&self, changed: bool) -> DispatchResult {
        DispatchResult {
            value: self.value(),
            anchor: self.anchor.clone(),
            changed,
            suggestions: self.suggestions(),
        }
    }
}

fn end_of(segments: &[Segment]) -> CursorAnchor {
    end_anchor(segments).unwrap_or_else(|| CursorAnchor::new(SegmentId::new(), 0))
}
