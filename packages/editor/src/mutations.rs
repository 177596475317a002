//! # Segment Mutations
//!
//! Edit operations on a token field's segment list.
//!
//! ## Mutation Semantics
//!
//! ### InsertText
//! - Splices text into the anchored text segment at the caret
//! - Caret moves past the inserted text
//!
//! ### InsertVariable
//! - Replaces `trigger + query` before the caret with a variable
//! - Text after the caret moves into a new text segment after the variable
//! - Candidates outside the supplied list are ignored
//!
//! ### RemoveVariableAt
//! - Deletes a variable and merges the surrounding text segments
//! - Caret lands at the join
//!
//! ### BackspaceAtBoundary
//! - At offset 0 right after a variable, removes that variable
//! - Anywhere else it is a no-op; ordinary deletion belongs to the host
//!
//! ### ReplaceText
//! - Replaces one text segment's body after native editing in the host
//!
//! Every operation is total. Non-canonical input is normalized first and a
//! bad anchor falls back to the end of the value. Text that ends up holding
//! a complete `{name}` is re-tokenized, so the segment list always matches
//! what re-parsing its serialized value would produce.

use crate::navigation::{resolve, ResolvedAnchor};
use crate::EditorConfig;
use polaris_parser::{
    normalize, parse_with_ids, serialize, split_chars, validate, CursorAnchor, IdGenerator,
    Segment, SegmentId, SuggestionCandidate,
};
use serde::{Deserialize, Serialize};

use crate::suggestions::find_trigger;

/// Edit operations (command objects consumed by the engine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Edit {
    /// Insert literal text at the caret
    InsertText { text: String },

    /// Commit a suggestion as a variable
    InsertVariable { candidate: SuggestionCandidate },

    /// Delete a variable segment
    RemoveVariableAt { segment_id: SegmentId },

    /// Backspace pressed at the start of a text segment
    BackspaceAtBoundary,

    /// Sync a text segment after native editing
    ReplaceText {
        segment_id: SegmentId,
        text: String,
        caret: usize,
    },
}

impl Edit {
    /// Get a debug name for this edit
    pub fn name(&self) -> &'static str {
        match self {
            Edit::InsertText { .. } => "insertText",
            Edit::InsertVariable { .. } => "insertVariable",
            Edit::RemoveVariableAt { .. } => "removeVariableAt",
            Edit::BackspaceAtBoundary => "backspaceAtBoundary",
            Edit::ReplaceText { .. } => "replaceText",
        }
    }
}

/// Result of applying an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub segments: Vec<Segment>,
    pub anchor: CursorAnchor,

    /// Whether the serialized value changed
    pub changed: bool,
}

/// Applies [`Edit`]s to segment lists
#[derive(Debug, Clone)]
pub struct MutationEngine {
    trigger: char,
    insert_trailing_space: bool,
}

impl MutationEngine {
    pub fn new(trigger: char, insert_trailing_space: bool) -> Self {
        Self {
            trigger,
            insert_trailing_space,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.trigger, config.insert_trailing_space)
    }

    /// Apply an edit and compute the next caret anchor
    pub fn apply(
        &self,
        segments: &[Segment],
        edit: &Edit,
        anchor: &CursorAnchor,
        candidates: &[SuggestionCandidate],
        ids: &mut IdGenerator,
    ) -> EditOutcome {
        let before = serialize(segments);
        let mut working = if validate(segments).is_ok() {
            segments.to_vec()
        } else {
            tracing::debug!("normalizing non-canonical segments before edit");
            normalize(segments.to_vec(), ids)
        };

        // Canonical lists always hold a text segment
        let Some(caret) = resolve(&working, anchor) else {
            return EditOutcome {
                segments: working,
                anchor: anchor.clone(),
                changed: false,
            };
        };

        let next = match edit {
            Edit::InsertText { text } => insert_text(&mut working, caret, text, ids),
            Edit::InsertVariable { candidate } => {
                self.insert_variable(&mut working, caret, candidate, candidates, ids)
            }
            Edit::RemoveVariableAt { segment_id } => {
                match working.iter().position(|s| &s.id == segment_id && s.is_variable()) {
                    Some(index) => remove_variable(&mut working, index, ids),
                    None => None,
                }
            }
            Edit::BackspaceAtBoundary => {
                if caret.offset == 0 && caret.index > 0 && working[caret.index - 1].is_variable() {
                    remove_variable(&mut working, caret.index - 1, ids)
                } else {
                    None
                }
            }
            Edit::ReplaceText {
                segment_id,
                text,
                caret: text_caret,
            } => match working.iter().position(|s| &s.id == segment_id && s.is_text()) {
                Some(index) => {
                    working[index].set_text(text.as_str());
                    let offset = (*text_caret).min(working[index].char_len());
                    Some(retokenize(&mut working, index, offset, ids))
                }
                None => None,
            },
        };

        let anchor = next.unwrap_or_else(|| {
            CursorAnchor::new(working[caret.index].id.clone(), caret.offset)
        });
        let changed = serialize(&working) != before;

        tracing::debug!(op = edit.name(), changed, segments = working.len(), "applied edit");

        EditOutcome {
            segments: working,
            anchor,
            changed,
        }
    }

    fn insert_variable(
        &self,
        segments: &mut Vec<Segment>,
        caret: ResolvedAnchor,
        candidate: &SuggestionCandidate,
        candidates: &[SuggestionCandidate],
        ids: &mut IdGenerator,
    ) -> Option<CursorAnchor> {
        let Some(known) = candidates.iter().find(|c| c.value == candidate.value) else {
            tracing::debug!(value = %candidate.value, "ignoring unknown candidate");
            return None;
        };

        if known.value.is_empty() || known.value.contains(['{', '}']) {
            tracing::warn!(value = %known.value, "candidate value cannot be stored as a variable");
            return None;
        }

        let text = segments[caret.index].raw_value.clone();
        let start = find_trigger(&text, caret.offset, self.trigger)
            .map(|(offset, _)| offset)
            .unwrap_or(caret.offset);

        let (head, _) = split_chars(&text, start);
        let (_, tail) = split_chars(&text, caret.offset);

        let spacer = if self.insert_trailing_space && !tail.starts_with(char::is_whitespace) {
            " "
        } else {
            ""
        };
        let following = format!("{}{}", spacer, tail);
        let head = head.to_string();

        segments[caret.index].set_text(head);
        let variable = Segment::variable(ids.new_id(), known.value.clone(), known.label.clone());
        let after = Segment::text(ids.new_id(), following);
        let after_index = caret.index + 2;
        segments.insert(caret.index + 1, variable);
        segments.insert(after_index, after);

        Some(retokenize(segments, after_index, spacer.len(), ids))
    }
}

impl Default for MutationEngine {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

fn insert_text(
    segments: &mut Vec<Segment>,
    caret: ResolvedAnchor,
    text: &str,
    ids: &mut IdGenerator,
) -> Option<CursorAnchor> {
    if text.is_empty() {
        return None;
    }

    let segment = &mut segments[caret.index];
    let (head, tail) = split_chars(&segment.raw_value, caret.offset);
    let updated = format!("{}{}{}", head, text, tail);
    segment.set_text(updated);

    let offset = caret.offset + text.chars().count();
    Some(retokenize(segments, caret.index, offset, ids))
}

/// Remove the variable at `index`, merging its neighbours
fn remove_variable(
    segments: &mut Vec<Segment>,
    index: usize,
    ids: &mut IdGenerator,
) -> Option<CursorAnchor> {
    let removed = segments.remove(index);
    tracing::trace!(segment_id = %removed.id, name = %removed.raw_value, "removed variable");

    let prev_is_text = index > 0 && segments[index - 1].is_text();
    let next_is_text = segments.get(index).is_some_and(|s| s.is_text());

    match (prev_is_text, next_is_text) {
        (true, true) => {
            let next = segments.remove(index);
            let prev = &mut segments[index - 1];
            let join = prev.char_len();
            let merged = format!("{}{}", prev.raw_value, next.raw_value);
            prev.set_text(merged);
            Some(retokenize(segments, index - 1, join, ids))
        }
        (_, true) => {
            let anchor = CursorAnchor::new(segments[index].id.clone(), 0);
            Some(renormalize(segments, anchor, ids))
        }
        (true, false) => {
            let prev = &segments[index - 1];
            let anchor = CursorAnchor::new(prev.id.clone(), prev.char_len());
            Some(renormalize(segments, anchor, ids))
        }
        (false, false) => {
            *segments = normalize(std::mem::take(segments), ids);
            crate::navigation::end_anchor(segments)
        }
    }
}

/// Restore canonical form, keeping `anchor` when it still resolves
fn renormalize(
    segments: &mut Vec<Segment>,
    anchor: CursorAnchor,
    ids: &mut IdGenerator,
) -> CursorAnchor {
    *segments = normalize(std::mem::take(segments), ids);
    crate::navigation::resolve_anchor(segments, &anchor)
}

/// Split a text segment that now contains complete `{name}` tokens
///
/// The first resulting segment keeps the original id. `caret` is a
/// character offset into the old body and is mapped onto the new pieces.
fn retokenize(
    segments: &mut Vec<Segment>,
    index: usize,
    caret: usize,
    ids: &mut IdGenerator,
) -> CursorAnchor {
    let body = segments[index].raw_value.clone();
    let mut pieces = parse_with_ids(&body, ids);

    if pieces.len() == 1 {
        return CursorAnchor::new(segments[index].id.clone(), caret);
    }

    pieces[0].id = segments[index].id.clone();
    let anchor = locate(&pieces, caret);
    segments.splice(index..=index, pieces);

    tracing::trace!(segment = index, "re-tokenized text segment");
    anchor
}

/// Map a character offset in a re-tokenized body onto its pieces
fn locate(pieces: &[Segment], caret: usize) -> CursorAnchor {
    let mut remaining = caret;
    let mut skip_to_next_text = false;

    for piece in pieces {
        if piece.is_variable() {
            let len = piece.char_len() + 2;
            if remaining < len {
                skip_to_next_text = true;
                remaining = 0;
            } else {
                remaining -= len;
            }
            continue;
        }

        let len = piece.char_len();
        if skip_to_next_text || remaining <= len {
            return CursorAnchor::new(piece.id.clone(), remaining.min(len));
        }
        remaining -= len;
    }

    let last = &pieces[pieces.len() - 1];
    CursorAnchor::new(last.id.clone(), last.char_len())
}
