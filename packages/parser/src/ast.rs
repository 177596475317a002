use crate::error::{SegmentError, SegmentResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Opaque segment identifier, unique within one editing session
pub type SegmentId = String;

/// Segment variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Text,
    Variable,
}

/// Atomic unit of an editable token field value
///
/// Text segments hold a literal substring. Variable segments hold the token
/// body without its `{}` delimiters, plus a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: SegmentId,
    pub kind: SegmentKind,
    pub raw_value: String,
    pub display_value: String,
}

impl Segment {
    pub fn text(id: SegmentId, value: impl Into<String>) -> Self {
        let raw_value = value.into();
        Self {
            id,
            kind: SegmentKind::Text,
            display_value: raw_value.clone(),
            raw_value,
        }
    }

    pub fn variable(id: SegmentId, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            kind: SegmentKind::Variable,
            raw_value: name.into(),
            display_value: label.into(),
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == SegmentKind::Text
    }

    pub fn is_variable(&self) -> bool {
        self.kind == SegmentKind::Variable
    }

    /// Length of the raw value in characters
    pub fn char_len(&self) -> usize {
        self.raw_value.chars().count()
    }

    /// Replace the raw value of a text segment, keeping the label in sync
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.raw_value = value.into();
        if self.is_text() {
            self.display_value = self.raw_value.clone();
        }
    }

    /// Structural comparison that ignores ids
    pub fn same_content(&self, other: &Segment) -> bool {
        self.kind == other.kind && self.raw_value == other.raw_value
    }
}

/// Caret position: a character offset into a text segment's raw value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorAnchor {
    pub segment_id: SegmentId,
    pub offset: usize,
}

impl CursorAnchor {
    pub fn new(segment_id: impl Into<SegmentId>, offset: usize) -> Self {
        Self {
            segment_id: segment_id.into(),
            offset,
        }
    }
}

/// Selectable variable offered by the suggestion menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionCandidate {
    pub label: String,
    pub value: String,
}

impl SuggestionCandidate {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Byte index of the `offset`-th character, clamped to the end of `text`
pub fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

/// Split at a character offset (clamped)
pub fn split_chars(text: &str, offset: usize) -> (&str, &str) {
    text.split_at(byte_index(text, offset))
}

/// Check the canonical segment layout
///
/// Canonical lists alternate text and variable segments, start and end with
/// a text segment, carry unique ids, and contain no empty or brace-bearing
/// variable bodies.
pub fn validate(segments: &[Segment]) -> SegmentResult<()> {
    let (first, last) = match (segments.first(), segments.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(SegmentError::Empty),
    };

    if !first.is_text() {
        return Err(SegmentError::MissingLeadingText);
    }
    if !last.is_text() {
        return Err(SegmentError::MissingTrailingText);
    }

    let mut seen = HashSet::new();
    for (index, segment) in segments.iter().enumerate() {
        if !seen.insert(segment.id.as_str()) {
            return Err(SegmentError::DuplicateId(segment.id.clone()));
        }

        if segment.is_variable()
            && (segment.raw_value.is_empty()
                || segment.raw_value.contains(['{', '}']))
        {
            return Err(SegmentError::InvalidVariable {
                id: segment.id.clone(),
                body: segment.raw_value.clone(),
            });
        }

        if index > 0 && segments[index - 1].kind == segment.kind {
            return Err(match segment.kind {
                SegmentKind::Text => SegmentError::AdjacentText { index },
                SegmentKind::Variable => SegmentError::AdjacentVariables { index },
            });
        }
    }

    Ok(())
}
