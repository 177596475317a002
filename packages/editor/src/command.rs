//! Commands accepted by [`EditSession::dispatch`](crate::EditSession::dispatch)
//!
//! Commands are what a host sends for each input event. The edit variants
//! map one-to-one onto [`Edit`]; the rest steer the caret or the history.

use crate::navigation::Direction;
use crate::Edit;
use polaris_parser::{CursorAnchor, SegmentId, SuggestionCandidate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    InsertText {
        text: String,
    },
    InsertVariable {
        candidate: SuggestionCandidate,
    },

    /// Commit the candidate with this value from the session's list
    SelectSuggestion {
        value: String,
    },
    RemoveVariableAt {
        segment_id: SegmentId,
    },
    BackspaceAtBoundary,
    ReplaceText {
        segment_id: SegmentId,
        text: String,
        caret: usize,
    },
    MoveCursor {
        direction: Direction,
    },
    SetCursor {
        anchor: CursorAnchor,
    },
    Undo,
    Redo,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::InsertText { .. } => "insertText",
            Command::InsertVariable { .. } => "insertVariable",
            Command::SelectSuggestion { .. } => "selectSuggestion",
            Command::RemoveVariableAt { .. } => "removeVariableAt",
            Command::BackspaceAtBoundary => "backspaceAtBoundary",
            Command::ReplaceText { .. } => "replaceText",
            Command::MoveCursor { .. } => "moveCursor",
            Command::SetCursor { .. } => "setCursor",
            Command::Undo => "undo",
            Command::Redo => "redo",
        }
    }

    /// The edit this command performs, if it edits segments directly
    ///
    /// `SelectSuggestion` needs the session's candidates and is resolved
    /// there.
    pub fn as_edit(&self) -> Option<Edit> {
        let edit = match self {
            Command::InsertText { text } => Edit::InsertText { text: text.clone() },
            Command::InsertVariable { candidate } => Edit::InsertVariable {
                candidate: candidate.clone(),
            },
            Command::RemoveVariableAt { segment_id } => Edit::RemoveVariableAt {
                segment_id: segment_id.clone(),
            },
            Command::BackspaceAtBoundary => Edit::BackspaceAtBoundary,
            Command::ReplaceText {
                segment_id,
                text,
                caret,
            } => Edit::ReplaceText {
                segment_id: segment_id.clone(),
                text: text.clone(),
                caret: *caret,
            },
            _ => return None,
        };
        Some(edit)
    }
}

impl From<Edit> for Command {
    fn from(edit: Edit) -> Self {
        match edit {
            Edit::InsertText { text } => Command::InsertText { text },
            Edit::InsertVariable { candidate } => Command::InsertVariable { candidate },
            Edit::RemoveVariableAt { segment_id } => Command::RemoveVariableAt { segment_id },
            Edit::BackspaceAtBoundary => Command::BackspaceAtBoundary,
            Edit::ReplaceText {
                segment_id,
                text,
                caret,
            } => Command::ReplaceText {
                segment_id,
                text,
                caret,
            },
        }
    }
}
