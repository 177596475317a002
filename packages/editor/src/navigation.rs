//! # Cursor Tracking
//!
//! Pure helpers that map cursor anchors onto a segment list. Nothing here
//! mutates segments; the mutation engine and the session use these to decide
//! where the caret lands after an edit or an arrow-key press.
//!
//! Variables are atomic for the caret. Stepping over one moves from the edge
//! of one text segment straight to the edge of the next.

use polaris_parser::{CursorAnchor, Segment};
use serde::{Deserialize, Serialize};

/// Arrow-key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Left,
    Right,
}

/// An anchor resolved to a text segment index and a clamped offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAnchor {
    pub index: usize,
    pub offset: usize,
}

/// Resolve an anchor against `segments`
///
/// Anchors naming a missing segment or a variable fall back to the end of
/// the last text segment. Offsets past the end are clamped. Returns `None`
/// only when there is no text segment at all.
pub fn resolve(segments: &[Segment], anchor: &CursorAnchor) -> Option<ResolvedAnchor> {
    let found = segments
        .iter()
        .position(|s| s.id == anchor.segment_id && s.is_text());

    match found {
        Some(index) => Some(ResolvedAnchor {
            index,
            offset: anchor.offset.min(segments[index].char_len()),
        }),
        None => {
            let index = segments.iter().rposition(|s| s.is_text())?;
            tracing::trace!(segment_id = %anchor.segment_id, "anchor fell back to end of value");
            Some(ResolvedAnchor {
                index,
                offset: segments[index].char_len(),
            })
        }
    }
}

/// Normalized form of `anchor`, or the anchor itself when nothing resolves
pub fn resolve_anchor(segments: &[Segment], anchor: &CursorAnchor) -> CursorAnchor {
    match resolve(segments, anchor) {
        Some(resolved) => to_anchor(segments, resolved),
        None => anchor.clone(),
    }
}

fn to_anchor(segments: &[Segment], resolved: ResolvedAnchor) -> CursorAnchor {
    CursorAnchor::new(segments[resolved.index].id.clone(), resolved.offset)
}

/// Caret at the very start of the value
pub fn start_anchor(segments: &[Segment]) -> Option<CursorAnchor> {
    segments
        .iter()
        .find(|s| s.is_text())
        .map(|s| CursorAnchor::new(s.id.clone(), 0))
}

/// Caret at the very end of the value
pub fn end_anchor(segments: &[Segment]) -> Option<CursorAnchor> {
    segments
        .iter()
        .rev()
        .find(|s| s.is_text())
        .map(|s| CursorAnchor::new(s.id.clone(), s.char_len()))
}

/// Move the caret one step, skipping over variables as a unit
pub fn step(segments: &[Segment], anchor: &CursorAnchor, direction: Direction) -> CursorAnchor {
    let Some(current) = resolve(segments, anchor) else {
        return anchor.clone();
    };

    let len = segments[current.index].char_len();
    let next = match direction {
        Direction::Left if current.offset > 0 => Some(ResolvedAnchor {
            offset: current.offset - 1,
            ..current
        }),
        Direction::Right if current.offset < len => Some(ResolvedAnchor {
            offset: current.offset + 1,
            ..current
        }),
        Direction::Left => segments[..current.index]
            .iter()
            .rposition(|s| s.is_text())
            .map(|index| ResolvedAnchor {
                index,
                offset: segments[index].char_len(),
            }),
        Direction::Right => segments[current.index + 1..]
            .iter()
            .position(|s| s.is_text())
            .map(|pos| ResolvedAnchor {
                index: current.index + 1 + pos,
                offset: 0,
            }),
    };

    to_anchor(segments, next.unwrap_or(current))
}

/// Character offset of the caret within the stored flat value
pub fn flat_offset(segments: &[Segment], anchor: &CursorAnchor) -> usize {
    let Some(resolved) = resolve(segments, anchor) else {
        return 0;
    };

    let preceding: usize = segments[..resolved.index].iter().map(stored_len).sum();
    preceding + resolved.offset
}

/// Anchor for a character offset into the stored flat value
///
/// Offsets that fall inside a variable's `{name}` land right after it.
pub fn anchor_at_flat_offset(segments: &[Segment], offset: usize) -> Option<CursorAnchor> {
    let mut remaining = offset;

    for segment in segments {
        let len = stored_len(segment);
        if segment.is_text() && remaining <= len {
            return Some(CursorAnchor::new(segment.id.clone(), remaining));
        }
        if segment.is_variable() && remaining < len {
            remaining = 0;
            continue;
        }
        remaining -= len.min(remaining);
    }

    end_anchor(segments)
}

/// Length of a segment in the stored flat value
fn stored_len(segment: &Segment) -> usize {
    if segment.is_variable() {
        segment.char_len() + 2
    } else {
        segment.char_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polaris_parser::parse;

    #[test]
    fn test_resolve_missing_anchor_defaults_to_end() {
        let segments = parse("A {date} B");
        let anchor = resolve_anchor(&segments, &CursorAnchor::new("missing", 0));
        assert_eq!(anchor, CursorAnchor::new(segments[2].id.clone(), 2));
    }

    #[test]
    fn test_resolve_variable_anchor_defaults_to_end() {
        let segments = parse("A {date} B");
        let anchor = resolve_anchor(&segments, &CursorAnchor::new(segments[1].id.clone(), 0));
        assert_eq!(anchor.segment_id, segments[2].id);
    }

    #[test]
    fn test_resolve_clamps_offset() {
        let segments = parse("abc");
        let anchor = resolve_anchor(&segments, &CursorAnchor::new(segments[0].id.clone(), 10));
        assert_eq!(anchor.offset, 3);
    }

    #[test]
    fn test_step_skips_variable() {
        let segments = parse("A {date} B");
        let at_join = CursorAnchor::new(segments[2].id.clone(), 0);

        let left = step(&segments, &at_join, Direction::Left);
        assert_eq!(left, CursorAnchor::new(segments[0].id.clone(), 2));

        let right = step(&segments, &left, Direction::Right);
        assert_eq!(right, at_join);
    }

    #[test]
    fn test_step_stops_at_edges() {
        let segments = parse("ab");
        let start = start_anchor(&segments).unwrap();
        assert_eq!(step(&segments, &start, Direction::Left), start);

        let end = end_anchor(&segments).unwrap();
        assert_eq!(step(&segments, &end, Direction::Right), end);
    }

    #[test]
    fn test_step_does_not_mutate() {
        let segments = parse("{a}{b}");
        let before = segments.clone();
        let anchor = end_anchor(&segments).unwrap();
        let _ = step(&segments, &anchor, Direction::Left);
        assert_eq!(segments, before);
    }

    #[test]
    fn test_flat_offset_roundtrip() {
        let segments = parse("A {date} B");
        let anchor = CursorAnchor::new(segments[2].id.clone(), 1);
        assert_eq!(flat_offset(&segments, &anchor), 9);
        assert_eq!(anchor_at_flat_offset(&segments, 9), Some(anchor));
    }

    #[test]
    fn test_flat_offset_inside_variable_lands_after_it() {
        let segments = parse("A {date} B");
        let anchor = anchor_at_flat_offset(&segments, 4).unwrap();
        assert_eq!(anchor, CursorAnchor::new(segments[2].id.clone(), 0));
    }
}
