use crate::ast::{Segment, SegmentKind};
use crate::id_generator::IdGenerator;

/// How variable segments are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// `{name}`: the stored flat value
    #[default]
    Stored,
    /// Bare `name`
    Plain,
    /// The variable's display label
    Display,
}

/// Serializer converts segments back to a flat string
///
/// The stored projection is the inverse of [`crate::parse`]: text segments
/// are emitted verbatim and variables as `{rawValue}`, with no separators.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    projection: Projection,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projection(projection: Projection) -> Self {
        Self { projection }
    }

    pub fn serialize(&self, segments: &[Segment]) -> String {
        let mut output = String::new();

        for segment in segments {
            match (segment.kind, self.projection) {
                (SegmentKind::Text, _) => output.push_str(&segment.raw_value),
                (SegmentKind::Variable, Projection::Stored) => {
                    output.push('{');
                    output.push_str(&segment.raw_value);
                    output.push('}');
                }
                (SegmentKind::Variable, Projection::Plain) => {
                    output.push_str(&segment.raw_value)
                }
                (SegmentKind::Variable, Projection::Display) => {
                    output.push_str(&segment.display_value)
                }
            }
        }

        output
    }
}

/// Serialize segments to the stored flat value
pub fn serialize(segments: &[Segment]) -> String {
    Serializer::new().serialize(segments)
}

/// Render variables as bare names
pub fn plain_text(segments: &[Segment]) -> String {
    Serializer::with_projection(Projection::Plain).serialize(segments)
}

/// Render variables by their display labels
pub fn display_text(segments: &[Segment]) -> String {
    Serializer::with_projection(Projection::Display).serialize(segments)
}

/// Merge-normalize a segment list into canonical form
///
/// Adjacent text segments merge into the first one (keeping its id). Empty
/// text segments are inserted at both ends and between adjacent variables.
/// Variables with an empty or brace-bearing body become literal text.
pub fn normalize(segments: Vec<Segment>, ids: &mut IdGenerator) -> Vec<Segment> {
    let mut output: Vec<Segment> = Vec::with_capacity(segments.len() + 2);

    for segment in segments.into_iter().map(demote_invalid_variable) {
        let last_kind = output.last().map(|s| s.kind);
        match (last_kind, segment.kind) {
            (Some(SegmentKind::Text), SegmentKind::Text) => {
                if let Some(last) = output.last_mut() {
                    let merged = format!("{}{}", last.raw_value, segment.raw_value);
                    last.set_text(merged);
                }
            }
            (None | Some(SegmentKind::Variable), SegmentKind::Variable) => {
                output.push(Segment::text(ids.new_id(), ""));
                output.push(segment);
            }
            _ => output.push(segment),
        }
    }

    if output.last().map_or(true, |s| s.is_variable()) {
        output.push(Segment::text(ids.new_id(), ""));
    }

    output
}

fn demote_invalid_variable(segment: Segment) -> Segment {
    let body = &segment.raw_value;
    if segment.is_variable() && (body.is_empty() || body.contains(['{', '}'])) {
        let literal = format!("{{{}}}", body);
        return Segment::text(segment.id, literal);
    }
    segment
}

/// Structural equality ignoring ids
pub fn same_structure(a: &[Segment], b: &[Segment]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_content(y))
}
