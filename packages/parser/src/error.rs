use thiserror::Error;

pub type SegmentResult<T> = Result<T, SegmentError>;

/// Violations of the canonical segment layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("Segment list is empty")]
    Empty,

    #[error("Segment list must start with a text segment")]
    MissingLeadingText,

    #[error("Segment list must end with a text segment")]
    MissingTrailingText,

    #[error("Adjacent text segments at {index}")]
    AdjacentText { index: usize },

    #[error("Adjacent variable segments at {index}")]
    AdjacentVariables { index: usize },

    #[error("Duplicate segment id: {0}")]
    DuplicateId(String),

    #[error("Invalid variable body in {id}: {body:?}")]
    InvalidVariable { id: String, body: String },
}
