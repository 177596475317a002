//! Error types for the editor

use polaris_parser::SegmentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Content type already registered: {0}")]
    DuplicateContentType(String),

    #[error("Unknown content type: {0}")]
    UnknownContentType(String),

    #[error("Unknown suggestion value: {0}")]
    UnknownSuggestion(String),

    #[error("Invalid segments: {0}")]
    Segments(#[from] SegmentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
