//! # Polaris Parser
//!
//! Tokenizer and serializer for token field values such as
//! `"Published on {post_date} by {author}"`.
//!
//! ```rust
//! use polaris_parser::{parse, serialize};
//!
//! let segments = parse("Hello {name}!");
//! assert_eq!(segments.len(), 3);
//! assert_eq!(serialize(&segments), "Hello {name}!");
//! ```

pub mod ast;
pub mod error;
pub mod id_generator;
pub mod tokenizer;
pub mod parser;
pub mod serializer;

#[cfg(test)]
mod tests_serializer;

pub use ast::{
    byte_index, split_chars, validate, CursorAnchor, Segment, SegmentId, SegmentKind,
    SuggestionCandidate,
};
pub use error::{SegmentError, SegmentResult};
pub use id_generator::{get_field_id, IdGenerator};
pub use tokenizer::{tokenize, Token};
pub use parser::{parse, parse_with_ids, Parser};
pub use serializer::{
    display_text, normalize, plain_text, same_structure, serialize, Projection, Serializer,
};
