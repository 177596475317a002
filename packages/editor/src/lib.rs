//! # Polaris Editor
//!
//! Editing engine for `{variable}` token fields.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: flat value ↔ segments               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Dispatch commands to the mutation engine │
//! │  - Track the caret as a segment anchor      │
//! │  - Match `@query` suggestions               │
//! │  - Undo/redo history                        │
//! │  - Arbitrate external vs internal writes    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: renders segments, restores the caret  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Flat value is the contract**: segments always serialize to it
//! 2. **Edits are total**: bad input is normalized, never rejected
//! 3. **Internal writes win**: external values wait until the session settles
//!
//! ## Usage
//!
//! ```rust
//! use polaris_editor::{Command, EditSession, EditorConfig};
//! use polaris_parser::SuggestionCandidate;
//!
//! let mut session = EditSession::new("title", "Hello ", EditorConfig::default())
//!     .with_candidates(vec![SuggestionCandidate::new("Date", "date")]);
//!
//! session.dispatch(Command::InsertText { text: "@da".into() });
//! let result = session.select_suggestion("date").unwrap();
//!
//! assert_eq!(result.value, "Hello {date} ");
//! assert_eq!(session.plain_text(), "Hello date ");
//! session.settle();
//! ```

mod command;
mod config;
mod errors;
mod mutations;
pub mod navigation;
mod registry;
mod session;
mod sortable;
pub mod suggestions;
mod undo_stack;

pub use command::Command;
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use errors::EditorError;
pub use mutations::{Edit, EditOutcome, MutationEngine};
pub use navigation::Direction;
pub use registry::{ContentType, ContentTypeRegistry};
pub use session::{DispatchResult, EditSession, SyncOutcome};
pub use sortable::SortableSelection;
pub use suggestions::{SuggestionMatch, SuggestionMatcher};
pub use undo_stack::{HistoryEntry, Snapshot, UndoStack};
