//! `textfmt` - headless text-formatting engine
//!
//! A single text buffer manipulated through a fixed catalog of rewrite rules
//! (whitespace cleanup, Markdown stripping, case conversion, symbol removal,
//! literal search and replace), backed by a bounded linear undo history.
//! Around that core sit a persisted activity log, speech-capture plumbing and
//! a lyric editor. Host capabilities (clipboard, storage, file export) are
//! traits so the engine runs anywhere.
//!
//! # Examples
//!
//! ```
//! use textfmt::{EditSession, EntryKind, Rule};
//!
//! let mut session = EditSession::new(EntryKind::Editor);
//! session.set_text("cat CAT Cat");
//!
//! let outcome = session.replace_all("cat", "dog");
//! assert_eq!(outcome.count(), 3);
//! assert_eq!(session.text(), "dog dog dog");
//!
//! session.apply_rule(Rule::TitleCase);
//! assert_eq!(session.text(), "Dog Dog Dog");
//!
//! // Roll back the bulk replace directly, past the later edit.
//! session.undo_replace();
//! assert_eq!(session.text(), "cat CAT Cat");
//! ```

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // Allow activity::ActivityLog etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Events are consumed by value
#![allow(clippy::redundant_closure_for_method_calls)] // Closures read clearer in filters

pub mod activity;
pub mod collab;
pub mod error;
pub mod history;
pub mod lyrics;
pub mod search;
pub mod session;
pub mod stats;
pub mod transform;
pub mod voice;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryStore};
pub use search::{LastReplace, ReplaceOutcome, ReplaceTracker, count_occurrences, replace_all};
pub use session::{CommitHook, EditSession, SessionOptions};
pub use transform::{Rule, Transform};

// Re-export collaborator and peripheral types
pub use activity::{ActivityLog, EntryKind, LogEntry};
pub use collab::{Clipboard, FileExporter};
pub use lyrics::LyricEditor;
pub use stats::TextStats;
pub use voice::{SpeechCapture, SpeechEvent};
