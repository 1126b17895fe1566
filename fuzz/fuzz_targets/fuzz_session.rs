//! Fuzz target for edit sessions.
//!
//! Drives a session with arbitrary edits and checks the history bounds.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textfmt::{DEFAULT_HISTORY_CAPACITY, EditSession, EntryKind, Rule};

#[derive(Arbitrary, Debug)]
enum Action {
    SetText(String),
    Apply(u8),
    Replace { term: String, replacement: String },
    UndoReplace,
    Undo,
    Redo,
}

fuzz_target!(|actions: Vec<Action>| {
    let mut session = EditSession::new(EntryKind::Editor);
    for action in actions {
        match action {
            Action::SetText(text) => {
                session.set_text(text);
            }
            Action::Apply(idx) => {
                let rule = Rule::ALL[usize::from(idx) % Rule::ALL.len()];
                session.apply_rule(rule);
            }
            Action::Replace { term, replacement } => {
                session.replace_all(&term, &replacement);
            }
            Action::UndoReplace => {
                session.undo_replace();
            }
            Action::Undo => {
                session.undo();
            }
            Action::Redo => {
                session.redo();
            }
        }
        let history = session.history();
        assert!(history.len() <= DEFAULT_HISTORY_CAPACITY);
        assert!(history.cursor() < history.len());
    }
});
