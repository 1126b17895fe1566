//! Editing session: one text buffer with history, rules and replace rollback.
//!
//! An [`EditSession`] is the unit the rest of the crate plugs into. Each open
//! buffer (main editor, lyric editor, voice capture) owns its own session, and
//! every change to the buffer goes through [`EditSession::set_text`], which
//! commits to the session's [`HistoryStore`] and notifies the commit hook.
//!
//! # Examples
//!
//! ```
//! use textfmt::{EditSession, EntryKind, Rule};
//!
//! let mut session = EditSession::new(EntryKind::Editor);
//! session.set_text("  **Hello**   world  ");
//! session.apply_rule(Rule::StripMarkdown);
//! assert_eq!(session.text(), "Hello world");
//!
//! session.undo();
//! assert_eq!(session.text(), "  **Hello**   world  ");
//! ```

use crate::activity::EntryKind;
use crate::collab::{Clipboard, FileExporter};
use crate::error::Result;
use crate::history::{DEFAULT_HISTORY_CAPACITY, HistoryStore};
use crate::search::{self, LastReplace, ReplaceOutcome, ReplaceTracker};
use crate::stats::TextStats;
use crate::transform::{Rule, Transform};
use std::fmt;

/// Callback invoked after every successful commit with the new text and the
/// session kind.
pub type CommitHook = Box<dyn FnMut(&str, EntryKind)>;

/// Session configuration.
#[derive(Clone, Copy, Debug)]
pub struct SessionOptions {
    /// Maximum number of snapshots kept for undo.
    pub history_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// A text buffer with bounded undo history and one-step replace rollback.
pub struct EditSession {
    kind: EntryKind,
    history: HistoryStore,
    last_replace: ReplaceTracker,
    on_commit: Option<CommitHook>,
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("kind", &self.kind)
            .field("history", &self.history)
            .field("last_replace", &self.last_replace)
            .field("on_commit", &self.on_commit.is_some())
            .finish()
    }
}

impl EditSession {
    /// Create an empty session.
    #[must_use]
    pub fn new(kind: EntryKind) -> Self {
        Self::with_options(kind, SessionOptions::default())
    }

    /// Create an empty session with custom options.
    #[must_use]
    pub fn with_options(kind: EntryKind, options: SessionOptions) -> Self {
        Self {
            kind,
            history: HistoryStore::with_capacity("", options.history_capacity),
            last_replace: ReplaceTracker::new(),
            on_commit: None,
        }
    }

    /// Install the callback notified after each commit.
    #[must_use]
    pub fn with_commit_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&str, EntryKind) + 'static,
    {
        self.on_commit = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Current buffer text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.history.current()
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Commit new buffer text.
    ///
    /// Returns `false` if the text is unchanged.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        if !self.history.commit(text) {
            return false;
        }
        if let Some(hook) = self.on_commit.as_mut() {
            hook(self.history.current(), self.kind);
        }
        true
    }

    /// Apply a transform to the buffer and commit the result.
    pub fn apply(&mut self, transform: &Transform) -> bool {
        let next = transform.apply(self.text());
        let changed = self.set_text(next);
        if !changed {
            tracing::debug!(?transform, "transform left text unchanged");
        }
        changed
    }

    /// Apply a catalog rule.
    pub fn apply_rule(&mut self, rule: Rule) -> bool {
        self.apply(&Transform::Rule(rule))
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Empty the buffer (undoable).
    pub fn clear(&mut self) -> bool {
        self.set_text(String::new())
    }

    /// Append a dictated fragment, separated by one space from existing text.
    pub fn append_fragment(&mut self, fragment: &str) -> bool {
        let next = if self.text().is_empty() {
            fragment.to_string()
        } else {
            format!("{} {fragment}", self.text())
        };
        self.set_text(next)
    }

    /// Replace the buffer with the clipboard contents.
    ///
    /// If the clipboard refuses access the error is returned for the caller to
    /// surface and the buffer is left untouched.
    pub fn paste_from(&mut self, clipboard: &mut dyn Clipboard) -> Result<bool> {
        match clipboard.read_text() {
            Ok(text) => Ok(self.set_text(text)),
            Err(err) => {
                tracing::warn!(error = %err, "paste failed, buffer unchanged");
                Err(err)
            }
        }
    }

    /// Copy the buffer to the clipboard.
    pub fn copy_to(&self, clipboard: &mut dyn Clipboard) -> Result<()> {
        clipboard.write_text(self.text()).inspect_err(|err| {
            tracing::warn!(error = %err, "copy failed");
        })
    }

    /// Export the buffer as a file.
    pub fn export(&self, exporter: &mut dyn FileExporter, filename: &str) -> Result<()> {
        exporter.export(self.text(), filename)
    }

    /// Replace every case-insensitive literal occurrence of `term`.
    ///
    /// On success the pre-replace text is retained so that
    /// [`undo_replace`](Self::undo_replace) can restore it, superseding any
    /// earlier retained replace.
    pub fn replace_all(&mut self, term: &str, replacement: &str) -> ReplaceOutcome {
        let outcome = search::replace_all(self.text(), term, replacement);
        match &outcome {
            ReplaceOutcome::Replaced { text, count } => {
                self.last_replace.record(self.history.current(), *count);
                self.set_text(text.clone());
                tracing::debug!(count, "replaced occurrences");
            }
            ReplaceOutcome::EmptyTerm | ReplaceOutcome::NoMatches => {
                tracing::debug!(?outcome, "replace skipped");
            }
        }
        outcome
    }

    /// Restore the text from before the last replace and forget it.
    ///
    /// The restore is an ordinary commit, so it can itself be undone.
    pub fn undo_replace(&mut self) -> bool {
        let Some(last) = self.last_replace.take() else {
            return false;
        };
        self.set_text(last.original);
        true
    }

    /// The replace that [`undo_replace`](Self::undo_replace) would reverse.
    #[must_use]
    pub fn last_replace(&self) -> Option<&LastReplace> {
        self.last_replace.last()
    }

    /// Count occurrences of `term` in the buffer.
    #[must_use]
    pub fn count_occurrences(&self, term: &str) -> usize {
        search::count_occurrences(self.text(), term)
    }

    #[must_use]
    pub fn stats(&self) -> TextStats {
        TextStats::compute(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{MemoryClipboard, MemoryExporter};
    use crate::error::Error;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_apply_rule_commits() {
        let mut session = EditSession::new(EntryKind::Editor);
        session.set_text("  Hello    World  ");
        assert!(session.apply_rule(Rule::CollapseWhitespace));
        assert_eq!(session.text(), "Hello World");
        assert_eq!(session.history().len(), 3);

        // Already collapsed: no new snapshot.
        assert!(!session.apply_rule(Rule::CollapseWhitespace));
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn test_commit_hook_receives_text_and_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut session = EditSession::new(EntryKind::Voice)
            .with_commit_hook(move |text, kind| sink.borrow_mut().push((text.to_string(), kind)));

        session.set_text("a");
        session.set_text("a");
        session.undo();
        // Uppercasing the now-empty buffer changes nothing and commits nothing.
        session.apply_rule(Rule::Uppercase);
        session.set_text("b");

        assert_eq!(
            *seen.borrow(),
            vec![
                ("a".to_string(), EntryKind::Voice),
                ("b".to_string(), EntryKind::Voice)
            ]
        );
    }

    #[test]
    fn test_append_fragment() {
        let mut session = EditSession::new(EntryKind::Voice);
        session.append_fragment("hello");
        session.append_fragment("world");
        assert_eq!(session.text(), "hello world");
    }

    #[test]
    fn test_replace_and_undo_replace() {
        let mut session = EditSession::new(EntryKind::Editor);
        session.set_text("cat CAT Cat");

        let outcome = session.replace_all("cat", "dog");
        assert_eq!(outcome.count(), 3);
        assert_eq!(session.text(), "dog dog dog");
        assert_eq!(session.last_replace().map(|l| l.count), Some(3));

        assert!(session.undo_replace());
        assert_eq!(session.text(), "cat CAT Cat");
        assert!(session.last_replace().is_none());
        assert!(!session.undo_replace());
    }

    #[test]
    fn test_undo_replace_skips_intermediate_edits() {
        let mut session = EditSession::new(EntryKind::Editor);
        session.set_text("one two");
        session.replace_all("one", "1");
        session.apply_rule(Rule::Uppercase);
        session.apply_rule(Rule::StripDigits);

        assert!(session.undo_replace());
        assert_eq!(session.text(), "one two");
        // The rollback itself is undoable through history.
        assert!(session.undo());
        assert_eq!(session.text(), "TWO");
    }

    #[test]
    fn test_new_replace_supersedes_previous() {
        let mut session = EditSession::new(EntryKind::Editor);
        session.set_text("a b");
        session.replace_all("a", "x");
        session.replace_all("b", "y");
        assert!(session.undo_replace());
        assert_eq!(session.text(), "x b");
    }

    #[test]
    fn test_failed_replace_keeps_record() {
        let mut session = EditSession::new(EntryKind::Editor);
        session.set_text("a b");
        session.replace_all("a", "x");
        assert_eq!(session.replace_all("zzz", "y"), ReplaceOutcome::NoMatches);
        assert_eq!(session.replace_all("", "y"), ReplaceOutcome::EmptyTerm);
        assert_eq!(session.last_replace().map(|l| l.original.as_str()), Some("a b"));
    }

    #[test]
    fn test_paste_denied_leaves_buffer() {
        let mut session = EditSession::new(EntryKind::Editor);
        session.set_text("keep");
        let mut clipboard = MemoryClipboard::with_text("incoming");
        clipboard.set_denied(true);

        let result = session.paste_from(&mut clipboard);
        assert!(matches!(result, Err(Error::ClipboardDenied(_))));
        assert_eq!(session.text(), "keep");

        clipboard.set_denied(false);
        assert!(session.paste_from(&mut clipboard).unwrap());
        assert_eq!(session.text(), "incoming");
    }

    #[test]
    fn test_copy_and_export() {
        let mut session = EditSession::new(EntryKind::Editor);
        session.set_text("body");

        let mut clipboard = MemoryClipboard::new();
        session.copy_to(&mut clipboard).unwrap();
        assert_eq!(clipboard.contents(), "body");

        let mut exporter = MemoryExporter::new();
        session.export(&mut exporter, "notes.txt").unwrap();
        assert_eq!(exporter.files()[0].0, "notes.txt");
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut session = EditSession::new(EntryKind::Editor);
        session.set_text("text");
        assert!(session.clear());
        assert_eq!(session.text(), "");
        session.undo();
        assert_eq!(session.text(), "text");
    }

    #[test]
    fn test_custom_history_capacity() {
        let mut session = EditSession::with_options(
            EntryKind::Editor,
            SessionOptions {
                history_capacity: 2,
            },
        );
        session.set_text("a");
        session.set_text("b");
        assert_eq!(session.history().len(), 2);
        assert!(session.undo());
        assert!(!session.undo());
        assert_eq!(session.text(), "a");
    }
}
