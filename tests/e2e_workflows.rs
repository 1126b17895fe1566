//! End-to-end workflows across sessions, the debounced recorder and the
//! persisted activity log.
//!
//! Run with logging:
//!   `RUST_LOG=debug` cargo test --test `e2e_workflows` -- --nocapture

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use textfmt::activity::{ActivityLog, DebouncedRecorder, FileStore, KeyValueStore};
use textfmt::collab::{DirectoryExporter, MemoryClipboard};
use textfmt::lyrics::EXPORT_FILENAME;
use textfmt::{EditSession, EntryKind, Error, LyricEditor, Rule, SpeechCapture, SpeechEvent};
use tracing::{Level, info};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Sessions wired to one recorder and one file-backed log, with a manual clock.
struct Harness {
    _dir: TempDir,
    root: PathBuf,
    clock: Rc<Cell<Instant>>,
    recorder: Rc<RefCell<DebouncedRecorder>>,
    log: ActivityLog<FileStore>,
}

impl Harness {
    fn new() -> Self {
        init_logging();
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        Self {
            log: ActivityLog::open(FileStore::new(&root)),
            _dir: dir,
            root,
            clock: Rc::new(Cell::new(Instant::now())),
            recorder: Rc::new(RefCell::new(DebouncedRecorder::new())),
        }
    }

    fn session(&self, kind: EntryKind) -> EditSession {
        let recorder = Rc::clone(&self.recorder);
        let clock = Rc::clone(&self.clock);
        EditSession::new(kind).with_commit_hook(move |text, kind| {
            recorder.borrow_mut().note(text, kind, clock.get());
        })
    }

    fn advance(&self, by: Duration) {
        self.clock.set(self.clock.get() + by);
    }

    fn poll(&mut self) -> usize {
        self.recorder.borrow_mut().poll(self.clock.get(), &mut self.log)
    }

    fn flush(&mut self) -> usize {
        self.recorder.borrow_mut().flush(&mut self.log)
    }

    fn is_pending(&self, kind: EntryKind) -> bool {
        self.recorder.borrow().is_pending(kind)
    }
}

#[test]
fn test_e2e_edits_are_debounced_into_log() {
    let mut harness = Harness::new();
    let mut session = harness.session(EntryKind::Editor);

    session.set_text("  draft   one  ");
    harness.advance(Duration::from_millis(500));
    assert_eq!(harness.poll(), 0);

    assert!(session.apply_rule(Rule::CollapseWhitespace));
    harness.advance(Duration::from_millis(500));
    assert_eq!(harness.poll(), 0, "second edit restarts the delay");

    harness.advance(Duration::from_secs(1));
    assert_eq!(harness.poll(), 1);
    info!(entries = harness.log.len(), "editor snapshot recorded");

    let entry = &harness.log.entries()[0];
    assert_eq!(entry.text, "draft one");
    assert_eq!(entry.kind, EntryKind::Editor);
    assert_eq!(harness.log.len(), 1);

    // Navigation is not a commit.
    assert!(session.undo());
    assert!(!harness.is_pending(EntryKind::Editor));
    assert!(session.redo());
    assert!(!harness.is_pending(EntryKind::Editor));
}

#[test]
fn test_e2e_voice_and_lyrics_persist_across_reopen() {
    let mut harness = Harness::new();

    let mut voice = harness.session(EntryKind::Voice);
    let mut capture = SpeechCapture::new("en-US", true);
    assert!(capture.start());
    let interim = SpeechEvent::Transcript {
        fragment: "hel".to_string(),
        is_final: false,
    };
    assert!(!capture.deliver(interim, &mut voice));
    for fragment in ["hello world", " again "] {
        let event = SpeechEvent::Transcript {
            fragment: fragment.to_string(),
            is_final: true,
        };
        assert!(capture.deliver(event, &mut voice));
    }
    capture.handle(SpeechEvent::Ended);
    assert!(!capture.is_listening());
    assert_eq!(voice.text(), "hello world again");

    let mut lyrics = LyricEditor::new(harness.session(EntryKind::GeneratedLyric));
    lyrics.insert_tag("[Verse]");
    lyrics.insert_tag("[Chorus]");
    assert_eq!(lyrics.text(), "[Verse]\n[Chorus]\n");

    let mut exporter = DirectoryExporter::new(&harness.root);
    assert!(lyrics.export(&mut exporter).unwrap());
    let exported = fs::read_to_string(harness.root.join(EXPORT_FILENAME)).unwrap();
    assert_eq!(exported, "[Verse]\n[Chorus]\n");

    assert_eq!(harness.flush(), 2);
    assert!(harness.log.store().get(&harness.log.options().storage_key).unwrap().is_some());

    let reopened = ActivityLog::open(FileStore::new(&harness.root));
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.entries(), harness.log.entries());

    let voice_hits = reopened.search("HELLO");
    assert_eq!(voice_hits.len(), 1);
    assert_eq!(voice_hits[0].kind, EntryKind::Voice);

    let lyric_hits = reopened.search("[chorus]");
    assert_eq!(lyric_hits.len(), 1);
    assert_eq!(lyric_hits[0].kind, EntryKind::GeneratedLyric);
}

#[test]
fn test_e2e_clipboard_replace_and_rollback() {
    let mut harness = Harness::new();
    let mut session = harness.session(EntryKind::Editor);
    let mut clipboard = MemoryClipboard::with_text("The cat sat. THE CAT ran.");

    assert!(session.paste_from(&mut clipboard).unwrap());

    let outcome = session.replace_all("the cat", "a dog");
    assert_eq!(outcome.count(), 2);
    assert_eq!(session.text(), "a dog sat. a dog ran.");

    assert!(session.apply_rule(Rule::Uppercase));
    assert_eq!(session.text(), "A DOG SAT. A DOG RAN.");

    assert!(session.undo_replace());
    assert_eq!(session.text(), "The cat sat. THE CAT ran.");
    assert!(session.last_replace().is_none());

    session.copy_to(&mut clipboard).unwrap();
    assert_eq!(clipboard.contents(), "The cat sat. THE CAT ran.");

    clipboard.set_denied(true);
    let err = session.paste_from(&mut clipboard).unwrap_err();
    assert!(matches!(err, Error::ClipboardDenied(_)));
    assert_eq!(session.text(), "The cat sat. THE CAT ran.");

    assert_eq!(harness.flush(), 1);
    assert_eq!(harness.log.entries()[0].text, "The cat sat. THE CAT ran.");
}

#[test]
fn test_e2e_corrupt_log_starts_empty() {
    let harness = Harness::new();
    let path = harness.root.join("text-formatter-history.json");
    fs::write(&path, "{ not json").unwrap();

    let mut log = ActivityLog::open(FileStore::new(&harness.root));
    assert!(log.is_empty());

    assert!(log.record("recovered", EntryKind::Editor).is_some());
    let stored = fs::read_to_string(&path).unwrap();
    let parsed: Vec<textfmt::LogEntry> = serde_json::from_str(&stored).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].text, "recovered");
}
