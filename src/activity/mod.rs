//! Persisted log of saved texts.
//!
//! The activity log keeps the most recent texts produced by each kind of
//! session (main editor, lyric editor, voice capture), newest first, and
//! mirrors them into a [`KeyValueStore`] as JSON. Stored data that cannot be
//! read or parsed is treated as an empty log; persistence failures are logged
//! and never interrupt editing.
//!
//! # Examples
//!
//! ```
//! use textfmt::activity::{ActivityLog, EntryKind, MemoryStore};
//!
//! let mut log = ActivityLog::open(MemoryStore::new());
//! log.record("first draft", EntryKind::Editor);
//! log.record("la la la", EntryKind::GeneratedLyric);
//!
//! assert_eq!(log.len(), 2);
//! assert_eq!(log.entries()[0].text, "la la la");
//! assert_eq!(log.search("DRAFT").len(), 1);
//! ```

mod debounce;
mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use debounce::{DebouncedRecorder, RecorderOptions};
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Default number of retained entries.
pub const DEFAULT_LOG_CAPACITY: usize = 50;

/// Default storage key.
pub const DEFAULT_STORAGE_KEY: &str = "text-formatter-history";

/// Which kind of session produced a text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// The main text editor.
    Editor,
    /// The lyric editor.
    #[serde(rename = "suno")]
    GeneratedLyric,
    /// Speech-to-text capture.
    Voice,
}

/// One saved text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub text: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Leading slice of `text` for list display.
    pub preview: String,
}

/// Activity log configuration.
#[derive(Clone, Debug)]
pub struct ActivityLogOptions {
    /// Maximum number of entries; the oldest are dropped first.
    pub capacity: usize,
    /// Key the log is stored under.
    pub storage_key: String,
    /// Characters kept in [`LogEntry::preview`] before the `...` marker.
    pub preview_chars: usize,
}

impl Default for ActivityLogOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_LOG_CAPACITY,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            preview_chars: 100,
        }
    }
}

/// Bounded, newest-first log backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct ActivityLog<S> {
    store: S,
    entries: Vec<LogEntry>,
    options: ActivityLogOptions,
}

impl<S: KeyValueStore> ActivityLog<S> {
    /// Open the log with default options, loading any stored entries.
    pub fn open(store: S) -> Self {
        Self::with_options(store, ActivityLogOptions::default())
    }

    /// Open the log with custom options.
    pub fn with_options(store: S, options: ActivityLogOptions) -> Self {
        let entries = load_entries(&store, &options);
        Self {
            store,
            entries,
            options,
        }
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    #[must_use]
    pub fn options(&self) -> &ActivityLogOptions {
        &self.options
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save `text` stamped with the current time.
    pub fn record(&mut self, text: &str, kind: EntryKind) -> Option<&LogEntry> {
        self.record_at(text, kind, Utc::now())
    }

    /// Save `text` with an explicit timestamp.
    ///
    /// Blank text is ignored. Returns the new entry, or `None` when nothing
    /// was kept (blank text, or an entry older than everything in a full log).
    pub fn record_at(&mut self, text: &str, kind: EntryKind, at: DateTime<Utc>) -> Option<&LogEntry> {
        if text.trim().is_empty() {
            tracing::debug!(?kind, "skipping blank activity entry");
            return None;
        }

        let entry = LogEntry {
            id: self.next_id(at),
            text: text.to_string(),
            created_at: at,
            kind,
            preview: preview(text, self.options.preview_chars),
        };
        let idx = self.entries.partition_point(|e| e.created_at > at);
        self.entries.insert(idx, entry);
        self.entries.truncate(self.options.capacity);
        self.persist();
        self.entries.get(idx)
    }

    /// Delete one entry.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(idx) = self.entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        self.entries.remove(idx);
        self.persist();
        true
    }

    /// Delete every entry and the stored copy.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(err) = self.store.remove(&self.options.storage_key) {
            tracing::error!(key = %self.options.storage_key, error = %err, "failed to clear activity log");
        }
    }

    /// Entries whose text or preview contains `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&LogEntry> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                entry.text.to_lowercase().contains(&query)
                    || entry.preview.to_lowercase().contains(&query)
            })
            .collect()
    }

    fn next_id(&self, at: DateTime<Utc>) -> String {
        let millis = at.timestamp_millis();
        let mut id = millis.to_string();
        let mut suffix = 0u32;
        while self.get(&id).is_some() {
            suffix += 1;
            id = format!("{millis}-{suffix}");
        }
        id
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(crate::Error::from)
            .and_then(|json| self.store.set(&self.options.storage_key, &json));
        if let Err(err) = result {
            tracing::error!(key = %self.options.storage_key, error = %err, "failed to persist activity log");
        }
    }
}

fn load_entries<S: KeyValueStore>(store: &S, options: &ActivityLogOptions) -> Vec<LogEntry> {
    let raw = match store.get(&options.storage_key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(key = %options.storage_key, error = %err, "activity log unreadable, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<LogEntry>>(&raw) {
        Ok(mut entries) => {
            entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            entries.truncate(options.capacity);
            entries
        }
        Err(err) => {
            tracing::warn!(key = %options.storage_key, error = %err, "activity log corrupt, starting empty");
            Vec::new()
        }
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let mut preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        preview.push_str("...");
    }
    preview
}
