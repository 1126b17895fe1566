//! Trailing-edge debounce between session commits and the activity log.
//!
//! Commits arrive on every edit; writing each one to storage would churn the
//! log with near-duplicates. The recorder keeps only the latest snapshot per
//! [`EntryKind`] and hands it to the log once no newer commit has arrived for
//! the configured delay. Time is supplied by the caller, so the recorder is
//! driven from the same event loop as every other operation.

use super::{ActivityLog, EntryKind, KeyValueStore};
use std::time::{Duration, Instant};

/// Recorder configuration.
#[derive(Clone, Copy, Debug)]
pub struct RecorderOptions {
    /// Quiet period after the last commit before it is saved.
    pub delay: Duration,
}

impl Default for RecorderOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(1),
        }
    }
}

#[derive(Clone, Debug)]
struct Pending {
    kind: EntryKind,
    text: String,
    due: Instant,
}

/// Batches commits per entry kind and flushes them into an [`ActivityLog`].
#[derive(Clone, Debug, Default)]
pub struct DebouncedRecorder {
    options: RecorderOptions,
    pending: Vec<Pending>,
}

impl DebouncedRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: RecorderOptions) -> Self {
        Self {
            options,
            pending: Vec::new(),
        }
    }

    /// Schedule `text`, replacing any pending snapshot of the same kind and
    /// restarting its delay.
    pub fn note(&mut self, text: &str, kind: EntryKind, now: Instant) {
        let due = now + self.options.delay;
        if let Some(pending) = self.pending.iter_mut().find(|p| p.kind == kind) {
            pending.text = text.to_string();
            pending.due = due;
        } else {
            self.pending.push(Pending {
                kind,
                text: text.to_string(),
                due,
            });
        }
    }

    #[must_use]
    pub fn is_pending(&self, kind: EntryKind) -> bool {
        self.pending.iter().any(|p| p.kind == kind)
    }

    /// Earliest instant at which [`poll`](Self::poll) will flush something.
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Record every snapshot whose delay has elapsed. Returns how many were
    /// handed to the log.
    pub fn poll<S: KeyValueStore>(&mut self, now: Instant, log: &mut ActivityLog<S>) -> usize {
        self.drain(log, |p| p.due <= now)
    }

    /// Record every pending snapshot immediately.
    pub fn flush<S: KeyValueStore>(&mut self, log: &mut ActivityLog<S>) -> usize {
        self.drain(log, |_| true)
    }

    fn drain<S, F>(&mut self, log: &mut ActivityLog<S>, ready: F) -> usize
    where
        S: KeyValueStore,
        F: Fn(&Pending) -> bool,
    {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|p| ready(p));
        self.pending = waiting;
        due.sort_by_key(|p| p.due);
        for pending in &due {
            log.record(&pending.text, pending.kind);
        }
        due.len()
    }
}
