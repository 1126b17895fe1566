//! Literal, case-insensitive search and replace.
//!
//! Search terms are always treated as plain text: every regex metacharacter
//! is escaped before matching, so a term like `a.b` or `(x)` can never change
//! what is matched or fail to compile. Casing follows Unicode simple case
//! folding, independent of locale.

use regex::{NoExpand, Regex, RegexBuilder};

/// Result of a search-and-replace request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// Every occurrence was replaced.
    Replaced { text: String, count: usize },
    /// The search term was empty or only whitespace; nothing was done.
    EmptyTerm,
    /// The term does not occur in the text; nothing was done.
    NoMatches,
}

impl ReplaceOutcome {
    /// Number of replaced occurrences (zero for the no-op outcomes).
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Replaced { count, .. } => *count,
            Self::EmptyTerm | Self::NoMatches => 0,
        }
    }

    #[must_use]
    pub fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced { .. })
    }
}

/// Compiled-size budget granted per byte of search term. Case-insensitive
/// literals expand every cased character into a class, so the default regex
/// size limits reject terms of a few tens of kilobytes.
const SIZE_LIMIT_PER_TERM_BYTE: usize = 4 * 1024;

/// Size limit used for short terms.
const MIN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A blank term never matches anything.
fn is_blank(term: &str) -> bool {
    term.trim().is_empty()
}

fn literal_matcher(term: &str) -> Option<Regex> {
    if is_blank(term) {
        return None;
    }
    let limit = term
        .len()
        .saturating_mul(SIZE_LIMIT_PER_TERM_BYTE)
        .max(MIN_SIZE_LIMIT);
    match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .size_limit(limit)
        .dfa_size_limit(limit)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(err) => {
            // The limit scales with the term, so this needs a term too large
            // to compile in memory at all.
            tracing::error!(term_len = term.len(), error = %err, "search term rejected");
            None
        }
    }
}

/// Count non-overlapping, case-insensitive literal occurrences of `term`.
#[must_use]
pub fn count_occurrences(text: &str, term: &str) -> usize {
    literal_matcher(term).map_or(0, |regex| regex.find_iter(text).count())
}

/// Replace every case-insensitive literal occurrence of `term`.
///
/// `replacement` is inserted verbatim; `$` sequences are not expanded.
#[must_use]
pub fn replace_all(text: &str, term: &str, replacement: &str) -> ReplaceOutcome {
    if is_blank(term) {
        return ReplaceOutcome::EmptyTerm;
    }
    let Some(regex) = literal_matcher(term) else {
        return ReplaceOutcome::NoMatches;
    };
    let count = regex.find_iter(text).count();
    if count == 0 {
        return ReplaceOutcome::NoMatches;
    }
    ReplaceOutcome::Replaced {
        text: regex.replace_all(text, NoExpand(replacement)).into_owned(),
        count,
    }
}

/// The most recent successful replace, kept for one-step rollback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LastReplace {
    /// Buffer text before the replace.
    pub original: String,
    /// Number of occurrences that were replaced.
    pub count: usize,
}

/// Holds at most one [`LastReplace`].
///
/// This is separate from the undo history: recording overwrites any previous
/// record and [`take`](Self::take) consumes it.
#[derive(Clone, Debug, Default)]
pub struct ReplaceTracker {
    last: Option<LastReplace>,
}

impl ReplaceTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a replace, superseding the previous one.
    pub fn record(&mut self, original: impl Into<String>, count: usize) {
        self.last = Some(LastReplace {
            original: original.into(),
            count,
        });
    }

    #[must_use]
    pub fn last(&self) -> Option<&LastReplace> {
        self.last.as_ref()
    }

    /// Consume the record.
    pub fn take(&mut self) -> Option<LastReplace> {
        self.last.take()
    }
}
