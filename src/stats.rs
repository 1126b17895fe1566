//! Text statistics.

use regex::Regex;
use ropey::Rope;
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

/// Average silent reading speed used for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence regex"));
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph regex"));

/// Counts describing a buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextStats {
    /// User-perceived characters (grapheme clusters).
    pub characters: usize,
    pub characters_no_spaces: usize,
    /// Whitespace-separated tokens.
    pub words: usize,
    pub lines: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    /// Distinct words, compared lowercase.
    pub unique_words: usize,
    /// Estimated reading time, rounded up.
    pub reading_minutes: usize,
}

impl TextStats {
    /// Compute statistics for `text`.
    #[must_use]
    pub fn compute(text: &str) -> Self {
        let words = text.split_whitespace().count();
        let has_content = words > 0;

        let count_pieces = |regex: &Regex| {
            if has_content {
                regex
                    .split(text)
                    .filter(|piece| !piece.trim().is_empty())
                    .count()
            } else {
                0
            }
        };

        let unique_words = text
            .unicode_words()
            .map(str::to_lowercase)
            .collect::<HashSet<_>>()
            .len();

        Self {
            characters: text.graphemes(true).count(),
            characters_no_spaces: text
                .graphemes(true)
                .filter(|g| !g.chars().all(char::is_whitespace))
                .count(),
            words,
            lines: Rope::from_str(text).len_lines(),
            sentences: count_pieces(&SENTENCE_END),
            paragraphs: count_pieces(&PARAGRAPH_BREAK),
            unique_words,
            reading_minutes: words.div_ceil(WORDS_PER_MINUTE),
        }
    }
}
