//! Ordered rewrite pipelines.
//!
//! A rule is written as a slice of [`Step`]s that run strictly in sequence,
//! each step seeing the output of the previous one. Several steps assume an
//! earlier step already ran (emphasis stripping relies on fenced blocks being
//! gone, trimming relies on runs being collapsed), so the slices below must
//! not be reordered without re-checking the composed output.
//!
//! Steps that can stack (repeated line markers, nested links) consume the
//! whole stack in one pass, so a pipeline run to a fixpoint settles after a
//! small, input-independent number of passes.

use regex::Regex;
use std::borrow::Cow;

/// How a step rewrites its input.
#[derive(Clone, Copy, Debug)]
pub enum Action {
    /// Every match of `pattern` is replaced with `replacement`, which may
    /// reference capture groups (`${1}`).
    Replace {
        pattern: &'static str,
        replacement: &'static str,
    },
    /// A hand-written scanner for syntax a regex cannot match in one pass.
    Scan(fn(&str) -> Cow<'_, str>),
}

/// One rewrite in a pipeline.
#[derive(Clone, Copy, Debug)]
pub struct Step {
    pub action: Action,
    /// What the step removes or rewrites.
    pub intent: &'static str,
}

impl Step {
    const fn new(pattern: &'static str, replacement: &'static str, intent: &'static str) -> Self {
        Self {
            action: Action::Replace {
                pattern,
                replacement,
            },
            intent,
        }
    }

    const fn scan(scanner: fn(&str) -> Cow<'_, str>, intent: &'static str) -> Self {
        Self {
            action: Action::Scan(scanner),
            intent,
        }
    }
}

/// Runs of whitespace collapse to one space, then both ends are trimmed.
pub const COLLAPSE_WHITESPACE: &[Step] = &[
    Step::new(r"\s+", " ", "whitespace runs"),
    Step::new(r"^\s+|\s+$", "", "leading and trailing whitespace"),
];

pub const TRIM: &[Step] = &[Step::new(r"^\s+|\s+$", "", "leading and trailing whitespace")];

pub const HASHTAGS: &[Step] = &[Step::new(r"#\w+", "", "hashtags")];

/// Markdown syntax, outermost constructs first.
pub const MARKDOWN: &[Step] = &[
    Step::new(r"(?s)```.*?```", "", "fenced code blocks, contents included"),
    Step::new(r"\*\*(.*?)\*\*", "${1}", "bold with asterisks"),
    Step::new(r"__(.*?)__", "${1}", "bold with underscores"),
    Step::new(r"\*(.*?)\*", "${1}", "italic with asterisks"),
    Step::new(r"_(.*?)_", "${1}", "italic with underscores"),
    Step::new(r"`(.*?)`", "${1}", "inline code spans"),
    Step::new(
        r"(?m)^(?:[ \t]*(?:#+|>|[*+-]|[0-9]+\.)\s)+",
        "",
        "heading, quote and list markers, stacked markers included",
    ),
    Step::scan(unwrap_links, "links keep their label, nested links included"),
];

pub const PARENTHESES: &[Step] = &[Step::new(r"\([^)]*\)", "", "parenthesized spans")];

pub const BRACKETS: &[Step] = &[Step::new(r"\[[^\]]*\]", "", "bracketed spans")];

pub const BLANK_LINES: &[Step] = &[Step::new(r"\n\s*\n", "\n", "blank lines between lines")];

pub const PUNCTUATION: &[Step] = &[
    Step::new(
        r"([.!?])\s*(\p{Lu})",
        "${1} ${2}",
        "one space between a sentence end and the next capital",
    ),
    Step::new(r"([,;:])\s*", "${1} ", "one space after separators"),
    Step::new(r"\s+([.!?,:;])", "${1}", "whitespace before punctuation"),
];

pub const DIGITS: &[Step] = &[Step::new(r"[0-9]+", "", "digit runs")];

/// Replace every `[label](url)` with `label` in a single left-to-right scan.
///
/// The label must be non-empty and must not contain `]`; the url runs to the
/// first `)` and must be non-empty. Nested links resolve innermost first, so
/// `[[a](u)](v)` becomes `a` without another pass.
pub fn unwrap_links(text: &str) -> Cow<'_, str> {
    if !text.contains("](") {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    // Offsets in `out` of `[` that may still open a link.
    let mut open: Vec<usize> = Vec::new();
    // Offsets in `out` of `[` belonging to unwrapped links.
    let mut dropped: Vec<usize> = Vec::new();
    // Cached position of the next `)`, so the url search never rescans.
    let mut close = 0;
    let mut no_close = false;

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'[' => {
                open.push(out.len());
                out.push('[');
                i += 1;
            }
            b']' => {
                let mut url_end = None;
                if bytes.get(i + 1) == Some(&b'(') && !no_close {
                    if close < i + 2 {
                        match text[i + 2..].find(')') {
                            Some(offset) => close = i + 2 + offset,
                            None => no_close = true,
                        }
                    }
                    if !no_close && close > i + 2 {
                        url_end = Some(close);
                    }
                }
                match (open.last().copied(), url_end) {
                    (Some(start), Some(end)) if out.len() > start + 1 => {
                        open.pop();
                        dropped.push(start);
                        i = end + 1;
                    }
                    _ => {
                        // A `]` that closes no link can't sit inside a label.
                        open.clear();
                        out.push(']');
                        i += 1;
                    }
                }
            }
            _ => {
                let next = text[i..].find(['[', ']']).map_or(text.len(), |offset| i + offset);
                out.push_str(&text[i..next]);
                i = next;
            }
        }
    }

    if dropped.is_empty() {
        return Cow::Borrowed(text);
    }
    dropped.sort_unstable();
    let mut result = String::with_capacity(out.len());
    let mut from = 0;
    for at in dropped {
        result.push_str(&out[from..at]);
        from = at + 1;
    }
    result.push_str(&out[from..]);
    Cow::Owned(result)
}

#[derive(Clone, Debug)]
enum Stage {
    Regex(Regex, &'static str),
    Scan(fn(&str) -> Cow<'_, str>),
}

/// A compiled sequence of steps.
#[derive(Clone, Debug)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Compile `steps` in order.
    ///
    /// # Panics
    ///
    /// Panics if a step pattern is not a valid regex. Patterns are static
    /// literals and are covered by tests.
    #[must_use]
    pub fn new(steps: &[Step]) -> Self {
        Self { stages: Vec::new() }.then(steps)
    }

    /// Append more steps after the existing ones.
    #[must_use]
    pub fn then(mut self, steps: &[Step]) -> Self {
        self.stages.extend(steps.iter().map(|step| match step.action {
            Action::Replace {
                pattern,
                replacement,
            } => {
                let regex = Regex::new(pattern)
                    .unwrap_or_else(|e| panic!("invalid pattern for {}: {e}", step.intent));
                Stage::Regex(regex, replacement)
            }
            Action::Scan(scanner) => Stage::Scan(scanner),
        }));
        self
    }

    /// Run every step over `text`.
    #[must_use]
    pub fn run(&self, text: &str) -> String {
        let mut out = text.to_owned();
        for stage in &self.stages {
            let rewritten = match stage {
                Stage::Regex(regex, replacement) => regex.replace_all(&out, *replacement),
                Stage::Scan(scanner) => scanner(&out),
            };
            let rewritten = match rewritten {
                Cow::Borrowed(_) => continue,
                Cow::Owned(rewritten) => rewritten,
            };
            out = rewritten;
        }
        out
    }

    /// Run the pipeline repeatedly until the output stops changing.
    ///
    /// Every step either deletes characters or turns a whitespace character
    /// into a plain space, so the loop terminates.
    #[must_use]
    pub fn run_to_fixpoint(&self, text: &str) -> String {
        self.settle(text).0
    }

    /// Fixpoint output together with the number of runs it took, the last
    /// one being the run that changed nothing.
    fn settle(&self, text: &str) -> (String, usize) {
        let mut current = self.run(text);
        let mut runs = 1;
        loop {
            let next = self.run(&current);
            runs += 1;
            if next == current {
                return (current, runs);
            }
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[&[Step]] = &[
        COLLAPSE_WHITESPACE,
        TRIM,
        HASHTAGS,
        MARKDOWN,
        PARENTHESES,
        BRACKETS,
        BLANK_LINES,
        PUNCTUATION,
        DIGITS,
    ];

    #[test]
    fn test_all_patterns_compile() {
        for steps in ALL {
            let pipeline = Pipeline::new(steps);
            assert_eq!(pipeline.stages.len(), steps.len());
        }
    }

    #[test]
    fn test_steps_run_in_order() {
        let pipeline = Pipeline::new(DIGITS).then(COLLAPSE_WHITESPACE);
        assert_eq!(pipeline.run("  a 1 2 b  "), "a b");
    }

    #[test]
    fn test_unmatched_input_is_returned_unchanged() {
        let pipeline = Pipeline::new(HASHTAGS);
        assert_eq!(pipeline.run("no tags here"), "no tags here");
        assert_eq!(pipeline.run(""), "");
    }

    #[test]
    fn test_fixpoint_reaches_stable_output() {
        let pipeline = Pipeline::new(MARKDOWN).then(COLLAPSE_WHITESPACE);
        let once = pipeline.run_to_fixpoint("# # nested heading");
        assert_eq!(once, "nested heading");
        assert_eq!(pipeline.run(&once), once);
    }

    #[test]
    fn test_unwrap_links() {
        assert_eq!(unwrap_links("see [docs](https://x.io) now"), "see docs now");
        assert_eq!(unwrap_links("[[a](u)](v)"), "a");
        assert_eq!(unwrap_links("[a](u)[b](v)"), "ab");
        assert_eq!(unwrap_links("[x [a](u) y](v)"), "x a y");
    }

    #[test]
    fn test_unwrap_links_leaves_non_links() {
        for text in ["[](u)", "[a]()", "[a] (u)", "[a](u", "a](u)", "[a]b](u)", "plain"] {
            assert!(
                matches!(unwrap_links(text), Cow::Borrowed(_)),
                "{text:?} should be left alone"
            );
        }
    }

    #[test]
    fn test_unwrap_links_deep_nesting_is_one_pass() {
        let depth = 20_000;
        let text = format!("{}x{}", "[".repeat(depth), "](u)".repeat(depth));
        assert_eq!(unwrap_links(&text), "x");
    }

    #[test]
    fn test_stacked_markers_settle_in_two_runs() {
        let pipeline = Pipeline::new(MARKDOWN).then(COLLAPSE_WHITESPACE);
        for marker in ["# ", "> ", "- ", "1. ", "> - 2. ## "] {
            let text = format!("{}x", marker.repeat(16_000));
            let (out, runs) = pipeline.settle(&text);
            assert_eq!(out, "x", "{marker:?}");
            assert_eq!(runs, 2, "{marker:?}");
        }
    }
}
