//! Pure text-to-text transformation rules.
//!
//! Every rule is a total function over the whole buffer: any input, including
//! the empty string, yields an output and nothing panics. Rules hold no state
//! and are shared read-only by every session.
//!
//! Key types:
//!
//! - [`Rule`]: the fixed rule catalog, addressable by a stable name
//! - [`Transform`]: a rule or a parameterized literal symbol operation
//!
//! # Examples
//!
//! ```
//! use textfmt::{Rule, Transform};
//!
//! assert_eq!(Rule::CollapseWhitespace.apply("  Hello    World  "), "Hello World");
//!
//! let swap = Transform::ReplaceSymbol { from: "--".into(), to: "—".into() };
//! assert_eq!(swap.apply("a -- b"), "a — b");
//! ```

mod case;
mod pipeline;

use crate::error::{Error, Result};
use pipeline::Pipeline;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub use case::{lowercase, title_case, uppercase};

/// Symbols offered for one-click removal.
pub const COMMON_SYMBOLS: [&str; 28] = [
    "#", "*", "_", "-", "~", "`", ">", "!", "[", "]", "(", ")", "{", "}", "|", "\\", "+", "1", ".",
    "<", ":", "\"", "'", "$", "^", "=", "/", "&",
];

/// Preset `(from, to)` substitutions.
pub const SYMBOL_REPLACEMENTS: [(&str, &str); 8] = [
    ("()", "[]"),
    ("[]", "()"),
    ("{}", "()"),
    ("\"\"", "''"),
    ("''", "\"\""),
    ("--", "—"),
    ("...", "…"),
    ("+-", "±"),
];

static COLLAPSE_WHITESPACE: LazyLock<Pipeline> =
    LazyLock::new(|| Pipeline::new(pipeline::COLLAPSE_WHITESPACE));
static STRIP_HASHTAGS: LazyLock<Pipeline> = LazyLock::new(|| {
    Pipeline::new(pipeline::HASHTAGS).then(pipeline::COLLAPSE_WHITESPACE)
});
static STRIP_MARKDOWN: LazyLock<Pipeline> = LazyLock::new(|| {
    Pipeline::new(pipeline::MARKDOWN).then(pipeline::COLLAPSE_WHITESPACE)
});
static STRIP_PARENTHESES: LazyLock<Pipeline> = LazyLock::new(|| {
    Pipeline::new(pipeline::PARENTHESES).then(pipeline::COLLAPSE_WHITESPACE)
});
static STRIP_BRACKETS: LazyLock<Pipeline> = LazyLock::new(|| {
    Pipeline::new(pipeline::BRACKETS).then(pipeline::COLLAPSE_WHITESPACE)
});
static COLLAPSE_BLANK_LINES: LazyLock<Pipeline> =
    LazyLock::new(|| Pipeline::new(pipeline::BLANK_LINES).then(pipeline::TRIM));
static NORMALIZE_PUNCTUATION: LazyLock<Pipeline> = LazyLock::new(|| {
    Pipeline::new(pipeline::PUNCTUATION).then(pipeline::COLLAPSE_WHITESPACE)
});
static STRIP_DIGITS: LazyLock<Pipeline> =
    LazyLock::new(|| Pipeline::new(pipeline::DIGITS).then(pipeline::COLLAPSE_WHITESPACE));

/// A fixed, named transformation rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Collapse whitespace runs to one space and trim.
    CollapseWhitespace,
    /// Drop blank lines and join the rest with `", "`.
    SingleLine,
    /// Remove `#tag` tokens.
    StripHashtags,
    /// Remove Markdown syntax, keeping visible text.
    StripMarkdown,
    /// Remove `(...)` spans.
    StripParentheses,
    /// Remove `[...]` spans.
    StripBrackets,
    /// Merge consecutive blank lines into one line break.
    CollapseBlankLines,
    /// Fix spacing around sentence and clause punctuation.
    NormalizePunctuation,
    /// Remove digit runs.
    StripDigits,
    Uppercase,
    Lowercase,
    /// Capitalize the first letter of every word.
    TitleCase,
}

impl Rule {
    /// Every rule, in catalog order.
    pub const ALL: [Self; 12] = [
        Self::CollapseWhitespace,
        Self::SingleLine,
        Self::StripHashtags,
        Self::StripMarkdown,
        Self::StripParentheses,
        Self::StripBrackets,
        Self::CollapseBlankLines,
        Self::NormalizePunctuation,
        Self::StripDigits,
        Self::Uppercase,
        Self::Lowercase,
        Self::TitleCase,
    ];

    /// Stable machine name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CollapseWhitespace => "collapse-whitespace",
            Self::SingleLine => "single-line",
            Self::StripHashtags => "strip-hashtags",
            Self::StripMarkdown => "strip-markdown",
            Self::StripParentheses => "strip-parentheses",
            Self::StripBrackets => "strip-brackets",
            Self::CollapseBlankLines => "collapse-blank-lines",
            Self::NormalizePunctuation => "normalize-punctuation",
            Self::StripDigits => "strip-digits",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::TitleCase => "title-case",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CollapseWhitespace => "Remove extra spaces",
            Self::SingleLine => "Join into one line",
            Self::StripHashtags => "Remove hashtags",
            Self::StripMarkdown => "Remove Markdown",
            Self::StripParentheses => "Remove (...)",
            Self::StripBrackets => "Remove [...]",
            Self::CollapseBlankLines => "Remove blank lines",
            Self::NormalizePunctuation => "Normalize spacing",
            Self::StripDigits => "Remove digits",
            Self::Uppercase => "UPPERCASE",
            Self::Lowercase => "lowercase",
            Self::TitleCase => "Title Case",
        }
    }

    /// Apply the rule to `text`.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::CollapseWhitespace => COLLAPSE_WHITESPACE.run(text),
            Self::SingleLine => single_line(text),
            Self::StripHashtags => STRIP_HASHTAGS.run(text),
            Self::StripMarkdown => STRIP_MARKDOWN.run_to_fixpoint(text),
            Self::StripParentheses => STRIP_PARENTHESES.run(text),
            Self::StripBrackets => STRIP_BRACKETS.run(text),
            Self::CollapseBlankLines => COLLAPSE_BLANK_LINES.run(text),
            Self::NormalizePunctuation => NORMALIZE_PUNCTUATION.run(text),
            Self::StripDigits => STRIP_DIGITS.run(text),
            Self::Uppercase => uppercase(text),
            Self::Lowercase => lowercase(text),
            Self::TitleCase => title_case(text),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| Error::UnknownRule(s.to_string()))
    }
}

/// A rule or a parameterized literal symbol operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transform {
    Rule(Rule),
    /// Remove every exact occurrence of the symbol.
    RemoveSymbol(String),
    /// Replace every exact occurrence of `from` with `to`.
    ReplaceSymbol { from: String, to: String },
}

impl Transform {
    /// Compute the transformed text.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::Rule(rule) => rule.apply(text),
            Self::RemoveSymbol(symbol) => remove_symbol(text, symbol),
            Self::ReplaceSymbol { from, to } => replace_symbol(text, from, to),
        }
    }
}

impl From<Rule> for Transform {
    fn from(rule: Rule) -> Self {
        Self::Rule(rule)
    }
}

/// Drop blank lines and join the remaining lines with `", "`.
#[must_use]
pub fn single_line(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Remove every exact occurrence of `symbol`. An empty symbol is a no-op.
#[must_use]
pub fn remove_symbol(text: &str, symbol: &str) -> String {
    replace_symbol(text, symbol, "")
}

/// Replace every non-overlapping occurrence of `from`, scanning left to right.
/// An empty `from` is a no-op.
#[must_use]
pub fn replace_symbol(text: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return text.to_string();
    }
    text.replace(from, to)
}
