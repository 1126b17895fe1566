//! Case conversion rules.

use unicode_segmentation::UnicodeSegmentation;

/// Full Unicode uppercase mapping.
#[must_use]
pub fn uppercase(text: &str) -> String {
    text.to_uppercase()
}

/// Full Unicode lowercase mapping.
#[must_use]
pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Uppercase the first character of every word, leaving the rest untouched.
///
/// Words are found with UAX #29 word boundaries, so apostrophes inside a word
/// (`don't`) do not start a new word while hyphens and spaces do.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in text.split_word_bounds() {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_alphanumeric() => {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
            _ => out.push_str(segment),
        }
    }
    out
}
