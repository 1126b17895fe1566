//! Fuzz target for the rule catalog and literal search.
//!
//! Every rule must accept arbitrary text, Markdown stripping must be
//! idempotent, and search terms must never be interpreted as patterns.

#![no_main]

use libfuzzer_sys::fuzz_target;
use textfmt::{ReplaceOutcome, Rule, count_occurrences, replace_all};

fuzz_target!(|data: &str| {
    for rule in Rule::ALL {
        let _ = rule.apply(data);
    }

    let stripped = Rule::StripMarkdown.apply(data);
    assert_eq!(Rule::StripMarkdown.apply(&stripped), stripped);

    // Split the input into a term and a body to search.
    let split = data.char_indices().nth(3).map_or(data.len(), |(i, _)| i);
    let (term, body) = data.split_at(split);
    let count = count_occurrences(body, term);
    match replace_all(body, term, "$0") {
        ReplaceOutcome::Replaced { count: replaced, .. } => assert_eq!(replaced, count),
        ReplaceOutcome::EmptyTerm => assert!(term.trim().is_empty()),
        ReplaceOutcome::NoMatches => assert_eq!(count, 0),
    }
});
