//! Rule and search performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use textfmt::{Rule, count_occurrences, replace_all};

const PARAGRAPH: &str = "# Heading\n\nSome **bold** text, a [link](https://example.com) and \
`code`.  Trailing   spaces (aside) [note] #tag 12345.\n\n\n> quoted ,line.Next one\n- item\n";

fn sample(copies: usize) -> String {
    PARAGRAPH.repeat(copies)
}

fn rules_short(c: &mut Criterion) {
    for rule in Rule::ALL {
        c.bench_function(&format!("rule_{}_short", rule.name()), |b| {
            b.iter(|| rule.apply(black_box(PARAGRAPH)));
        });
    }
}

fn rules_long(c: &mut Criterion) {
    let text = sample(500);

    for rule in [
        Rule::CollapseWhitespace,
        Rule::StripMarkdown,
        Rule::NormalizePunctuation,
        Rule::TitleCase,
    ] {
        c.bench_function(&format!("rule_{}_long", rule.name()), |b| {
            b.iter(|| rule.apply(black_box(&text)));
        });
    }
}

fn search(c: &mut Criterion) {
    let text = sample(500);

    c.bench_function("count_occurrences_long", |b| {
        b.iter(|| count_occurrences(black_box(&text), black_box("BOLD")));
    });

    c.bench_function("replace_all_long", |b| {
        b.iter(|| replace_all(black_box(&text), black_box("(aside)"), black_box("$1")));
    });

    c.bench_function("replace_all_no_match", |b| {
        b.iter(|| replace_all(black_box(&text), black_box("absent"), black_box("x")));
    });
}

criterion_group!(benches, rules_short, rules_long, search);
criterion_main!(benches);
