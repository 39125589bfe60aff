//! Byte-exact reconstruction from trivia-tracked parses, and normalizer
//! idempotence.

use pretty_assertions::assert_eq;
use similar::TextDiff;
use tidemark::render::{normalize, roundtrip};
use tidemark::{PipelineBuilder, RenderError};

fn assert_roundtrip(source: &str) {
    let pipeline = PipelineBuilder::new().track_trivia(true).build();
    let doc = pipeline.parse(source);
    let out = roundtrip(&doc).unwrap();
    if out != source {
        let diff = TextDiff::from_lines(source, &out);
        panic!("roundtrip diverged:\n{}", diff.unified_diff());
    }
}

#[test]
fn roundtrip_requires_trivia() {
    let doc = tidemark::parse("x\n");
    assert_eq!(roundtrip(&doc), Err(RenderError::TriviaNotTracked));
}

#[test]
fn plain_blocks_roundtrip() {
    assert_roundtrip("# Heading\n\nparagraph one\nstill one\n\nparagraph two\n");
}

#[test]
fn setext_and_breaks_roundtrip() {
    assert_roundtrip("Title\n=====\n\nsub\n---\n\n* * *\n");
}

#[test]
fn quotes_and_lazy_lines_roundtrip() {
    assert_roundtrip("> quoted\nlazy line\n>\n> more\n");
}

#[test]
fn lists_roundtrip() {
    assert_roundtrip("- one\n- two\n  nested continuation\n\n  second paragraph\n- three\n");
    assert_roundtrip("1. a\n2. b\n");
}

#[test]
fn code_roundtrip() {
    assert_roundtrip("    indented\n        deeper\n");
    assert_roundtrip("```rust\nfn f() {}\n\nfn g() {}\n```\ntail\n");
}

#[test]
fn link_definitions_roundtrip() {
    assert_roundtrip("[ref]\n\n[ref]: /url \"Title\"\n\ntail\n");
}

#[test]
fn blank_runs_roundtrip() {
    assert_roundtrip("\n\na\n\n\n\nb\n\n");
}

#[test]
fn mixed_newline_styles_roundtrip() {
    assert_roundtrip("one\r\ntwo\rthree\nfour");
    assert_roundtrip("# h\r\n\r\n- a\r\n- b\r\n");
}

#[test]
fn html_blocks_roundtrip() {
    assert_roundtrip("<div class=\"x\">\n  raw & untouched\n</div>\n\nafter\n");
}

#[test]
fn tabs_roundtrip() {
    assert_roundtrip("\tcode with tab\n>\tquoted tab\n");
}

#[test]
fn final_line_without_newline_roundtrips() {
    assert_roundtrip("no terminator");
}

fn assert_normalize_idempotent(source: &str) {
    let first = tidemark::normalize(source);
    let second = tidemark::normalize(&first);
    assert_eq!(first, second, "normalizing {source:?} is not a fixed point");
}

#[test]
fn normalize_is_idempotent() {
    assert_normalize_idempotent("Setext\n======\n\npara *with* `code`\n");
    assert_normalize_idempotent("- a\n- b\n\n  extra\n");
    assert_normalize_idempotent("> quote\n> more\n");
    assert_normalize_idempotent("```\nfenced\n```\n");
    assert_normalize_idempotent("[x](/url \"t\") and ![i](/img)\n");
}

#[test]
fn normalize_canonicalizes_headings() {
    assert_eq!(tidemark::normalize("Title\n=====\n"), "# Title\n");
    assert_eq!(tidemark::normalize("#  spaced   \n"), "# spaced\n");
}

#[test]
fn normalize_renumbers_ordered_lists() {
    assert_eq!(tidemark::normalize("3. a\n3. b\n"), "3. a\n4. b\n");
}

#[test]
fn normalize_escapes_literal_markers() {
    assert_eq!(tidemark::normalize("\\*literal\\*\n"), "\\*literal\\*\n");
}

#[test]
fn normalize_emits_unreferenced_definitions() {
    let out = tidemark::normalize("text\n\n[b]: /two\n[a]: /one \"t\"\n");
    assert_eq!(out, "text\n\n[a]: /one \"t\"\n[b]: /two\n");
}
