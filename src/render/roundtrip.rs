//! Byte-exact source reconstruction.
//!
//! Every leaf block keeps the physical extent of the lines it consumed,
//! and trivia tracking adds the blank lines and definition lines the tree
//! would otherwise drop. Re-emitting every physical line in source order,
//! each with its own newline style, reproduces the input byte-for-byte.

use crate::ast::{Block, Document};
use crate::error::RenderError;
use crate::text::{Line, Newline};

/// Reconstruct the source text of a trivia-tracked document.
pub fn roundtrip(document: &Document) -> Result<String, RenderError> {
    if !document.trivia {
        return Err(RenderError::TriviaNotTracked);
    }
    let mut lines: Vec<(usize, usize, Newline)> = Vec::new();
    collect(&document.children, &mut lines);
    // Document order matches source order for every construct but lazy
    // continuations make it cheap to be sure.
    lines.sort_unstable_by_key(|&(start, _, _)| start);
    lines.dedup();

    let mut out = String::with_capacity(document.source.len());
    for (start, end, newline) in lines {
        out.push_str(&document.source[start..end]);
        out.push_str(newline.as_str());
    }
    Ok(out)
}

fn collect(blocks: &[Block], out: &mut Vec<(usize, usize, Newline)>) {
    for block in blocks {
        match block {
            Block::Paragraph { lines, .. }
            | Block::IndentedCode { lines }
            | Block::HtmlBlock { lines }
            | Block::LinkReferenceDefinition { lines, .. } => push_lines(lines, out),
            Block::Heading {
                lines, underline, ..
            } => {
                push_lines(lines, out);
                if let Some(u) = underline {
                    push_line(u, out);
                }
            }
            Block::FencedCode {
                lines,
                opening,
                closing,
                ..
            } => {
                push_line(opening, out);
                push_lines(lines, out);
                if let Some(c) = closing {
                    push_line(c, out);
                }
            }
            Block::ThematicBreak { line } | Block::BlankLine { line } => push_line(line, out),
            Block::Quote { children } | Block::ListItem { children } => collect(children, out),
            Block::List { items, .. } => collect(items, out),
            Block::Custom(custom) => {
                push_lines(custom.lines(), out);
                collect(custom.children(), out);
            }
        }
    }
}

fn push_lines(lines: &[Line], out: &mut Vec<(usize, usize, Newline)>) {
    for line in lines {
        push_line(line, out);
    }
}

fn push_line(line: &Line, out: &mut Vec<(usize, usize, Newline)>) {
    out.push((line.line_start, line.line_end, line.newline));
}
