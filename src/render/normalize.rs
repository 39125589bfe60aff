//! Canonical Markdown re-emission.
//!
//! The normalizer rewrites a document in one fixed surface style: ATX
//! headings, `*` emphasis markers, fenced runs just long enough for their
//! content. Normalizing is idempotent: parsing the output and normalizing
//! again reproduces it.

use crate::ast::{Block, Document, Inline};

/// Render the document as canonical Markdown.
pub fn normalize(document: &Document) -> String {
    let mut pieces: Vec<Vec<String>> = document
        .children
        .iter()
        .filter(|b| !matches!(b, Block::BlankLine { .. }))
        .map(render_block)
        .filter(|p| !p.is_empty())
        .collect();

    // Definitions survive as tree nodes only under trivia tracking; without
    // it, re-emit the document map at the end in label order.
    let has_definition_nodes = document
        .children
        .iter()
        .any(|b| matches!(b, Block::LinkReferenceDefinition { .. }));
    if !has_definition_nodes && !document.link_references.is_empty() {
        let mut defs: Vec<_> = document.link_references.values().collect();
        defs.sort_by(|a, b| a.label.cmp(&b.label));
        pieces.push(
            defs.into_iter()
                .map(|d| definition_line(&d.label, &d.dest, d.title.as_deref()))
                .collect(),
        );
    }

    let mut out = String::new();
    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for line in piece {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

fn render_block(block: &Block) -> Vec<String> {
    match block {
        Block::Paragraph { inlines, .. } => inline_lines(inlines),
        Block::Heading { level, inlines, .. } => {
            let mut line = "#".repeat(*level as usize);
            line.push(' ');
            let content = inline_lines(inlines).join(" ");
            line.push_str(content.trim_end());
            vec![line]
        }
        Block::Quote { children } => render_children(children, true)
            .into_iter()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect(),
        Block::List {
            ordered,
            start,
            marker,
            loose,
            items,
        } => {
            let mut pieces = Vec::new();
            let mut number = *start;
            for item in items {
                if item.is_trivia() {
                    continue;
                }
                let head = if *ordered {
                    let head = format!("{number}{marker} ");
                    number += 1;
                    head
                } else {
                    format!("{marker} ")
                };
                let indent = " ".repeat(head.len());
                let inner = render_children(item.children(), *loose);
                let mut lines = Vec::with_capacity(inner.len().max(1));
                if inner.is_empty() {
                    lines.push(head.trim_end().to_string());
                } else {
                    for (i, line) in inner.into_iter().enumerate() {
                        if line.is_empty() {
                            lines.push(String::new());
                        } else if i == 0 {
                            lines.push(format!("{head}{line}"));
                        } else {
                            lines.push(format!("{indent}{line}"));
                        }
                    }
                }
                pieces.push(lines);
            }
            let mut out = Vec::new();
            for (i, piece) in pieces.into_iter().enumerate() {
                if i > 0 && *loose {
                    out.push(String::new());
                }
                out.extend(piece);
            }
            out
        }
        Block::ListItem { children } => render_children(children, true),
        Block::IndentedCode { lines } => lines
            .iter()
            .map(|l| {
                let content = l.content();
                if content.trim().is_empty() {
                    String::new()
                } else {
                    format!("    {content}")
                }
            })
            .collect(),
        Block::FencedCode {
            fence, info, lines, ..
        } => {
            let mut longest = 0usize;
            for line in lines {
                let content = line.content();
                let mut run = 0;
                for c in content.chars() {
                    if c == *fence {
                        run += 1;
                        longest = longest.max(run);
                    } else {
                        run = 0;
                    }
                }
            }
            let fence_str: String = std::iter::repeat(*fence).take(longest.max(2) + 1).collect();
            let mut out = Vec::with_capacity(lines.len() + 2);
            let mut opening = fence_str.clone();
            if let Some(info) = info {
                opening.push_str(info);
            }
            out.push(opening);
            out.extend(lines.iter().map(|l| l.content()));
            out.push(fence_str);
            out
        }
        Block::HtmlBlock { lines } => lines.iter().map(|l| l.content()).collect(),
        Block::ThematicBreak { line } => {
            vec![line.content().trim().to_string()]
        }
        Block::LinkReferenceDefinition { definition, .. } => vec![definition_line(
            &definition.label,
            &definition.dest,
            definition.title.as_deref(),
        )],
        Block::BlankLine { .. } => Vec::new(),
        Block::Custom(custom) => {
            if let Some(markdown) = custom.to_markdown() {
                markdown.lines().map(str::to_string).collect()
            } else {
                render_children(custom.children(), true)
            }
        }
    }
}

/// Render sibling blocks, blank-line separated unless `separated` is off
/// (tight list items).
fn render_children(children: &[Block], separated: bool) -> Vec<String> {
    let mut out = Vec::new();
    let mut first = true;
    for child in children {
        if matches!(child, Block::BlankLine { .. }) {
            continue;
        }
        let piece = render_block(child);
        if piece.is_empty() {
            continue;
        }
        if !first && separated {
            out.push(String::new());
        }
        first = false;
        out.extend(piece);
    }
    out
}

fn definition_line(label: &str, dest: &str, title: Option<&str>) -> String {
    let mut line = format!("[{label}]: ");
    push_link_dest(&mut line, dest);
    if let Some(title) = title {
        line.push_str(" \"");
        push_link_title(&mut line, title);
        line.push('"');
    }
    line
}

fn inline_lines(inlines: &[Inline]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for inline in inlines {
        match inline {
            Inline::SoftBreak => {
                lines.push(std::mem::take(&mut current));
            }
            Inline::HardBreak => {
                current.push_str("  ");
                lines.push(std::mem::take(&mut current));
            }
            _ => append_inline(&mut current, inline),
        }
    }
    lines.push(current);
    while lines.last().is_some_and(|l| l.is_empty()) && lines.len() > 1 {
        lines.pop();
    }
    lines
}

fn append_inline(out: &mut String, inline: &Inline) {
    match inline {
        Inline::Text(s) => escape_markdown(out, s.as_str()),
        Inline::Code(s) => {
            let mut longest = 0usize;
            let mut run = 0usize;
            for c in s.chars() {
                if c == '`' {
                    run += 1;
                    longest = longest.max(run);
                } else {
                    run = 0;
                }
            }
            let ticks = "`".repeat(longest + 1);
            let pad = s.starts_with('`') || s.ends_with('`') || (s.starts_with(' ') && s.ends_with(' '));
            out.push_str(&ticks);
            if pad {
                out.push(' ');
            }
            out.push_str(s);
            if pad {
                out.push(' ');
            }
            out.push_str(&ticks);
        }
        Inline::Html(s) => out.push_str(s.as_str()),
        Inline::Autolink { url, .. } => {
            out.push('<');
            out.push_str(url);
            out.push('>');
        }
        Inline::SoftBreak | Inline::HardBreak => out.push(' '),
        Inline::Emphasis(children) => {
            out.push('*');
            append_inlines(out, children);
            out.push('*');
        }
        Inline::Strong(children) => {
            out.push_str("**");
            append_inlines(out, children);
            out.push_str("**");
        }
        Inline::Link {
            dest,
            title,
            children,
        } => {
            out.push('[');
            append_inlines(out, children);
            out.push_str("](");
            push_link_dest(out, dest);
            if !title.is_empty() {
                out.push_str(" \"");
                push_link_title(out, title);
                out.push('"');
            }
            out.push(')');
        }
        Inline::Image {
            dest,
            title,
            children,
        } => {
            out.push('!');
            append_inline(
                out,
                &Inline::Link {
                    dest: dest.clone(),
                    title: title.clone(),
                    children: children.clone(),
                },
            );
        }
        Inline::Custom(custom) => {
            if let Some(markdown) = custom.to_markdown() {
                out.push_str(&markdown);
            } else {
                append_inlines(out, custom.children());
            }
        }
    }
}

fn append_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        append_inline(out, inline);
    }
}

/// Escape decoded text so it reparses as the same literals. Line-start
/// block markers are escaped when the text begins a line.
fn escape_markdown(out: &mut String, s: &str) {
    for (i, c) in s.chars().enumerate() {
        let at_line_start = i == 0 && out.is_empty();
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '&' => {
                // `&` escaped with a backslash reparses as literal text
                // rather than a possible entity.
                out.push('\\');
                out.push(c);
            }
            '#' | '>' | '-' | '+' | '=' if at_line_start => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
}

fn push_link_dest(out: &mut String, dest: &str) {
    let needs_brackets = dest.is_empty()
        || dest
            .chars()
            .any(|c| c.is_whitespace() || c.is_ascii_control());
    if needs_brackets {
        out.push('<');
        for c in dest.chars() {
            if c == '<' || c == '>' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('>');
    } else {
        for c in dest.chars() {
            if c == '(' || c == ')' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
    }
}

fn push_link_title(out: &mut String, title: &str) {
    for c in title.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextSlice;

    #[test]
    fn text_is_reescaped() {
        let mut out = String::new();
        escape_markdown(&mut out, "a * b [c] & d");
        assert_eq!(out, "a \\* b \\[c\\] \\& d");
    }

    #[test]
    fn line_start_markers_are_escaped() {
        let mut out = String::new();
        escape_markdown(&mut out, "# not a heading");
        assert_eq!(out, "\\# not a heading");
    }

    #[test]
    fn code_span_fence_grows_past_content() {
        let mut out = String::new();
        append_inline(&mut out, &Inline::Code("a ` b".into()));
        assert_eq!(out, "``a ` b``");
    }

    #[test]
    fn link_destination_with_spaces_gets_brackets() {
        let mut out = String::new();
        append_inline(
            &mut out,
            &Inline::Link {
                dest: "a b".into(),
                title: String::new(),
                children: vec![Inline::Text(TextSlice::owned("x"))],
            },
        );
        assert_eq!(out, "[x](<a b>)");
    }
}
