//! CommonMark reference HTML output.

use crate::ast::{Block, Document, Inline};

/// Render the document as HTML, following the CommonMark reference output
/// conventions.
pub fn to_html(document: &Document) -> String {
    let mut out = String::with_capacity(document.source.len());
    render_blocks(&mut out, &document.children, false);
    out
}

fn render_blocks(out: &mut String, blocks: &[Block], tight: bool) {
    for block in blocks {
        if block.is_trivia() {
            continue;
        }
        render_block(out, block, tight);
    }
}

fn render_block(out: &mut String, block: &Block, tight: bool) {
    match block {
        Block::Paragraph { inlines, .. } => {
            if tight {
                render_inlines(out, inlines);
            } else {
                out.push_str("<p>");
                render_inlines(out, inlines);
                out.push_str("</p>\n");
            }
        }
        Block::Heading { level, inlines, .. } => {
            out.push_str("<h");
            out.push((b'0' + *level) as char);
            out.push('>');
            render_inlines(out, inlines);
            out.push_str("</h");
            out.push((b'0' + *level) as char);
            out.push_str(">\n");
        }
        Block::Quote { children } => {
            out.push_str("<blockquote>\n");
            render_blocks(out, children, false);
            out.push_str("</blockquote>\n");
        }
        Block::List {
            ordered,
            start,
            loose,
            items,
            ..
        } => {
            if *ordered {
                if *start == 1 {
                    out.push_str("<ol>\n");
                } else {
                    out.push_str("<ol start=\"");
                    out.push_str(&start.to_string());
                    out.push_str("\">\n");
                }
            } else {
                out.push_str("<ul>\n");
            }
            for item in items {
                if item.is_trivia() {
                    continue;
                }
                render_item(out, item.children(), !loose);
            }
            out.push_str(if *ordered { "</ol>\n" } else { "</ul>\n" });
        }
        // Items outside a list cannot happen; render defensively anyway.
        Block::ListItem { children } => render_item(out, children, !tight),
        Block::IndentedCode { lines } => {
            out.push_str("<pre><code>");
            for line in lines {
                escape_html(out, &line.content());
                out.push('\n');
            }
            out.push_str("</code></pre>\n");
        }
        Block::FencedCode { info, lines, .. } => {
            out.push_str("<pre><code");
            if let Some(info) = info {
                if let Some(language) = info.split_whitespace().next() {
                    out.push_str(" class=\"language-");
                    escape_html(out, language);
                    out.push('"');
                }
            }
            out.push('>');
            for line in lines {
                escape_html(out, &line.content());
                out.push('\n');
            }
            out.push_str("</code></pre>\n");
        }
        Block::HtmlBlock { lines } => {
            for line in lines {
                out.push_str(&line.content());
                out.push('\n');
            }
        }
        Block::ThematicBreak { .. } => out.push_str("<hr />\n"),
        Block::Custom(custom) => {
            if let Some(html) = custom.to_html() {
                out.push_str(&html);
            } else {
                render_blocks(out, custom.children(), false);
            }
        }
        Block::LinkReferenceDefinition { .. } | Block::BlankLine { .. } => {}
    }
}

fn render_item(out: &mut String, children: &[Block], tight: bool) {
    out.push_str("<li>");
    for child in children {
        if child.is_trivia() {
            continue;
        }
        if tight && matches!(child, Block::Paragraph { .. }) {
            render_block(out, child, true);
        } else {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            render_block(out, child, false);
        }
    }
    out.push_str("</li>\n");
}

fn render_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        render_inline(out, inline);
    }
}

fn render_inline(out: &mut String, inline: &Inline) {
    match inline {
        Inline::Text(s) => escape_html(out, s.as_str()),
        Inline::Code(s) => {
            out.push_str("<code>");
            escape_html(out, s);
            out.push_str("</code>");
        }
        Inline::Html(s) => out.push_str(s.as_str()),
        Inline::Autolink { url, email } => {
            out.push_str("<a href=\"");
            if *email {
                out.push_str("mailto:");
            }
            escape_href(out, url);
            out.push_str("\">");
            escape_html(out, url);
            out.push_str("</a>");
        }
        Inline::SoftBreak => out.push('\n'),
        Inline::HardBreak => out.push_str("<br />\n"),
        Inline::Emphasis(children) => {
            out.push_str("<em>");
            render_inlines(out, children);
            out.push_str("</em>");
        }
        Inline::Strong(children) => {
            out.push_str("<strong>");
            render_inlines(out, children);
            out.push_str("</strong>");
        }
        Inline::Link {
            dest,
            title,
            children,
        } => {
            out.push_str("<a href=\"");
            escape_href(out, dest);
            out.push('"');
            if !title.is_empty() {
                out.push_str(" title=\"");
                escape_html(out, title);
                out.push('"');
            }
            out.push('>');
            render_inlines(out, children);
            out.push_str("</a>");
        }
        Inline::Image {
            dest,
            title,
            children,
        } => {
            out.push_str("<img src=\"");
            escape_href(out, dest);
            out.push_str("\" alt=\"");
            let mut alt = String::new();
            for child in children {
                alt.push_str(&child.plain_text());
            }
            escape_html(out, &alt);
            out.push('"');
            if !title.is_empty() {
                out.push_str(" title=\"");
                escape_html(out, title);
                out.push('"');
            }
            out.push_str(" />");
        }
        Inline::Custom(custom) => {
            if let Some(html) = custom.to_html() {
                out.push_str(&html);
            } else {
                render_inlines(out, custom.children());
            }
        }
    }
}

/// Escape text for both element content and attribute values.
pub fn escape_html(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Escape a URL for a `href`/`src` attribute: unsafe bytes are
/// percent-encoded, `&` becomes an entity.
pub fn escape_href(out: &mut String, s: &str) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for &b in s.as_bytes() {
        match b {
            b'&' => out.push_str("&amp;"),
            b'\'' => out.push_str("%27"),
            b'"' => out.push_str("%22"),
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(b as char),
            b'!' | b'#' | b'$' | b'%' | b'(' | b')' | b'*' | b'+' | b',' | b'-' | b'.' | b'/'
            | b':' | b';' | b'=' | b'?' | b'@' | b'_' | b'~' => out.push(b as char),
            _ => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0xF) as usize] as char);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_escaping() {
        let mut out = String::new();
        escape_href(&mut out, "http://a.b/c d?x=1&y=ä");
        assert_eq!(out, "http://a.b/c%20d?x=1&amp;y=%C3%A4");
    }

    #[test]
    fn html_escaping() {
        let mut out = String::new();
        escape_html(&mut out, "a < b & \"c\"");
        assert_eq!(out, "a &lt; b &amp; &quot;c&quot;");
    }
}
