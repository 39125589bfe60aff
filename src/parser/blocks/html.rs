use crate::parser::arena::BlockData;
use crate::parser::{BlockId, BlockParser, BlockProcessor, BlockState};

/// The seven kinds of HTML block, which differ only in their end
/// condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HtmlKind {
    /// `<script>`, `<pre>`, `<style>`, `<textarea>`: ends on the matching
    /// closing tag.
    Raw,
    /// `<!--` comment, ends on `-->`.
    Comment,
    /// `<?` processing instruction, ends on `?>`.
    ProcessingInstruction,
    /// `<!LETTER` declaration, ends on `>`.
    Declaration,
    /// `<![CDATA[`, ends on `]]>`.
    Cdata,
    /// A known block-level tag; ends on a blank line.
    BlockTag,
    /// Any complete tag alone on its line; ends on a blank line and
    /// cannot interrupt a paragraph.
    CompleteTag,
}

impl HtmlKind {
    fn ends_on_blank(self) -> bool {
        matches!(self, HtmlKind::BlockTag | HtmlKind::CompleteTag)
    }

    /// Whether `line` contains this kind's end marker.
    fn end_matched(self, line: &str) -> bool {
        match self {
            HtmlKind::Raw => {
                let lower = line.to_ascii_lowercase();
                RAW_TAGS
                    .iter()
                    .any(|tag| lower.contains(&format!("</{tag}>")))
            }
            HtmlKind::Comment => line.contains("-->"),
            HtmlKind::ProcessingInstruction => line.contains("?>"),
            HtmlKind::Declaration => line.contains('>'),
            HtmlKind::Cdata => line.contains("]]>"),
            HtmlKind::BlockTag | HtmlKind::CompleteTag => false,
        }
    }
}

const RAW_TAGS: &[&str] = &["pre", "script", "style", "textarea"];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "base", "basefont", "blockquote", "body", "caption", "center",
    "col", "colgroup", "dd", "details", "dialog", "dir", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "head", "header", "hr", "html", "iframe", "legend", "li", "link", "main", "menu",
    "menuitem", "nav", "noframes", "ol", "optgroup", "option", "p", "param", "section", "source",
    "summary", "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr", "track", "ul",
];

/// Raw HTML blocks. Content is never parsed as Markdown; the block just
/// collects lines until its kind's end condition fires.
pub struct HtmlBlockParser;

impl BlockParser for HtmlBlockParser {
    fn opening_characters(&self) -> &[char] {
        &['<']
    }

    fn try_open(&self, processor: &mut BlockProcessor) -> BlockState {
        if processor.is_code_indent() {
            return BlockState::None;
        }
        let rest = processor.line().as_str();
        let Some(kind) = classify(rest) else {
            return BlockState::None;
        };
        if kind == HtmlKind::CompleteTag
            && matches!(
                processor.current_block_data(),
                Some(BlockData::Paragraph { .. })
            )
        {
            return BlockState::None;
        }

        let column = processor.column();
        let closes_here = kind.end_matched(rest);
        processor.push_block(
            BlockData::Html {
                kind,
                lines: Vec::new(),
            },
            column,
        );
        if closes_here {
            BlockState::Break
        } else {
            BlockState::Continue
        }
    }

    fn try_continue(&self, processor: &mut BlockProcessor, block: BlockId) -> BlockState {
        let kind = match &processor.block(block).data {
            BlockData::Html { kind, .. } => *kind,
            _ => return BlockState::None,
        };
        if kind.ends_on_blank() {
            if processor.is_blank_line() {
                return BlockState::None;
            }
            return BlockState::Continue;
        }
        if kind.end_matched(processor.line().as_str()) {
            BlockState::Break
        } else {
            BlockState::Continue
        }
    }
}

fn classify(rest: &str) -> Option<HtmlKind> {
    let mut chars = rest.chars();
    if chars.next() != Some('<') {
        return None;
    }
    let after = &rest[1..];

    if after.starts_with("!--") {
        return Some(HtmlKind::Comment);
    }
    if after.starts_with("![CDATA[") {
        return Some(HtmlKind::Cdata);
    }
    if let Some(c) = after.strip_prefix('!').and_then(|s| s.chars().next()) {
        if c.is_ascii_alphabetic() {
            return Some(HtmlKind::Declaration);
        }
        return None;
    }
    if after.starts_with('?') {
        return Some(HtmlKind::ProcessingInstruction);
    }

    let (closing, name_start) = if let Some(stripped) = after.strip_prefix('/') {
        (true, stripped)
    } else {
        (false, after)
    };
    let name: String = name_start
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if name.is_empty() {
        return None;
    }
    let lower = name.to_ascii_lowercase();
    let after_name = &name_start[name.len()..];
    let boundary = after_name.is_empty()
        || after_name.starts_with([' ', '\t', '>'])
        || after_name.starts_with("/>");

    if !closing && RAW_TAGS.contains(&lower.as_str()) && boundary {
        return Some(HtmlKind::Raw);
    }
    if BLOCK_TAGS.contains(&lower.as_str()) && boundary {
        return Some(HtmlKind::BlockTag);
    }

    // Type 7: one complete open or closing tag with nothing else on the
    // line.
    if let Some(consumed) = complete_tag_length(rest) {
        if rest[consumed..].chars().all(|c| c == ' ' || c == '\t') {
            return Some(HtmlKind::CompleteTag);
        }
    }
    None
}

/// Match one full open or closing tag at the start of `s`, returning the
/// matched length. Shared with the inline HTML parser.
pub(crate) fn complete_tag_length(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    if bytes.first() != Some(&b'<') {
        return None;
    }
    i += 1;
    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }
    // Tag name.
    if !bytes.get(i)?.is_ascii_alphabetic() {
        return None;
    }
    while bytes
        .get(i)
        .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'-')
    {
        i += 1;
    }
    if closing {
        while bytes.get(i).is_some_and(|b| *b == b' ' || *b == b'\t') {
            i += 1;
        }
        return if bytes.get(i) == Some(&b'>') {
            Some(i + 1)
        } else {
            None
        };
    }
    // Attributes.
    loop {
        let mut saw_space = false;
        while bytes.get(i).is_some_and(|b| *b == b' ' || *b == b'\t') {
            saw_space = true;
            i += 1;
        }
        match bytes.get(i)? {
            b'>' => return Some(i + 1),
            b'/' => {
                return if bytes.get(i + 1) == Some(&b'>') {
                    Some(i + 2)
                } else {
                    None
                };
            }
            b => {
                if !saw_space {
                    return None;
                }
                // Attribute name.
                if !(b.is_ascii_alphabetic() || *b == b'_' || *b == b':') {
                    return None;
                }
                while bytes.get(i).is_some_and(|b| {
                    b.is_ascii_alphanumeric() || matches!(b, b'_' | b':' | b'.' | b'-')
                }) {
                    i += 1;
                }
                // Optional value.
                let mut j = i;
                while bytes.get(j).is_some_and(|b| *b == b' ' || *b == b'\t') {
                    j += 1;
                }
                if bytes.get(j) == Some(&b'=') {
                    j += 1;
                    while bytes.get(j).is_some_and(|b| *b == b' ' || *b == b'\t') {
                        j += 1;
                    }
                    match bytes.get(j)? {
                        b'"' => {
                            j += 1;
                            while bytes.get(j).is_some_and(|b| *b != b'"') {
                                j += 1;
                            }
                            if bytes.get(j) != Some(&b'"') {
                                return None;
                            }
                            j += 1;
                        }
                        b'\'' => {
                            j += 1;
                            while bytes.get(j).is_some_and(|b| *b != b'\'') {
                                j += 1;
                            }
                            if bytes.get(j) != Some(&b'\'') {
                                return None;
                            }
                            j += 1;
                        }
                        _ => {
                            let start = j;
                            while bytes.get(j).is_some_and(|b| {
                                !b.is_ascii_whitespace()
                                    && !matches!(b, b'"' | b'\'' | b'=' | b'<' | b'>' | b'`')
                            }) {
                                j += 1;
                            }
                            if j == start {
                                return None;
                            }
                        }
                    }
                    i = j;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_the_seven_kinds() {
        assert_eq!(classify("<script src=x>"), Some(HtmlKind::Raw));
        assert_eq!(classify("<!-- note"), Some(HtmlKind::Comment));
        assert_eq!(classify("<?php"), Some(HtmlKind::ProcessingInstruction));
        assert_eq!(classify("<!DOCTYPE html>"), Some(HtmlKind::Declaration));
        assert_eq!(classify("<![CDATA[x"), Some(HtmlKind::Cdata));
        assert_eq!(classify("<div class=\"a\">"), Some(HtmlKind::BlockTag));
        assert_eq!(classify("</table>"), Some(HtmlKind::BlockTag));
        assert_eq!(classify("<custom-tag attr='v'>"), Some(HtmlKind::CompleteTag));
        assert_eq!(classify("<custom-tag> trailing"), None);
        assert_eq!(classify("<33>"), None);
    }

    #[test]
    fn raw_end_condition_matches_anywhere_in_line() {
        assert!(HtmlKind::Raw.end_matched("x</script> tail"));
        assert!(!HtmlKind::Raw.end_matched("</scripts>"));
        assert!(HtmlKind::Comment.end_matched("text --> more"));
    }
}
