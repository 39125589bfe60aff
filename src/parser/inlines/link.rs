use crate::ast::Inline;
use crate::parser::delimiter::{Delimiter, DelimiterKind, ScanNode, node_to_inline, process_emphasis};
use crate::parser::inlines::entity::unescape;
use crate::parser::{InlineParser, InlineProcessor};
use crate::text::TextSlice;

/// Links and images. `[` and `![` park delimiters; everything is decided
/// at `]`, where the bracketed range either resolves against an inline
/// suffix or a reference definition, or collapses back into literal text.
pub struct LinkParser;

impl InlineParser for LinkParser {
    fn trigger_characters(&self) -> &[char] {
        &['[', '!', ']']
    }

    fn try_match(&self, processor: &mut InlineProcessor) -> bool {
        let pos = processor.pos();
        match processor.current_char() {
            '!' => {
                if processor.peek_char(1) != '[' {
                    return false;
                }
                processor.push_delimiter(Delimiter {
                    kind: DelimiterKind::LinkOpen {
                        image: true,
                        active: true,
                    },
                    count: 1,
                    can_open: false,
                    can_close: false,
                    content_start: pos + 2,
                });
                processor.set_pos(pos + 2);
                true
            }
            '[' => {
                processor.push_delimiter(Delimiter {
                    kind: DelimiterKind::LinkOpen {
                        image: false,
                        active: true,
                    },
                    count: 1,
                    can_open: false,
                    can_close: false,
                    content_start: pos + 1,
                });
                processor.set_pos(pos + 1);
                true
            }
            ']' => close_bracket(processor),
            _ => false,
        }
    }
}

fn close_bracket(processor: &mut InlineProcessor) -> bool {
    let Some(index) = processor.scan.iter().rposition(|node| {
        matches!(
            node,
            ScanNode::Delimiter(Delimiter {
                kind: DelimiterKind::LinkOpen { .. },
                ..
            })
        )
    }) else {
        return false;
    };

    let (image, active, content_start) = match &processor.scan[index] {
        ScanNode::Delimiter(Delimiter {
            kind: DelimiterKind::LinkOpen { image, active },
            content_start,
            ..
        }) => (*image, *active, *content_start),
        _ => return false,
    };

    if !active {
        demote_opener(processor, index);
        return false;
    }

    let close_pos = processor.pos();
    let Some((dest, title, end)) = resolve(processor, content_start, close_pos) else {
        demote_opener(processor, index);
        return false;
    };

    process_emphasis(&mut processor.scan, index + 1);
    let children: Vec<Inline> = processor
        .scan
        .drain(index + 1..)
        .map(node_to_inline)
        .collect();
    processor.scan.remove(index);

    if !image {
        // A link cannot contain another link: every `[` opener before this
        // one goes inert.
        for node in &mut processor.scan {
            if let ScanNode::Delimiter(Delimiter {
                kind:
                    DelimiterKind::LinkOpen {
                        image: false,
                        active,
                    },
                ..
            }) = node
            {
                *active = false;
            }
        }
    }

    processor.push_inline(if image {
        Inline::Image {
            dest,
            title,
            children,
        }
    } else {
        Inline::Link {
            dest,
            title,
            children,
        }
    });
    processor.set_pos(end);
    true
}

fn demote_opener(processor: &mut InlineProcessor, index: usize) {
    let literal = match &processor.scan[index] {
        ScanNode::Delimiter(d) => d.literal(),
        ScanNode::Node(_) => return,
    };
    processor.scan[index] = ScanNode::Node(Inline::Text(TextSlice::owned(literal)));
}

/// Try the three suffix forms after the `]` at `close_pos`:
/// `(dest "title")`, `[label]` (full or collapsed), or nothing (shortcut).
/// Returns destination, title and the byte position after the whole
/// construct.
fn resolve(
    processor: &InlineProcessor,
    content_start: usize,
    close_pos: usize,
) -> Option<(String, String, usize)> {
    let text = processor.text();
    let label_raw = &text[content_start..close_pos];
    let after = close_pos + 1;

    if text[after..].starts_with('(') {
        if let Some(resolved) = parse_inline_suffix(text, after) {
            return Some(resolved);
        }
    }
    if text[after..].starts_with('[') {
        let inner = scan_label(&text[after + 1..])?;
        let end = after + 1 + inner.len() + 1;
        let lookup = if inner.is_empty() { label_raw } else { inner };
        let def = processor.link_reference(lookup)?;
        return Some((def.dest.clone(), def.title.clone().unwrap_or_default(), end));
    }
    let def = processor.link_reference(label_raw)?;
    Some((def.dest.clone(), def.title.clone().unwrap_or_default(), after))
}

/// The text of a `[...]` label, escapes kept, unescaped brackets rejected.
fn scan_label(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b']' => return Some(&s[..i]),
            b'[' => return None,
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
    None
}

fn parse_inline_suffix(text: &str, start: usize) -> Option<(String, String, usize)> {
    let bytes = text.as_bytes();
    let mut i = start;
    if bytes.get(i) != Some(&b'(') {
        return None;
    }
    i += 1;
    i = skip_link_whitespace(text, i);

    let (dest, after_dest) = parse_destination(text, i)?;
    i = skip_link_whitespace(text, after_dest);

    let mut title = String::new();
    if i > after_dest {
        if let Some((t, after_title)) = parse_title(text, i) {
            title = t;
            i = skip_link_whitespace(text, after_title);
        }
    }

    if bytes.get(i) != Some(&b')') {
        return None;
    }
    Some((unescape(&dest), unescape(&title), i + 1))
}

fn skip_link_whitespace(text: &str, mut i: usize) -> usize {
    let bytes = text.as_bytes();
    while bytes
        .get(i)
        .is_some_and(|b| matches!(b, b' ' | b'\t' | b'\n'))
    {
        i += 1;
    }
    i
}

fn parse_destination(text: &str, start: usize) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    if bytes.get(start) == Some(&b'<') {
        let mut i = start + 1;
        while let Some(&b) = bytes.get(i) {
            match b {
                b'>' => return Some((text[start + 1..i].to_string(), i + 1)),
                b'<' | b'\n' => return None,
                b'\\' => i += 2,
                _ => i += 1,
            }
        }
        return None;
    }
    let mut i = start;
    let mut depth: usize = 0;
    while let Some(&b) = bytes.get(i) {
        match b {
            b' ' | b'\t' | b'\n' => break,
            b'(' => {
                depth += 1;
                i += 1;
            }
            b')' => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                i += 1;
            }
            b'\\' => i += 2,
            _ if b.is_ascii_control() => break,
            _ => i += 1,
        }
    }
    if depth != 0 || i > bytes.len() {
        return None;
    }
    Some((text[start..i.min(text.len())].to_string(), i.min(text.len())))
}

fn parse_title(text: &str, start: usize) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    let close = match bytes.get(start)? {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };
    let mut i = start + 1;
    while let Some(&b) = bytes.get(i) {
        if b == close {
            return Some((text[start + 1..i].to_string(), i + 1));
        }
        match b {
            b'(' if close == b')' => return None,
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_suffix_forms() {
        assert_eq!(
            parse_inline_suffix("(/url \"t\")", 0),
            Some(("/url".to_string(), "t".to_string(), 10))
        );
        assert_eq!(
            parse_inline_suffix("()", 0),
            Some((String::new(), String::new(), 2))
        );
        assert_eq!(
            parse_inline_suffix("(</my url>)", 0),
            Some(("/my url".to_string(), String::new(), 11))
        );
        assert_eq!(parse_inline_suffix("(/url", 0), None);
    }

    #[test]
    fn balanced_parens_in_destination() {
        assert_eq!(
            parse_inline_suffix("(/url(a))", 0),
            Some(("/url(a)".to_string(), String::new(), 9))
        );
    }

    #[test]
    fn labels() {
        assert_eq!(scan_label("bar] x"), Some("bar"));
        assert_eq!(scan_label("ba[r]"), None);
        assert_eq!(scan_label("no close"), None);
    }
}
