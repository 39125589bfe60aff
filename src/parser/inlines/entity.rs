//! Entity and numeric character references.
//!
//! The named table covers the references that actually show up in
//! real-world Markdown; it is not the full HTML5 list. Unknown names stay
//! literal, which is always safe output.

use crate::ast::Inline;
use crate::parser::{InlineParser, InlineProcessor};
use crate::text::TextSlice;

const NAMED: &[(&str, &str)] = &[
    ("AMP", "&"),
    ("GT", ">"),
    ("LT", "<"),
    ("QUOT", "\""),
    ("agrave", "\u{e0}"),
    ("amp", "&"),
    ("apos", "'"),
    ("auml", "\u{e4}"),
    ("ccedil", "\u{e7}"),
    ("copy", "\u{a9}"),
    ("deg", "\u{b0}"),
    ("eacute", "\u{e9}"),
    ("egrave", "\u{e8}"),
    ("gt", ">"),
    ("hellip", "\u{2026}"),
    ("laquo", "\u{ab}"),
    ("ldquo", "\u{201c}"),
    ("lsquo", "\u{2018}"),
    ("lt", "<"),
    ("mdash", "\u{2014}"),
    ("middot", "\u{b7}"),
    ("nbsp", "\u{a0}"),
    ("ndash", "\u{2013}"),
    ("ouml", "\u{f6}"),
    ("para", "\u{b6}"),
    ("quot", "\""),
    ("raquo", "\u{bb}"),
    ("rdquo", "\u{201d}"),
    ("reg", "\u{ae}"),
    ("rsquo", "\u{2019}"),
    ("sect", "\u{a7}"),
    ("shy", "\u{ad}"),
    ("times", "\u{d7}"),
    ("trade", "\u{2122}"),
    ("uuml", "\u{fc}"),
];

/// Decode one reference at the start of `s` (which begins with `&`),
/// returning the decoded text and the number of bytes consumed.
pub(crate) fn decode_entity(s: &str) -> Option<(String, usize)> {
    let rest = s.strip_prefix('&')?;
    if let Some(numeric) = rest.strip_prefix('#') {
        return decode_numeric(numeric).map(|(text, len)| (text, len + 2));
    }
    let end = rest.find(';')?;
    let name = &rest[..end];
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    let decoded = NAMED
        .binary_search_by(|(n, _)| n.cmp(&name))
        .ok()
        .map(|i| NAMED[i].1)?;
    Some((decoded.to_string(), end + 2))
}

fn decode_numeric(s: &str) -> Option<(String, usize)> {
    let (digits, radix, prefix) = if let Some(hex) = s.strip_prefix(['x', 'X']) {
        (hex, 16, 1)
    } else {
        (s, 10, 0)
    };
    let end = digits.find(';')?;
    let run = &digits[..end];
    let max_len = if radix == 16 { 6 } else { 7 };
    if run.is_empty() || run.len() > max_len {
        return None;
    }
    let value = u32::from_str_radix(run, radix).ok()?;
    // U+0000 and invalid scalar values map to the replacement character.
    let c = if value == 0 {
        '\u{fffd}'
    } else {
        char::from_u32(value).unwrap_or('\u{fffd}')
    };
    Some((c.to_string(), prefix + end + 1))
}

/// Resolve backslash escapes and references in a small string, e.g. an
/// info string, link destination or title.
pub(crate) fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while let Some(c) = s[i..].chars().next() {
        match c {
            '\\' => {
                i += 1;
                match s[i..].chars().next() {
                    Some(next) if next.is_ascii_punctuation() => {
                        out.push(next);
                        i += next.len_utf8();
                    }
                    Some(next) => {
                        out.push('\\');
                        out.push(next);
                        i += next.len_utf8();
                    }
                    None => out.push('\\'),
                }
            }
            '&' => match decode_entity(&s[i..]) {
                Some((decoded, len)) => {
                    out.push_str(&decoded);
                    i += len;
                }
                None => {
                    out.push('&');
                    i += 1;
                }
            },
            _ => {
                out.push(c);
                i += c.len_utf8();
            }
        }
    }
    out
}

/// `&...;` references in running text.
pub struct EntityParser;

impl InlineParser for EntityParser {
    fn trigger_characters(&self) -> &[char] {
        &['&']
    }

    fn try_match(&self, processor: &mut InlineProcessor) -> bool {
        let Some((decoded, len)) = decode_entity(processor.rest()) else {
            return false;
        };
        let pos = processor.pos();
        processor.push_inline(Inline::Text(TextSlice::owned(decoded)));
        processor.set_pos(pos + len);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_for_binary_search() {
        let mut sorted = NAMED.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        assert_eq!(sorted, NAMED);
    }

    #[test]
    fn named_and_numeric_references() {
        assert_eq!(decode_entity("&amp;x"), Some(("&".to_string(), 5)));
        assert_eq!(decode_entity("&#35;"), Some(("#".to_string(), 5)));
        assert_eq!(decode_entity("&#x22;"), Some(("\"".to_string(), 6)));
        assert_eq!(decode_entity("&#0;"), Some(("\u{fffd}".to_string(), 4)));
        assert_eq!(decode_entity("&unknown;"), None);
        assert_eq!(decode_entity("&;"), None);
    }

    #[test]
    fn unescape_resolves_both_forms() {
        assert_eq!(unescape("a\\*b&amp;c"), "a*b&c");
        assert_eq!(unescape("\\x"), "\\x");
    }
}
