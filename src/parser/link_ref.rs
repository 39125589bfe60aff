//! Link reference definition grammar.
//!
//! Definitions are not matched line by line: they are peeled off the front
//! of a closing paragraph's accumulated lines, because only there can
//! `[label]: dest "title"` be told apart from ordinary text. A title may
//! spill over several lines, so the grammar runs over the joined content
//! and reports how many whole lines each definition consumed.

use crate::ast::LinkReferenceDefinition;
use crate::ast::normalize_label;
use crate::text::Line;

const MAX_LABEL_LENGTH: usize = 999;

pub(crate) struct ParsedDefinition {
    pub definition: LinkReferenceDefinition,
    /// Number of paragraph lines the definition spans.
    pub line_count: usize,
}

/// Peel link reference definitions off the front of `lines`. Stops at the
/// first position that is not a valid definition.
pub(crate) fn parse_definitions(lines: &[Line]) -> Vec<ParsedDefinition> {
    let joined = lines
        .iter()
        .map(Line::content)
        .collect::<Vec<_>>()
        .join("\n");
    let mut cursor = Cursor::new(&joined);
    let mut out = Vec::new();
    loop {
        let start_line = cursor.line;
        match cursor.parse_definition() {
            Some(definition) => {
                // A valid definition always ends at a line boundary.
                let line_count = cursor.line - start_line + 1;
                if cursor.peek() == Some('\n') {
                    cursor.bump();
                }
                out.push(ParsedDefinition {
                    definition,
                    line_count,
                });
                if cursor.at_end() {
                    return out;
                }
            }
            None => return out,
        }
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Cursor { text, pos: 0, line: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn mark(&self) -> (usize, usize) {
        (self.pos, self.line)
    }

    fn reset(&mut self, mark: (usize, usize)) {
        self.pos = mark.0;
        self.line = mark.1;
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.bump();
        }
    }

    /// Skip spaces, tabs and at most one newline.
    fn skip_spaces_one_newline(&mut self) {
        self.skip_spaces();
        if self.peek() == Some('\n') {
            self.bump();
            self.skip_spaces();
        }
    }

    fn at_line_end(&self) -> bool {
        self.at_end() || self.peek() == Some('\n')
    }

    fn parse_definition(&mut self) -> Option<LinkReferenceDefinition> {
        // Up to three leading spaces; four would be indented code, which a
        // paragraph line can never carry.
        let mut leading = 0;
        while self.peek() == Some(' ') && leading < 3 {
            self.bump();
            leading += 1;
        }

        if self.peek() != Some('[') {
            return None;
        }
        self.bump();
        let label = self.parse_label()?;
        if self.peek() != Some(':') {
            return None;
        }
        self.bump();

        self.skip_spaces_one_newline();
        let dest = self.parse_destination()?;

        // A title is optional; if the rest of the destination line is
        // clean, a failed title parse falls back to a title-less
        // definition.
        let after_dest = self.mark();
        self.skip_spaces();
        let no_title_end = if self.at_line_end() {
            Some(self.mark())
        } else {
            None
        };
        self.reset(after_dest);

        let had_whitespace = matches!(self.peek(), Some(' ') | Some('\t') | Some('\n'));
        self.skip_spaces_one_newline();
        if had_whitespace {
            if let Some(title) = self.parse_title() {
                self.skip_spaces();
                if self.at_line_end() {
                    return Some(LinkReferenceDefinition {
                        label: normalize_label(&label),
                        dest,
                        title: Some(title),
                    });
                }
            }
        }

        let end = no_title_end?;
        self.reset(end);
        Some(LinkReferenceDefinition {
            label: normalize_label(&label),
            dest,
            title: None,
        })
    }

    fn parse_label(&mut self) -> Option<String> {
        let mut label = String::new();
        let mut has_content = false;
        loop {
            let c = self.peek()?;
            match c {
                ']' => {
                    self.bump();
                    break;
                }
                '[' => return None,
                '\\' => {
                    self.bump();
                    label.push('\\');
                    if let Some(next) = self.bump() {
                        label.push(next);
                        if !next.is_whitespace() {
                            has_content = true;
                        }
                    }
                }
                _ => {
                    self.bump();
                    label.push(c);
                    if !c.is_whitespace() {
                        has_content = true;
                    }
                }
            }
            if label.chars().count() > MAX_LABEL_LENGTH {
                return None;
            }
        }
        if !has_content {
            return None;
        }
        Some(label)
    }

    fn parse_destination(&mut self) -> Option<String> {
        if self.peek() == Some('<') {
            self.bump();
            let mut dest = String::new();
            loop {
                let c = self.peek()?;
                match c {
                    '>' => {
                        self.bump();
                        return Some(dest);
                    }
                    '<' | '\n' => return None,
                    '\\' => {
                        self.bump();
                        match self.bump() {
                            Some(next) if next.is_ascii_punctuation() => dest.push(next),
                            Some(next) => {
                                dest.push('\\');
                                dest.push(next);
                            }
                            None => return None,
                        }
                    }
                    _ => {
                        self.bump();
                        dest.push(c);
                    }
                }
            }
        }

        let mut dest = String::new();
        let mut depth: usize = 0;
        loop {
            let Some(c) = self.peek() else { break };
            if c.is_whitespace() || c.is_ascii_control() {
                break;
            }
            match c {
                '(' => {
                    depth += 1;
                    self.bump();
                    dest.push(c);
                }
                ')' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.bump();
                    dest.push(c);
                }
                '\\' => {
                    self.bump();
                    match self.bump() {
                        Some(next) if next.is_ascii_punctuation() => dest.push(next),
                        Some(next) => {
                            dest.push('\\');
                            dest.push(next);
                        }
                        None => break,
                    }
                }
                _ => {
                    self.bump();
                    dest.push(c);
                }
            }
        }
        if dest.is_empty() || depth != 0 {
            return None;
        }
        Some(dest)
    }

    fn parse_title(&mut self) -> Option<String> {
        let open = self.peek()?;
        let close = match open {
            '"' => '"',
            '\'' => '\'',
            '(' => ')',
            _ => return None,
        };
        self.bump();
        let mut title = String::new();
        let mut last_was_newline = false;
        loop {
            let c = self.peek()?;
            if c == close {
                self.bump();
                return Some(title);
            }
            match c {
                '(' if open == '(' => return None,
                '\n' => {
                    // A blank line ends the paragraph, so it cannot appear
                    // inside a title.
                    if last_was_newline {
                        return None;
                    }
                    last_was_newline = true;
                    self.bump();
                    title.push('\n');
                    continue;
                }
                '\\' => {
                    self.bump();
                    match self.bump() {
                        Some(next) if next.is_ascii_punctuation() => title.push(next),
                        Some(next) => {
                            title.push('\\');
                            title.push(next);
                        }
                        None => return None,
                    }
                }
                _ => {
                    self.bump();
                    title.push(c);
                }
            }
            last_was_newline = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::split_lines;
    use std::sync::Arc;

    fn lines_of(text: &str) -> Vec<Line> {
        let source: Arc<str> = Arc::from(text);
        split_lines(&source)
    }

    #[test]
    fn simple_definition() {
        let lines = lines_of("[foo]: /url \"title\"");
        let defs = parse_definitions(&lines);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].definition.label, "foo");
        assert_eq!(defs[0].definition.dest, "/url");
        assert_eq!(defs[0].definition.title.as_deref(), Some("title"));
        assert_eq!(defs[0].line_count, 1);
    }

    #[test]
    fn definition_without_title() {
        let lines = lines_of("[foo]: /url");
        let defs = parse_definitions(&lines);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].definition.title, None);
    }

    #[test]
    fn title_on_its_own_line() {
        let lines = lines_of("[foo]: /url\n\"title\"");
        let defs = parse_definitions(&lines);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].definition.title.as_deref(), Some("title"));
        assert_eq!(defs[0].line_count, 2);
    }

    #[test]
    fn garbage_after_title_invalidates_only_the_title() {
        // `[foo]: /url "title" extra` is not a definition at all per the
        // one-line form, but with the title on the same line the fallback
        // to a title-less definition is not available either.
        let lines = lines_of("[foo]: /url \"title\" extra");
        let defs = parse_definitions(&lines);
        assert!(defs.is_empty());
    }

    #[test]
    fn angle_destination_and_escapes() {
        let lines = lines_of("[f\\]oo]: </my url> 'ti\\'tle'");
        let defs = parse_definitions(&lines);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].definition.label, "f\\]oo");
        assert_eq!(defs[0].definition.dest, "/my url");
        assert_eq!(defs[0].definition.title.as_deref(), Some("ti'tle"));
    }

    #[test]
    fn multiple_definitions_then_text() {
        let lines = lines_of("[a]: /a\n[b]: /b\nplain text");
        let defs = parse_definitions(&lines);
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].definition.label, "a");
        assert_eq!(defs[1].definition.label, "b");
    }

    #[test]
    fn not_a_definition() {
        let lines = lines_of("[foo] /url");
        assert!(parse_definitions(&lines).is_empty());
        let lines = lines_of("[]: /url");
        assert!(parse_definitions(&lines).is_empty());
    }

    #[test]
    fn nested_open_bracket_rejected() {
        let lines = lines_of("[fo[o]: /url");
        assert!(parse_definitions(&lines).is_empty());
    }
}
