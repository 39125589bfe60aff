use crate::ast::Inline;
use crate::parser::{InlineParser, InlineProcessor};
use crate::text::TextSlice;

/// Backslash escapes. `\` before ASCII punctuation produces the literal
/// character, `\` at a line end is a hard break; anything else leaves the
/// backslash as text.
pub struct EscapeParser;

impl InlineParser for EscapeParser {
    fn trigger_characters(&self) -> &[char] {
        &['\\']
    }

    fn try_match(&self, processor: &mut InlineProcessor) -> bool {
        let next = processor.peek_char(1);
        let pos = processor.pos();
        if next == '\n' {
            processor.push_inline(Inline::HardBreak);
            processor.set_pos(pos + 2);
            return true;
        }
        if next.is_ascii_punctuation() {
            processor.push_inline(Inline::Text(TextSlice::owned(next.to_string())));
            processor.set_pos(pos + 1 + next.len_utf8());
            return true;
        }
        false
    }
}
