use crate::parser::arena::BlockData;
use crate::parser::{BlockParser, BlockProcessor, BlockState};
use crate::text::column::is_space_or_tab;

/// ATX headings: `#` through `######`, followed by whitespace or end of
/// line. Setext headings are not opened here; the paragraph parser
/// transmutes itself when it sees an underline.
pub struct HeadingParser;

impl BlockParser for HeadingParser {
    fn opening_characters(&self) -> &[char] {
        &['#']
    }

    fn try_open(&self, processor: &mut BlockProcessor) -> BlockState {
        if processor.is_code_indent() {
            return BlockState::None;
        }
        let mut level = 0;
        while processor.peek_char(level) == '#' {
            level += 1;
            if level > 6 {
                return BlockState::None;
            }
        }
        let after = processor.peek_char(level);
        if after != '\0' && !is_space_or_tab(after) {
            return BlockState::None;
        }

        let column = processor.column();
        for _ in 0..level {
            processor.next_char();
        }
        trim_heading_content(processor);
        processor.push_block(
            BlockData::Heading {
                level: level as u8,
                setext: false,
                lines: Vec::new(),
                underline: None,
            },
            column,
        );
        BlockState::Break
    }
}

/// Strip the whitespace around the content and a trailing closing sequence
/// of `#`s, which only counts when preceded by whitespace or when the
/// heading is empty.
fn trim_heading_content(processor: &mut BlockProcessor) {
    while is_space_or_tab(processor.current_char()) {
        processor.next_char();
    }
    let line = processor.line_mut();
    let kept_len = {
        let content = line.as_str();
        let without_trailing_ws = content.trim_end_matches([' ', '\t']);
        let without_closing = without_trailing_ws.trim_end_matches('#');
        let kept = if without_closing.len() == without_trailing_ws.len() {
            without_trailing_ws
        } else if without_closing.is_empty() {
            without_closing
        } else if without_closing.ends_with([' ', '\t']) {
            without_closing.trim_end_matches([' ', '\t'])
        } else {
            // `#`s glued to the text are content, e.g. `# foo#`.
            without_trailing_ws
        };
        kept.len()
    };
    let start = line.start();
    line.set_end(start + kept_len);
}
