use crate::parser::arena::BlockData;
use crate::parser::{BlockParser, BlockProcessor, BlockState};
use crate::text::column::is_space_or_tab;

/// `***`, `---`, `___`: three or more of one marker, spaces allowed in
/// between.
pub struct ThematicBreakParser;

impl BlockParser for ThematicBreakParser {
    fn opening_characters(&self) -> &[char] {
        &['-', '*', '_']
    }

    fn try_open(&self, processor: &mut BlockProcessor) -> BlockState {
        if processor.is_code_indent() {
            return BlockState::None;
        }
        let marker = processor.current_char();

        // `---` directly under a paragraph is a setext underline, which the
        // paragraph parser resolves; defer unless the continuation is lazy
        // or the paragraph holds nothing but link definitions.
        if marker == '-'
            && is_open_paragraph_underline(processor)
            && !processor.is_lazy_continuation()
        {
            return BlockState::None;
        }

        let mut count = 0;
        let mut offset = 0;
        loop {
            let c = processor.peek_char(offset);
            if c == marker {
                count += 1;
            } else if c == '\0' {
                break;
            } else if !is_space_or_tab(c) {
                return BlockState::None;
            }
            offset += 1;
        }
        if count < 3 {
            return BlockState::None;
        }

        let column = processor.column();
        let line = processor.capture_line(processor.line().clone(), column);
        let end = processor.line().end();
        processor.line_mut().set_start(end);
        processor.push_block(BlockData::ThematicBreak { line }, column);
        BlockState::BreakDiscard
    }
}

/// Whether the current block is a paragraph with real text content and the
/// rest of the line forms a valid `-` setext underline.
fn is_open_paragraph_underline(processor: &BlockProcessor) -> bool {
    let Some(BlockData::Paragraph { lines }) = processor.current_block_data() else {
        return false;
    };
    if lines.is_empty() {
        return false;
    }
    // A paragraph made entirely of link reference definitions leaves no
    // heading text behind, so `---` after it is a plain thematic break.
    let definitions = crate::parser::link_ref::parse_definitions(lines);
    let consumed: usize = definitions.iter().map(|d| d.line_count).sum();
    if consumed >= lines.len() {
        return false;
    }

    let run = processor.line().as_str().trim_end_matches([' ', '\t']);
    !run.is_empty() && run.chars().all(|c| c == '-')
}
