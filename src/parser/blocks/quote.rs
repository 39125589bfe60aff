use crate::parser::arena::BlockData;
use crate::parser::{BlockParser, BlockId, BlockProcessor, BlockState};
use crate::text::column::is_space_or_tab;

/// Block quotes. The `>` marker plus one optional column of whitespace is
/// consumed per line; when the marker is missing the quote either ends on a
/// blank line or leaves the rest to lazy paragraph continuation.
pub struct QuoteParser;

impl QuoteParser {
    fn consume_marker(&self, processor: &mut BlockProcessor) {
        processor.next_char();
        if is_space_or_tab(processor.current_char()) {
            // One column only, so `>\t` keeps the rest of the tab for the
            // content's indentation.
            processor.skip_one_column();
        }
    }
}

impl BlockParser for QuoteParser {
    fn opening_characters(&self) -> &[char] {
        &['>']
    }

    fn try_open(&self, processor: &mut BlockProcessor) -> BlockState {
        if processor.is_code_indent() {
            return BlockState::None;
        }
        let column = processor.column();
        self.consume_marker(processor);
        processor.push_block(BlockData::Quote, column);
        BlockState::Continue
    }

    fn try_continue(&self, processor: &mut BlockProcessor, _block: BlockId) -> BlockState {
        if !processor.is_code_indent() && processor.current_char() == '>' {
            self.consume_marker(processor);
            return BlockState::Continue;
        }
        if processor.is_blank_line() {
            return BlockState::BreakDiscard;
        }
        BlockState::None
    }
}
