use crate::parser::arena::BlockData;
use crate::parser::{BlockId, BlockParser, BlockProcessor, BlockState};

/// Four-space indented code. Registered as a global parser: any character
/// can start it as long as the indentation is there.
pub struct IndentedCodeParser;

impl BlockParser for IndentedCodeParser {
    fn can_interrupt(&self, processor: &BlockProcessor) -> bool {
        // Indented text after a paragraph is a continuation line, never
        // code.
        !matches!(
            processor.current_block_data(),
            Some(BlockData::Paragraph { .. })
        )
    }

    fn try_open(&self, processor: &mut BlockProcessor) -> BlockState {
        if !processor.is_code_indent() || processor.is_blank_line() {
            return BlockState::None;
        }
        let column = processor.column();
        processor.go_to_code_indent(0);
        processor.push_block(BlockData::IndentedCode { lines: Vec::new() }, column);
        BlockState::Continue
    }

    fn try_continue(&self, processor: &mut BlockProcessor, _block: BlockId) -> BlockState {
        if processor.is_blank_line() {
            // Blank lines join the block for now; trailing ones are given
            // back when it closes.
            processor.go_to_code_indent(0);
            return BlockState::Continue;
        }
        if !processor.is_code_indent() {
            return BlockState::None;
        }
        processor.go_to_code_indent(0);
        BlockState::Continue
    }

    fn close(&self, processor: &mut BlockProcessor, block: BlockId) -> bool {
        let node = processor.block_mut(block);
        let BlockData::IndentedCode { lines } = &mut node.data else {
            return true;
        };
        let mut trailing = Vec::new();
        while lines.last().is_some_and(|line| line.is_blank()) {
            if let Some(line) = lines.pop() {
                trailing.push(line);
            }
        }
        trailing.reverse();
        processor.defer_blanks(trailing);
        true
    }
}
