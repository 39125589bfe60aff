use crate::parser::arena::{BlockData, FencedCodeData};
use crate::parser::inlines::entity::unescape;
use crate::parser::{BlockId, BlockParser, BlockProcessor, BlockState};

/// Backtick and tilde fenced code blocks.
pub struct FencedCodeParser;

impl BlockParser for FencedCodeParser {
    fn opening_characters(&self) -> &[char] {
        &['`', '~']
    }

    fn try_open(&self, processor: &mut BlockProcessor) -> BlockState {
        if processor.is_code_indent() {
            return BlockState::None;
        }
        let fence = processor.current_char();
        let mut count = 0;
        while processor.peek_char(count) == fence {
            count += 1;
        }
        if count < 3 {
            return BlockState::None;
        }

        let info_raw = processor.line().as_str()[count..].trim();
        // An info string on a backtick fence cannot contain backticks.
        if fence == '`' && info_raw.contains('`') {
            return BlockState::None;
        }
        let info = if info_raw.is_empty() {
            None
        } else {
            Some(unescape(info_raw))
        };

        let column = processor.column();
        let opening = processor.capture_line(processor.line().clone(), column);
        let end = processor.line().end();
        processor.line_mut().set_start(end);

        processor.push_block(
            BlockData::FencedCode(FencedCodeData {
                fence,
                count,
                indent_column: column,
                info,
                lines: Vec::new(),
                opening,
                closing: None,
            }),
            column,
        );
        // The opening line is fully consumed; nothing of it is content.
        BlockState::ContinueDiscard
    }

    fn try_continue(&self, processor: &mut BlockProcessor, block: BlockId) -> BlockState {
        let (fence, count, indent_column) = match &processor.block(block).data {
            BlockData::FencedCode(data) => (data.fence, data.count, data.indent_column),
            _ => return BlockState::None,
        };

        if !processor.is_code_indent() && processor.current_char() == fence {
            let mut run = 0;
            while processor.peek_char(run) == fence {
                run += 1;
            }
            let only_whitespace = processor.line().as_str()[run..]
                .chars()
                .all(|c| c == ' ' || c == '\t');
            if run >= count && only_whitespace {
                let closing = processor.capture_line(processor.line().clone(), processor.column());
                let end = processor.line().end();
                processor.line_mut().set_start(end);
                if let BlockData::FencedCode(data) = &mut processor.block_mut(block).data {
                    data.closing = Some(closing);
                }
                return BlockState::BreakDiscard;
            }
        }

        // Content: strip at most the opening fence's indentation.
        if processor.column() > indent_column {
            processor.go_to_column(indent_column);
        }
        BlockState::Continue
    }
}
