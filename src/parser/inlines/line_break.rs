use crate::ast::Inline;
use crate::parser::delimiter::ScanNode;
use crate::parser::{InlineParser, InlineProcessor};

/// Line endings inside a paragraph: two or more trailing spaces make a
/// hard break, otherwise a soft break. Trailing whitespace before the
/// break is trimmed from the preceding text either way.
pub struct LineBreakParser;

impl InlineParser for LineBreakParser {
    fn trigger_characters(&self) -> &[char] {
        &['\n']
    }

    fn try_match(&self, processor: &mut InlineProcessor) -> bool {
        let mut hard = false;
        let mut drop_last = false;
        if let Some(ScanNode::Node(Inline::Text(slice))) = processor.scan.last_mut() {
            let (removed, is_hard, now_empty) = {
                let content = slice.as_str();
                let trimmed = content.trim_end_matches([' ', '\t']);
                let removed = content.len() - trimmed.len();
                let is_hard = removed >= 2 && content[trimmed.len()..].bytes().all(|b| b == b' ');
                (removed, is_hard, trimmed.is_empty())
            };
            hard = is_hard;
            if removed > 0 {
                let new_end = slice.end() - removed;
                slice.set_end(new_end);
                drop_last = now_empty;
            }
        }
        if drop_last {
            processor.scan.pop();
        }
        processor.push_inline(if hard {
            Inline::HardBreak
        } else {
            Inline::SoftBreak
        });
        let pos = processor.pos();
        processor.set_pos(pos + 1);
        true
    }
}
