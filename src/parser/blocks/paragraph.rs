use crate::ast::Span;
use crate::parser::arena::{BlockData, BlockNode};
use crate::parser::link_ref::parse_definitions;
use crate::parser::{BlockId, BlockParser, BlockProcessor, BlockState};
use crate::text::Line;

/// Paragraphs: the global fallback that absorbs any line nothing else
/// claimed.
///
/// Continuation is not handled in the regular continuation walk. The open
/// phase calls `try_continue` when the deepest open block is a paragraph,
/// which lets an interrupting construct win first and gives lazy
/// continuation its CommonMark meaning. The same call site is where a
/// setext underline turns the paragraph into a heading, and where link
/// reference definitions are peeled off when the paragraph closes.
pub struct ParagraphParser;

impl BlockParser for ParagraphParser {
    fn try_open(&self, processor: &mut BlockProcessor) -> BlockState {
        if processor.is_blank_line() {
            return BlockState::None;
        }
        processor.push_block(
            BlockData::Paragraph { lines: Vec::new() },
            processor.column(),
        );
        BlockState::Continue
    }

    fn try_continue(&self, processor: &mut BlockProcessor, block: BlockId) -> BlockState {
        if processor.is_blank_line() {
            return BlockState::None;
        }
        if !processor.is_lazy_continuation() && !processor.is_code_indent() {
            if let Some(level) = setext_level(processor) {
                return transmute_to_heading(processor, block, level);
            }
        }
        BlockState::Continue
    }

    fn close(&self, processor: &mut BlockProcessor, block: BlockId) -> bool {
        let lines = match &mut processor.block_mut(block).data {
            BlockData::Paragraph { lines } => std::mem::take(lines),
            _ => return true,
        };
        let remaining = peel_definitions(processor, block, lines);
        if remaining.is_empty() {
            // Nothing but definitions: the paragraph itself disappears.
            return false;
        }
        if let BlockData::Paragraph { lines } = &mut processor.block_mut(block).data {
            *lines = remaining;
        }
        true
    }

    fn is_paragraph_parser(&self) -> bool {
        true
    }
}

/// A setext underline: a run of `=` or `-` with nothing but trailing
/// whitespace.
fn setext_level(processor: &BlockProcessor) -> Option<u8> {
    let s = processor.line().as_str();
    let marker = s.chars().next()?;
    if marker != '=' && marker != '-' {
        return None;
    }
    let run = s.trim_end_matches([' ', '\t']);
    if run.is_empty() || !run.chars().all(|c| c == marker) {
        return None;
    }
    Some(if marker == '=' { 1 } else { 2 })
}

fn transmute_to_heading(
    processor: &mut BlockProcessor,
    block: BlockId,
    level: u8,
) -> BlockState {
    let lines = match &mut processor.block_mut(block).data {
        BlockData::Paragraph { lines } => std::mem::take(lines),
        _ => return BlockState::Continue,
    };
    let column = processor.block(block).column;
    let remaining = peel_definitions(processor, block, lines);
    if remaining.is_empty() {
        // The whole paragraph was definitions, so there is no heading text;
        // the underline starts a fresh paragraph of its own.
        processor.discard(block);
        processor.push_block(BlockData::Paragraph { lines: Vec::new() }, column);
        return BlockState::Continue;
    }

    let underline = processor.capture_line(processor.line().clone(), processor.column());
    let end = processor.line().end();
    processor.line_mut().set_start(end);
    processor.discard(block);
    processor.push_block(
        BlockData::Heading {
            level,
            setext: true,
            lines: remaining,
            underline: Some(underline),
        },
        column,
    );
    BlockState::BreakDiscard
}

/// Split link reference definitions off the front of `lines`: register each
/// one and leave a definition node in the paragraph's place, then return
/// the lines that are ordinary paragraph text.
fn peel_definitions(
    processor: &mut BlockProcessor,
    block: BlockId,
    lines: Vec<Line>,
) -> Vec<Line> {
    let definitions = parse_definitions(&lines);
    if definitions.is_empty() {
        return lines;
    }
    let parent = processor.block(block).parent;
    let mut iter = lines.into_iter();
    for parsed in definitions {
        let def_lines: Vec<Line> = (0..parsed.line_count)
            .filter_map(|_| iter.next())
            .collect();
        processor.register_link_reference(parsed.definition.clone());
        let span = def_lines
            .first()
            .zip(def_lines.last())
            .map(|(first, last)| Span::new(first.line_start, last.line_end))
            .unwrap_or_default();
        let id = processor.arena.alloc(BlockNode {
            parent: None,
            children: Vec::new(),
            span,
            column: 0,
            is_open: false,
            parser: usize::MAX,
            data: BlockData::LinkRefDef {
                definition: parsed.definition,
                lines: def_lines,
            },
        });
        if let Some(parent) = parent {
            processor.arena.attach_before(parent, id, block);
        }
    }
    iter.collect()
}
