//! The line-oriented block state machine.
//!
//! Each physical line goes through two phases. The continuation phase walks
//! the chain of still-open blocks from the outermost in and asks each one's
//! parser whether the line extends it. The open phase then offers whatever
//! is left of the line to the registered block parsers, repeatedly, until
//! nothing more matches; unclaimed text falls through to the paragraph
//! parser. Blocks that were not re-confirmed open get closed at the end of
//! the line.
//!
//! All indentation logic is column-based: [`parse_indent`] expands tabs
//! against 4-column stops, and [`go_to_column`] can position the cursor in
//! the middle of a tab's expansion, leaving the remainder of the tab owed
//! as lead spaces on the captured line.
//!
//! [`parse_indent`]: BlockProcessor::parse_indent
//! [`go_to_column`]: BlockProcessor::go_to_column

use std::collections::HashMap;
use std::sync::Arc;

use crate::ast::{Block, Document, LinkReferenceDefinition, Span};
use crate::parser::arena::{BlockArena, BlockData, BlockId, BlockNode};
use crate::parser::state::BlockState;
use crate::pipeline::Pipeline;
use crate::text::column::{TAB_STOP, add_tab, is_across_tab, is_space_or_tab};
use crate::text::{Line, Newline, TextSlice};

/// Container depth at which further nesting is refused. Past this depth
/// would-be container markers are left in the text and collected as
/// paragraph content, so hostile inputs cannot drive the tree arbitrarily
/// deep.
pub const MAX_NESTING: usize = 128;

/// A block created by a parser during the current line, waiting to be
/// attached once sibling closing has run.
struct PendingBlock {
    data: BlockData,
    column: usize,
    span: Span,
    parser: usize,
}

/// Per-parse state driving block construction over one source buffer.
pub struct BlockProcessor<'p> {
    pipeline: &'p Pipeline,
    source: Arc<str>,
    pub(crate) arena: BlockArena,
    link_references: HashMap<String, LinkReferenceDefinition>,

    line: TextSlice,
    newline: Newline,
    line_phys_start: usize,
    line_phys_end: usize,
    original_line_start: usize,
    line_index: usize,

    column: usize,
    column_before_indent: usize,
    start_before_indent: usize,

    root: BlockId,
    opened: Vec<BlockId>,
    new_blocks: Vec<PendingBlock>,
    current_container: BlockId,
    current_block: Option<BlockId>,
    current_parser: usize,
    continue_processing_line: bool,

    track_trivia: bool,
    pending_blanks: Vec<Line>,
    recorded_blank: bool,
}

impl<'p> BlockProcessor<'p> {
    pub fn new(pipeline: &'p Pipeline, source: Arc<str>) -> Self {
        let mut arena = BlockArena::new();
        let root = arena.alloc(BlockNode {
            parent: None,
            children: Vec::new(),
            span: Span::default(),
            column: 0,
            is_open: true,
            parser: usize::MAX,
            data: BlockData::Document,
        });
        BlockProcessor {
            pipeline,
            source,
            arena,
            link_references: HashMap::new(),
            line: TextSlice::empty(),
            newline: Newline::None,
            line_phys_start: 0,
            line_phys_end: 0,
            original_line_start: 0,
            line_index: 0,
            column: 0,
            column_before_indent: 0,
            start_before_indent: 0,
            root,
            opened: vec![root],
            new_blocks: Vec::new(),
            current_container: root,
            current_block: None,
            current_parser: usize::MAX,
            continue_processing_line: true,
            track_trivia: pipeline.track_trivia(),
            pending_blanks: Vec::new(),
            recorded_blank: false,
        }
    }

    /// Feed one physical line through both phases.
    pub fn process_line(&mut self, line: &Line) {
        self.begin_line(line);
        log::trace!(
            "line {}: [{}] opened={}",
            self.line_index,
            self.line.as_str(),
            self.opened.len()
        );
        self.try_continue_blocks();
        if self.continue_processing_line {
            self.try_open_blocks();
        }
        self.close_all(false);
        self.line_index += 1;
    }

    pub(crate) fn begin_line(&mut self, line: &Line) {
        self.line = line.slice.clone();
        self.newline = line.newline;
        self.line_phys_start = line.line_start;
        self.line_phys_end = line.line_end;
        self.original_line_start = self.line.start();
        self.column = 0;
        self.column_before_indent = 0;
        self.start_before_indent = self.line.start();
        self.continue_processing_line = true;
        self.recorded_blank = false;
        self.update_current();
    }

    /// Close every remaining open block and freeze the arena into the
    /// public document tree.
    pub fn finish(mut self) -> Document {
        self.close_all(true);
        let trailing = std::mem::take(&mut self.pending_blanks);
        for line in trailing {
            self.attach_blank(self.root, line);
        }
        let refs = std::mem::take(&mut self.link_references);
        let child_ids = self.arena.take_children(self.root);
        let mut children = Vec::with_capacity(child_ids.len());
        for id in child_ids {
            if let Some(block) = freeze_block(&mut self.arena, self.pipeline, &refs, id) {
                children.push(block);
            }
        }
        Document {
            source: self.source,
            children,
            link_references: refs,
            trivia: self.track_trivia,
        }
    }

    // ------------------------------------------------------------------
    // Cursor and column arithmetic
    // ------------------------------------------------------------------

    /// Remaining unconsumed portion of the current line.
    pub fn line(&self) -> &TextSlice {
        &self.line
    }

    pub fn line_mut(&mut self) -> &mut TextSlice {
        &mut self.line
    }

    pub fn current_char(&self) -> char {
        self.line.current_char()
    }

    pub fn peek_char(&self, offset: usize) -> char {
        self.line.peek_char(offset)
    }

    /// Advance one character, keeping the column in sync, and return the
    /// new current character.
    pub fn next_char(&mut self) -> char {
        let c = self.line.current_char();
        if c == '\t' {
            self.column = add_tab(self.column);
        } else if c != '\0' {
            self.column += 1;
        }
        self.line.next_char()
    }

    /// Consume exactly one column. A tab is consumed only once all of its
    /// columns have been taken; until then the cursor stays on it.
    pub fn skip_one_column(&mut self) {
        let c = self.line.current_char();
        if c == '\t' {
            self.column += 1;
            if !is_across_tab(self.column) {
                self.line.skip();
            }
        } else if c != '\0' {
            self.column += 1;
            self.line.skip();
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Columns of whitespace consumed since the last non-space content.
    pub fn indent(&self) -> usize {
        self.column - self.column_before_indent
    }

    pub fn is_code_indent(&self) -> bool {
        self.indent() >= TAB_STOP
    }

    /// Whether the rest of the line is only spaces and tabs.
    pub fn is_blank_line(&self) -> bool {
        self.line.as_str().chars().all(is_space_or_tab)
    }

    /// Consume leading spaces and tabs, tracking where the indentation run
    /// started so [`go_to_column`](Self::go_to_column) can rewind into it.
    pub(crate) fn parse_indent(&mut self) {
        let previous_start = self.start_before_indent;
        let previous_column = self.column_before_indent;
        let run_start = self.line.start();
        let run_column = self.column;
        let mut c = self.line.current_char();
        while c != '\0' {
            if c == '\t' {
                self.column = add_tab(self.column);
            } else if c == ' ' {
                self.column += 1;
            } else {
                break;
            }
            c = self.line.next_char();
        }
        if run_column == self.column {
            self.start_before_indent = previous_start;
            self.column_before_indent = previous_column;
        } else {
            self.start_before_indent = run_start;
            self.column_before_indent = run_column;
        }
    }

    /// Commit the current position as consumed: later indentation parsing
    /// and rewinding will not go back past it.
    pub fn restart_indent(&mut self) {
        self.start_before_indent = self.line.start();
        self.column_before_indent = self.column;
    }

    /// Move the cursor to an absolute column, re-expanding tabs from the
    /// last committed position. Landing inside a tab's expansion leaves the
    /// cursor on the tab with the target column recorded; the unconsumed
    /// part of the tab becomes lead spaces when the line is captured.
    pub fn go_to_column(&mut self, new_column: usize) {
        if new_column >= self.column_before_indent {
            self.line.set_start(self.start_before_indent);
            self.column = self.column_before_indent;
        } else {
            self.line.set_start(self.original_line_start);
            self.column = 0;
            self.column_before_indent = 0;
            self.start_before_indent = self.original_line_start;
        }
        while !self.line.is_empty() && self.column < new_column {
            let c = self.line.current_char();
            if c == '\t' {
                self.column = add_tab(self.column);
            } else {
                if !is_space_or_tab(c) {
                    self.column_before_indent = self.column + 1;
                    self.start_before_indent = self.line.start() + c.len_utf8();
                }
                self.column += 1;
            }
            self.line.set_start(self.line.start() + c.len_utf8());
        }
        if self.column > new_column {
            // Overshot through a tab: stay on it, owing the difference.
            self.column = new_column;
            if self.line.start() > self.original_line_start {
                self.line.set_start(self.line.start() - 1);
            }
        }
    }

    /// Move to the start of an indented code line relative to the last
    /// committed position.
    pub fn go_to_code_indent(&mut self, column_offset: usize) {
        self.go_to_column(self.column_before_indent + TAB_STOP + column_offset);
    }

    // ------------------------------------------------------------------
    // Line capture
    // ------------------------------------------------------------------

    /// Capture a view of the current line as a stored [`Line`], stamping
    /// the physical extent and newline style, and converting a half-consumed
    /// tab under the cursor into owed lead spaces.
    pub fn capture_line(&self, slice: TextSlice, column: usize) -> Line {
        let mut slice = slice;
        let mut lead = 0;
        if slice.current_char() == '\t' && is_across_tab(column) {
            lead = add_tab(column) - column;
            slice.skip();
        }
        Line {
            slice,
            newline: self.newline,
            line_start: self.line_phys_start,
            line_end: self.line_phys_end,
            lead_spaces: lead,
        }
    }

    fn append_line_to(&mut self, id: BlockId) {
        let line = self.capture_line(self.line.clone(), self.column);
        let covered = Span::new(line.line_start, line.line_end);
        let node = self.arena.get_mut(id);
        node.span = node.span.cover(covered);
        match node.data.lines_mut() {
            Some(lines) => lines.push(line),
            None => panic!(
                "block cannot take lines but its parser did not discard the line (line {})",
                self.line_index
            ),
        }
    }

    fn record_blank_line(&mut self) {
        if !self.track_trivia || self.recorded_blank {
            return;
        }
        self.recorded_blank = true;
        let slice = TextSlice::new(self.source.clone(), self.line_phys_start, self.line_phys_end);
        self.pending_blanks.push(Line {
            slice,
            newline: self.newline,
            line_start: self.line_phys_start,
            line_end: self.line_phys_end,
            lead_spaces: 0,
        });
    }

    fn attach_blank(&mut self, container: BlockId, line: Line) {
        let span = Span::new(line.line_start, line.line_end);
        let id = self.arena.alloc(BlockNode {
            parent: None,
            children: Vec::new(),
            span,
            column: 0,
            is_open: false,
            parser: usize::MAX,
            data: BlockData::BlankLine { line },
        });
        self.arena.attach(container, id);
    }

    /// Hand captured blank lines back to the processor; they re-attach as
    /// trivia before the next block. Used by leaves that trim trailing
    /// blanks when they close.
    pub fn defer_blanks(&mut self, lines: Vec<Line>) {
        if self.track_trivia {
            self.pending_blanks.extend(lines);
        }
    }

    fn flush_pending_blanks(&mut self, container: BlockId) {
        if self.pending_blanks.is_empty() {
            return;
        }
        let blanks = std::mem::take(&mut self.pending_blanks);
        for line in blanks {
            self.attach_blank(container, line);
        }
    }

    // ------------------------------------------------------------------
    // Stack and tree access for parsers
    // ------------------------------------------------------------------

    pub fn source(&self) -> &Arc<str> {
        &self.source
    }

    pub fn newline(&self) -> Newline {
        self.newline
    }

    /// Byte range of the physical line being processed, markers included.
    pub fn physical_line(&self) -> (usize, usize) {
        (self.line_phys_start, self.line_phys_end)
    }

    pub fn line_index(&self) -> usize {
        self.line_index
    }

    pub fn track_trivia(&self) -> bool {
        self.track_trivia
    }

    /// Deepest open container block.
    pub fn current_container(&self) -> BlockId {
        self.current_container
    }

    /// Deepest open block, container or leaf.
    pub fn current_block(&self) -> Option<BlockId> {
        self.current_block
    }

    pub fn current_block_data(&self) -> Option<&BlockData> {
        self.current_block.map(|id| &self.arena.get(id).data)
    }

    pub fn block(&self, id: BlockId) -> &BlockNode {
        self.arena.get(id)
    }

    pub fn block_mut(&mut self, id: BlockId) -> &mut BlockNode {
        self.arena.get_mut(id)
    }

    /// Nesting depth of the open chain, the document root included.
    pub fn depth(&self) -> usize {
        self.opened.len()
    }

    fn current_block_is_paragraph(&self) -> bool {
        self.current_block
            .map(|id| self.arena.get(id).data.is_paragraph())
            .unwrap_or(false)
    }

    /// Whether the current line reached the current block without every
    /// ancestor matching its own marker. Setext underlines and other
    /// paragraph transmutations are only valid on non-lazy lines.
    pub fn is_lazy_continuation(&self) -> bool {
        self.opened[1..]
            .iter()
            .any(|&id| Some(id) != self.current_block && !self.arena.get(id).is_open)
    }

    /// Re-mark a still-stacked block as open, so pending sibling closing
    /// stops above it. Used by container parsers that keep a parent alive
    /// while replacing its current child.
    pub fn mark_open(&mut self, id: BlockId) {
        self.arena.get_mut(id).is_open = true;
    }

    fn update_current(&mut self) {
        self.current_block = None;
        self.current_container = self.root;
        for i in (0..self.opened.len()).rev() {
            let id = self.opened[i];
            if self.current_block.is_none() && i > 0 {
                self.current_block = Some(id);
            }
            if self.arena.get(id).data.is_container() {
                self.current_container = id;
                break;
            }
        }
    }

    /// Queue a block for attachment at the end of the current parser call.
    /// Containers are pushed before the leaf they will receive; at most one
    /// leaf, and only as the last push.
    pub fn push_block(&mut self, data: BlockData, column: usize) {
        let span = Span::new(self.line.start(), self.line_phys_end);
        self.new_blocks.push(PendingBlock {
            data,
            column,
            span,
            parser: self.current_parser,
        });
    }

    /// Force-close a block and everything nested inside it.
    pub fn close(&mut self, block: BlockId) {
        if let Some(pos) = self.opened.iter().position(|&b| b == block) {
            if pos == 0 {
                return;
            }
            for i in (pos..self.opened.len()).rev() {
                self.close_block_at(i);
            }
            self.update_current();
        }
    }

    /// Remove a block from the open chain and detach it from the tree
    /// without running its close callbacks. The discarding parser takes
    /// ownership of whatever content the block held.
    pub fn discard(&mut self, block: BlockId) {
        if let Some(pos) = self.opened.iter().position(|&b| b == block) {
            if pos == 0 {
                return;
            }
            self.arena.detach(block);
            self.opened.remove(pos);
            self.update_current();
        }
    }

    /// Register a link reference definition; the first definition of a
    /// label wins.
    pub fn register_link_reference(&mut self, definition: LinkReferenceDefinition) {
        self.link_references
            .entry(definition.label.clone())
            .or_insert(definition);
    }

    // ------------------------------------------------------------------
    // Phases
    // ------------------------------------------------------------------

    fn try_continue_blocks(&mut self) {
        // Everything must re-confirm it stays open on this line.
        for i in 1..self.opened.len() {
            let id = self.opened[i];
            self.arena.get_mut(id).is_open = false;
        }

        let mut i = 1;
        while i < self.opened.len() {
            let id = self.opened[i];
            self.parse_indent();

            // Paragraph continuation is decided in the open phase, where
            // lazy continuation and interrupting constructs compete.
            if self.arena.get(id).data.is_paragraph() {
                break;
            }

            let parser_index = self.arena.get(id).parser;
            self.current_parser = parser_index;
            self.update_current();
            let parser = self.pipeline.block_parser(parser_index).clone();
            let result = parser.try_continue(self, id);

            if result == BlockState::Skip {
                i += 1;
                continue;
            }
            if result == BlockState::None {
                break;
            }

            self.restart_indent();
            if i >= self.opened.len() {
                i = self.opened.len() - 1;
            }
            if i + 1 < self.opened.len() && !self.new_blocks.is_empty() {
                panic!(
                    "only the deepest open block may push new blocks while continuing (line {})",
                    self.line_index
                );
            }

            if self.arena.get(id).data.is_leaf() && self.new_blocks.is_empty() {
                self.continue_processing_line = false;
                if !result.is_discard() {
                    self.append_line_to(id);
                }
            }
            self.arena.get_mut(id).is_open = result.is_continue();

            if result == BlockState::BreakDiscard {
                if self.is_blank_line() {
                    self.record_blank_line();
                }
                self.continue_processing_line = false;
                break;
            }

            let was_last = i == self.opened.len() - 1;
            if self.continue_processing_line && !self.new_blocks.is_empty() {
                self.process_new_blocks(result, false);
            }
            if was_last || !self.continue_processing_line {
                break;
            }
            i += 1;
        }
        self.update_current();
    }

    fn try_open_blocks(&mut self) {
        let mut previous_position = None;
        while self.continue_processing_line {
            let position = (self.line.start(), self.column);
            if previous_position == Some(position) {
                panic!(
                    "block parsers did not advance at line {} [{}]: a parser keeps matching without consuming input",
                    self.line_index,
                    self.line.as_str()
                );
            }
            previous_position = Some(position);

            self.parse_indent();
            let c = self.line.current_char();
            let specific = self.pipeline.block_parsers_for(c);
            if !specific.is_empty() && self.try_open_with(specific) {
                self.restart_indent();
                continue;
            }
            if self.continue_processing_line {
                let global = self.pipeline.global_block_parsers();
                if !global.is_empty() && self.try_open_with(global) {
                    self.restart_indent();
                    continue;
                }
            }
            break;
        }
    }

    fn try_open_with(&mut self, parsers: &[usize]) -> bool {
        for &index in parsers {
            if self.line.is_empty() {
                self.record_blank_line();
                self.continue_processing_line = false;
                break;
            }
            self.update_current();

            let parser = self.pipeline.block_parser(index).clone();
            if !parser.can_interrupt(self) {
                continue;
            }

            let is_paragraph_parser = Some(index) == self.pipeline.paragraph_parser();
            let lazy_paragraph = is_paragraph_parser && self.current_block_is_paragraph();

            // Past the nesting ceiling only paragraph content may form, so
            // marker characters degrade to plain text.
            if self.opened.len() >= MAX_NESTING && !is_paragraph_parser {
                continue;
            }

            self.current_parser = index;
            let result = if lazy_paragraph {
                let paragraph = self
                    .current_block
                    .unwrap_or_else(|| unreachable!("lazy continuation without a block"));
                parser.try_continue(self, paragraph)
            } else {
                parser.try_open(self)
            };

            if result == BlockState::None {
                continue;
            }

            self.update_current();
            if lazy_paragraph && self.current_block_is_paragraph() {
                // The paragraph absorbed the line (plain or lazy
                // continuation); every ancestor stays open with it.
                debug_assert!(self.new_blocks.is_empty());
                if !result.is_discard() {
                    if let Some(paragraph) = self.current_block {
                        self.append_line_to(paragraph);
                    }
                }
                self.open_all();
                self.continue_processing_line = false;
                break;
            }

            if self.new_blocks.is_empty() {
                if result == BlockState::BreakDiscard {
                    self.continue_processing_line = false;
                    break;
                }
                continue;
            }

            self.process_new_blocks(result, true);
            return self.continue_processing_line;
        }
        false
    }

    /// Attach queued blocks in push order, closing non-continued siblings
    /// before the first attachment.
    fn process_new_blocks(&mut self, result: BlockState, allow_closing: bool) {
        let mut allow_closing = allow_closing;
        while !self.new_blocks.is_empty() {
            let pending = self.new_blocks.remove(0);
            let is_leaf = pending.data.is_leaf();
            let id = self.arena.alloc(BlockNode {
                parent: None,
                children: Vec::new(),
                span: pending.span,
                column: pending.column,
                is_open: false,
                parser: pending.parser,
                data: pending.data,
            });

            if is_leaf {
                if !result.is_discard() {
                    self.append_line_to(id);
                }
                if !self.new_blocks.is_empty() {
                    panic!(
                        "a leaf block must be the last one pushed (line {})",
                        self.line_index
                    );
                }
            }

            if allow_closing {
                self.close_all(false);
                allow_closing = false;
            }
            self.update_current();
            let container = self.current_container;
            self.flush_pending_blanks(container);
            self.arena.attach(container, id);
            self.arena.get_mut(id).is_open = result.is_continue();
            self.opened.push(id);
            self.update_current();
            log::trace!(
                "line {}: opened {:?} at depth {}",
                self.line_index,
                self.arena.get(id).data,
                self.opened.len() - 1
            );

            if is_leaf {
                self.continue_processing_line = false;
                return;
            }
        }
        self.continue_processing_line = !result.is_discard();
    }

    /// Re-mark the whole chain open: a lazy paragraph continuation keeps
    /// every ancestor alive even though none matched its own marker.
    fn open_all(&mut self) {
        for i in 1..self.opened.len() {
            let id = self.opened[i];
            self.arena.get_mut(id).is_open = true;
        }
    }

    fn close_block_at(&mut self, index: usize) {
        let id = self.opened[index];
        let parser_index = self.arena.get(id).parser;
        if parser_index == usize::MAX {
            self.opened.remove(index);
            return;
        }
        let parser = self.pipeline.block_parser(parser_index).clone();
        if parser.close(self, id) {
            self.opened.remove(index);
            parser.closed(self, id);
        } else {
            self.arena.detach(id);
            self.opened.remove(index);
        }
    }

    pub(crate) fn close_all(&mut self, force: bool) {
        let mut i = self.opened.len();
        while i > 1 {
            i -= 1;
            let id = self.opened[i];
            if !force && self.arena.get(id).is_open {
                break;
            }
            self.close_block_at(i);
        }
        self.update_current();
    }
}

/// Turn an arena node into its public tree form, parsing inline content for
/// paragraphs and headings along the way. Returns `None` for placeholder
/// nodes left behind by discards.
fn freeze_block(
    arena: &mut BlockArena,
    pipeline: &Pipeline,
    refs: &HashMap<String, LinkReferenceDefinition>,
    id: BlockId,
) -> Option<Block> {
    let child_ids = arena.take_children(id);
    let data = arena.take_data(id);
    let mut children = Vec::with_capacity(child_ids.len());
    for child in child_ids {
        if let Some(block) = freeze_block(arena, pipeline, refs, child) {
            children.push(block);
        }
    }
    let block = match data {
        BlockData::Document => return None,
        BlockData::Quote => Block::Quote { children },
        BlockData::List(list) => Block::List {
            ordered: list.ordered,
            start: list.start,
            marker: list.marker,
            loose: list.loose,
            items: children,
        },
        BlockData::ListItem(_) => Block::ListItem { children },
        BlockData::Paragraph { lines } => Block::Paragraph {
            inlines: crate::parser::inline_processor::parse_inlines(pipeline, refs, &lines),
            lines,
        },
        BlockData::Heading {
            level,
            setext,
            lines,
            underline,
        } => Block::Heading {
            level,
            setext,
            inlines: crate::parser::inline_processor::parse_inlines(pipeline, refs, &lines),
            lines,
            underline,
        },
        BlockData::IndentedCode { lines } => Block::IndentedCode { lines },
        BlockData::FencedCode(fenced) => Block::FencedCode {
            fence: fenced.fence,
            info: fenced.info,
            lines: fenced.lines,
            opening: fenced.opening,
            closing: fenced.closing,
        },
        BlockData::Html { lines, .. } => Block::HtmlBlock { lines },
        BlockData::ThematicBreak { line } => Block::ThematicBreak { line },
        BlockData::LinkRefDef { definition, lines } => {
            Block::LinkReferenceDefinition { definition, lines }
        }
        BlockData::BlankLine { line } => Block::BlankLine { line },
        BlockData::Custom(state) => state.finish(children),
    };
    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineBuilder;
    use crate::text::split_lines;

    fn single_line(text: &str) -> (Arc<str>, Line) {
        let source: Arc<str> = Arc::from(text);
        let mut lines = split_lines(&source);
        (source.clone(), lines.remove(0))
    }

    #[test]
    fn parse_indent_expands_tabs() {
        let pipeline = PipelineBuilder::new().build();
        let (source, line) = single_line("\tfoo");
        let mut processor = BlockProcessor::new(&pipeline, source);
        processor.begin_line(&line);
        processor.parse_indent();
        assert_eq!(processor.column(), 4);
        assert_eq!(processor.current_char(), 'f');
        assert!(processor.is_code_indent());
    }

    #[test]
    fn parse_indent_mixed_spaces_and_tabs() {
        let pipeline = PipelineBuilder::new().build();
        let (source, line) = single_line("  \t x");
        let mut processor = BlockProcessor::new(&pipeline, source);
        processor.begin_line(&line);
        processor.parse_indent();
        // 2 spaces, tab to column 4, one more space.
        assert_eq!(processor.column(), 5);
        assert_eq!(processor.current_char(), 'x');
    }

    #[test]
    fn go_to_column_lands_inside_a_tab() {
        let pipeline = PipelineBuilder::new().build();
        let (source, line) = single_line("\tfoo");
        let mut processor = BlockProcessor::new(&pipeline, source);
        processor.begin_line(&line);
        processor.go_to_column(2);
        assert_eq!(processor.column(), 2);
        assert_eq!(processor.current_char(), '\t');
        let captured = processor.capture_line(processor.line().clone(), processor.column());
        assert_eq!(captured.lead_spaces, 2);
        assert_eq!(captured.slice.as_str(), "foo");
        assert_eq!(captured.content(), "  foo");
    }

    #[test]
    fn go_to_column_rewinds_within_the_indent_run() {
        let pipeline = PipelineBuilder::new().build();
        let (source, line) = single_line("    foo");
        let mut processor = BlockProcessor::new(&pipeline, source);
        processor.begin_line(&line);
        processor.parse_indent();
        assert_eq!(processor.column(), 4);
        processor.go_to_column(2);
        assert_eq!(processor.column(), 2);
        assert_eq!(processor.current_char(), ' ');
    }

    #[test]
    fn skip_one_column_splits_a_tab() {
        let pipeline = PipelineBuilder::new().build();
        let (source, line) = single_line("\tx");
        let mut processor = BlockProcessor::new(&pipeline, source);
        processor.begin_line(&line);
        processor.skip_one_column();
        assert_eq!(processor.column(), 1);
        // The tab still has columns to give, so the cursor stays on it.
        assert_eq!(processor.current_char(), '\t');
        processor.skip_one_column();
        processor.skip_one_column();
        processor.skip_one_column();
        assert_eq!(processor.column(), 4);
        assert_eq!(processor.current_char(), 'x');
    }

    #[test]
    fn blank_line_detection_ignores_trailing_whitespace() {
        let pipeline = PipelineBuilder::new().build();
        let (source, line) = single_line("  \t ");
        let mut processor = BlockProcessor::new(&pipeline, source);
        processor.begin_line(&line);
        assert!(processor.is_blank_line());
    }
}
