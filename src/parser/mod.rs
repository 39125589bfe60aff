//! The two-phase parsing pipeline: block processor and inline processor.

pub mod arena;
pub mod block_processor;
pub mod blocks;
pub mod delimiter;
pub mod inline_processor;
pub mod inlines;
pub mod link_ref;
pub mod pool;
pub mod registry;
pub mod state;

pub use arena::{BlockArena, BlockData, BlockId, BlockNode, CustomBlockState};
pub use block_processor::{BlockProcessor, MAX_NESTING};
pub use inline_processor::InlineProcessor;
pub use pool::{MarkdownParser, ParserPool};
pub use state::BlockState;

/// A block-construct matcher, registered in the pipeline's ordered block
/// registry.
///
/// Parsers are stateless and shared; all per-parse state lives on the
/// [`BlockProcessor`] and in the arena node the parser created. A parser
/// must not panic on input — panics signal a broken extension, not bad
/// Markdown.
pub trait BlockParser: Send + Sync + 'static {
    /// Characters that can trigger `try_open`. An empty set registers the
    /// parser as a global (fallback) parser, tried after character-specific
    /// ones.
    fn opening_characters(&self) -> &[char] {
        &[]
    }

    /// Whether this parser may interrupt the currently open block. Checked
    /// before `try_open`; the current block is available through
    /// [`BlockProcessor::current_block_data`].
    fn can_interrupt(&self, _processor: &BlockProcessor) -> bool {
        true
    }

    /// Try to start a new block at the current line position. Matching
    /// parsers push one or more blocks through
    /// [`BlockProcessor::push_block`], deepest-last.
    fn try_open(&self, processor: &mut BlockProcessor) -> BlockState;

    /// Try to extend an open block with the current line.
    fn try_continue(&self, _processor: &mut BlockProcessor, _block: BlockId) -> BlockState {
        BlockState::None
    }

    /// Called when the block closes. Returning `false` vetoes the block: it
    /// is discarded and detached from its parent.
    fn close(&self, _processor: &mut BlockProcessor, _block: BlockId) -> bool {
        true
    }

    /// Notification after a block closed and was accepted.
    fn closed(&self, _processor: &mut BlockProcessor, _block: BlockId) {}

    /// Marks the parser handling otherwise-unmatched lines. The processor
    /// routes lazy continuations through it, so exactly one registered
    /// parser should return `true`.
    fn is_paragraph_parser(&self) -> bool {
        false
    }
}

/// An inline-construct matcher, keyed by trigger character.
///
/// `try_match` consumes from the processor's cursor and appends scan nodes;
/// returning `false` leaves the cursor untouched and falls through to the
/// next parser (ultimately the literal fallback).
pub trait InlineParser: Send + Sync + 'static {
    fn trigger_characters(&self) -> &[char];

    fn try_match(&self, processor: &mut InlineProcessor) -> bool;
}
