//! Pipeline configuration and the frozen parser tables.
//!
//! A [`PipelineBuilder`] is where extensions add, reorder or replace
//! parsers; [`build`](PipelineBuilder::build) freezes the registries into
//! per-trigger-character lookup tables. A built [`Pipeline`] is immutable
//! and can be shared across threads and parses.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ast::Document;
use crate::parser::blocks::{
    FencedCodeParser, HeadingParser, HtmlBlockParser, IndentedCodeParser, ListParser,
    ParagraphParser, QuoteParser, ThematicBreakParser,
};
use crate::parser::inlines::{
    AutolinkParser, CodeSpanParser, EmphasisParser, EntityParser, EscapeParser, HtmlInlineParser,
    LineBreakParser, LinkParser,
};
use crate::parser::registry::Registry;
use crate::parser::{BlockParser, BlockProcessor, InlineParser};
use crate::text::split_lines;

/// A packaged set of pipeline changes, the unit extensions ship as.
pub trait Extension {
    fn setup(&self, builder: &mut PipelineBuilder);
}

/// Mutable pipeline configuration.
pub struct PipelineBuilder {
    pub block_parsers: Registry<dyn BlockParser>,
    pub inline_parsers: Registry<dyn InlineParser>,
    track_trivia: bool,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        PipelineBuilder::new()
    }
}

impl PipelineBuilder {
    /// A builder preloaded with the CommonMark parsers in their standard
    /// order.
    pub fn new() -> Self {
        let mut block_parsers: Registry<dyn BlockParser> = Registry::default();
        let mut inline_parsers: Registry<dyn InlineParser> = Registry::default();
        // These registrations cannot collide on an empty registry.
        let _ = block_parsers.register(ThematicBreakParser);
        let _ = block_parsers.register(HeadingParser);
        let _ = block_parsers.register(QuoteParser);
        let _ = block_parsers.register(ListParser);
        let _ = block_parsers.register(HtmlBlockParser);
        let _ = block_parsers.register(FencedCodeParser);
        let _ = block_parsers.register(IndentedCodeParser);
        let _ = block_parsers.register(ParagraphParser);

        let _ = inline_parsers.register(EscapeParser);
        let _ = inline_parsers.register(EntityParser);
        let _ = inline_parsers.register(CodeSpanParser);
        let _ = inline_parsers.register(AutolinkParser);
        let _ = inline_parsers.register(HtmlInlineParser);
        let _ = inline_parsers.register(LinkParser);
        let _ = inline_parsers.register(EmphasisParser);
        let _ = inline_parsers.register(LineBreakParser);

        PipelineBuilder {
            block_parsers,
            inline_parsers,
            track_trivia: false,
        }
    }

    /// An empty builder with no parsers at all; even paragraphs need to be
    /// registered by hand.
    pub fn bare() -> Self {
        PipelineBuilder {
            block_parsers: Registry::default(),
            inline_parsers: Registry::default(),
            track_trivia: false,
        }
    }

    /// Record blank lines, newline styles and definition lines in the
    /// tree, which byte-exact roundtrip rendering requires.
    pub fn track_trivia(mut self, enabled: bool) -> Self {
        self.track_trivia = enabled;
        self
    }

    pub fn use_extension(mut self, extension: impl Extension) -> Self {
        extension.setup(&mut self);
        self
    }

    /// Freeze the configuration into an immutable pipeline.
    pub fn build(self) -> Pipeline {
        let block_parsers: Vec<Arc<dyn BlockParser>> =
            self.block_parsers.iter().cloned().collect();
        let mut block_by_char: HashMap<char, Vec<usize>> = HashMap::new();
        let mut block_global = Vec::new();
        let mut paragraph = None;
        for (index, parser) in block_parsers.iter().enumerate() {
            let chars = parser.opening_characters();
            if chars.is_empty() {
                block_global.push(index);
            } else {
                for &c in chars {
                    block_by_char.entry(c).or_default().push(index);
                }
            }
            if parser.is_paragraph_parser() && paragraph.is_none() {
                paragraph = Some(index);
            }
        }

        let inline_parsers: Vec<Arc<dyn InlineParser>> =
            self.inline_parsers.iter().cloned().collect();
        let mut inline_by_char: HashMap<char, Vec<usize>> = HashMap::new();
        for (index, parser) in inline_parsers.iter().enumerate() {
            for &c in parser.trigger_characters() {
                inline_by_char.entry(c).or_default().push(index);
            }
        }

        Pipeline {
            block_parsers,
            block_by_char,
            block_global,
            paragraph,
            inline_parsers,
            inline_by_char,
            track_trivia: self.track_trivia,
        }
    }
}

/// An immutable, shareable parsing configuration.
pub struct Pipeline {
    block_parsers: Vec<Arc<dyn BlockParser>>,
    block_by_char: HashMap<char, Vec<usize>>,
    block_global: Vec<usize>,
    paragraph: Option<usize>,
    inline_parsers: Vec<Arc<dyn InlineParser>>,
    inline_by_char: HashMap<char, Vec<usize>>,
    track_trivia: bool,
}

impl Pipeline {
    /// Parse a whole buffer into a document tree.
    pub fn parse(&self, text: &str) -> Document {
        let source: Arc<str> = Arc::from(text);
        let mut processor = BlockProcessor::new(self, source.clone());
        for line in split_lines(&source) {
            processor.process_line(&line);
        }
        processor.finish()
    }

    pub(crate) fn block_parser(&self, index: usize) -> &Arc<dyn BlockParser> {
        &self.block_parsers[index]
    }

    pub(crate) fn block_parsers_for(&self, c: char) -> &[usize] {
        self.block_by_char
            .get(&c)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn global_block_parsers(&self) -> &[usize] {
        &self.block_global
    }

    pub(crate) fn paragraph_parser(&self) -> Option<usize> {
        self.paragraph
    }

    pub(crate) fn inline_parser(&self, index: usize) -> &Arc<dyn InlineParser> {
        &self.inline_parsers[index]
    }

    pub(crate) fn inline_parsers_for(&self, c: char) -> &[usize] {
        self.inline_by_char
            .get(&c)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn track_trivia(&self) -> bool {
        self.track_trivia
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    struct Noop;
    impl BlockParser for Noop {
        fn try_open(&self, _processor: &mut BlockProcessor) -> crate::parser::BlockState {
            crate::parser::BlockState::None
        }
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut builder = PipelineBuilder::new();
        assert!(builder.block_parsers.register(Noop).is_ok());
        assert_eq!(
            builder.block_parsers.register(Noop),
            Err(PipelineError::DuplicateParser(std::any::type_name::<Noop>()))
        );
    }

    #[test]
    fn relative_insertion_orders_parsers() {
        let mut builder = PipelineBuilder::new();
        builder
            .block_parsers
            .insert_before::<HeadingParser, Noop>(Noop)
            .unwrap();
        let pipeline = builder.build();
        // Noop takes the slot right before the heading parser.
        assert!(pipeline.block_parsers.len() > 2);
    }

    #[test]
    fn unknown_anchor_is_reported() {
        struct Ghost;
        impl BlockParser for Ghost {
            fn try_open(&self, _p: &mut BlockProcessor) -> crate::parser::BlockState {
                crate::parser::BlockState::None
            }
        }
        let mut builder = PipelineBuilder::bare();
        let result = builder.block_parsers.insert_after::<Ghost, Noop>(Noop);
        assert_eq!(
            result,
            Err(PipelineError::UnknownParser(std::any::type_name::<Ghost>()))
        );
    }
}
