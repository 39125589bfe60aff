//! Pipeline extensibility: custom block and inline nodes, registry
//! ordering, and the `Extension` packaging trait.

use std::any::Any;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tidemark::ast::{Block, CustomBlock, CustomInline};
use tidemark::parser::{
    BlockData, BlockId, BlockParser, BlockProcessor, BlockState, CustomBlockState, InlineParser,
    InlineProcessor,
};
use tidemark::text::Line;
use tidemark::{Extension, Inline, PipelineBuilder};

/// A leaf block: consecutive lines starting with `!!`.
#[derive(Debug)]
struct CalloutState {
    lines: Vec<Line>,
}

impl CustomBlockState for CalloutState {
    fn any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn lines_mut(&mut self) -> Option<&mut Vec<Line>> {
        Some(&mut self.lines)
    }

    fn finish(self: Box<Self>, _children: Vec<Block>) -> Block {
        let text = self
            .lines
            .iter()
            .map(|l| l.content())
            .collect::<Vec<_>>()
            .join("\n");
        Block::Custom(Arc::new(Callout {
            text,
            lines: self.lines,
        }))
    }
}

#[derive(Debug)]
struct Callout {
    text: String,
    lines: Vec<Line>,
}

impl CustomBlock for Callout {
    fn name(&self) -> &'static str {
        "callout"
    }

    fn to_html(&self) -> Option<String> {
        Some(format!("<aside>{}</aside>\n", self.text))
    }

    fn lines(&self) -> &[Line] {
        &self.lines
    }
}

struct CalloutParser;

impl CalloutParser {
    fn eat_marker(processor: &mut BlockProcessor) -> bool {
        if processor.current_char() != '!' || processor.peek_char(1) != '!' {
            return false;
        }
        processor.next_char();
        processor.next_char();
        if processor.current_char() == ' ' {
            processor.next_char();
        }
        true
    }
}

impl BlockParser for CalloutParser {
    fn opening_characters(&self) -> &[char] {
        &['!']
    }

    fn try_open(&self, processor: &mut BlockProcessor) -> BlockState {
        if processor.is_code_indent() || !Self::eat_marker(processor) {
            return BlockState::None;
        }
        processor.push_block(
            BlockData::Custom(Box::new(CalloutState { lines: Vec::new() })),
            processor.column(),
        );
        BlockState::Continue
    }

    fn try_continue(&self, processor: &mut BlockProcessor, _block: BlockId) -> BlockState {
        if processor.is_blank_line() || !Self::eat_marker(processor) {
            return BlockState::None;
        }
        BlockState::Continue
    }
}

/// `@name` mentions as a custom inline node.
#[derive(Debug)]
struct Mention {
    name: String,
}

impl CustomInline for Mention {
    fn name(&self) -> &'static str {
        "mention"
    }

    fn to_html(&self) -> Option<String> {
        Some(format!("<span class=\"mention\">@{}</span>", self.name))
    }
}

struct MentionParser;

impl InlineParser for MentionParser {
    fn trigger_characters(&self) -> &[char] {
        &['@']
    }

    fn try_match(&self, processor: &mut InlineProcessor) -> bool {
        let start = processor.pos();
        let name: String = processor.rest()[1..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        if name.is_empty() {
            return false;
        }
        let end = start + 1 + name.len();
        processor.push_inline(Inline::Custom(Arc::new(Mention { name })));
        processor.set_pos(end);
        true
    }
}

struct CalloutExtension;

impl Extension for CalloutExtension {
    fn setup(&self, builder: &mut PipelineBuilder) {
        builder.block_parsers.register(CalloutParser).unwrap();
        builder.inline_parsers.register(MentionParser).unwrap();
    }
}

#[test]
fn custom_block_renders_its_own_html() {
    let pipeline = PipelineBuilder::new().use_extension(CalloutExtension).build();
    let doc = pipeline.parse("!! watch out\n!! second line\n");
    assert_eq!(
        tidemark::render::to_html(&doc),
        "<aside>watch out\nsecond line</aside>\n"
    );
}

#[test]
fn custom_block_interrupts_a_paragraph() {
    let pipeline = PipelineBuilder::new().use_extension(CalloutExtension).build();
    let doc = pipeline.parse("text\n!! note\n");
    assert_eq!(
        tidemark::render::to_html(&doc),
        "<p>text</p>\n<aside>note</aside>\n"
    );
}

#[test]
fn custom_block_roundtrips_through_its_lines() {
    let pipeline = PipelineBuilder::new()
        .use_extension(CalloutExtension)
        .track_trivia(true)
        .build();
    let source = "before\n\n!! kept verbatim\n!!   spacing too\n\nafter\n";
    let doc = pipeline.parse(source);
    assert_eq!(tidemark::render::roundtrip(&doc).unwrap(), source);
}

#[test]
fn custom_inline_node() {
    let pipeline = PipelineBuilder::new().use_extension(CalloutExtension).build();
    let doc = pipeline.parse("hi @alice!\n");
    assert_eq!(
        tidemark::render::to_html(&doc),
        "<p>hi <span class=\"mention\">@alice</span>!</p>\n"
    );
}

#[test]
fn unmatched_trigger_falls_back_to_literal_text() {
    let pipeline = PipelineBuilder::new().use_extension(CalloutExtension).build();
    let doc = pipeline.parse("mail @ example\n");
    assert_eq!(tidemark::render::to_html(&doc), "<p>mail @ example</p>\n");
}

/// Claims `---` lines ahead of the thematic break parser.
struct DashParser;

impl BlockParser for DashParser {
    fn opening_characters(&self) -> &[char] {
        &['-']
    }

    fn try_open(&self, processor: &mut BlockProcessor) -> BlockState {
        if processor.line().as_str().trim_end() != "---" {
            return BlockState::None;
        }
        while processor.current_char() != '\0' {
            processor.next_char();
        }
        processor.push_block(
            BlockData::Custom(Box::new(DashState)),
            processor.column(),
        );
        BlockState::BreakDiscard
    }
}

#[derive(Debug)]
struct DashState;

impl CustomBlockState for DashState {
    fn any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn finish(self: Box<Self>, _children: Vec<Block>) -> Block {
        Block::Custom(Arc::new(DashBlock))
    }
}

#[derive(Debug)]
struct DashBlock;

impl CustomBlock for DashBlock {
    fn name(&self) -> &'static str {
        "dash"
    }

    fn to_html(&self) -> Option<String> {
        Some("<hr class=\"dash\" />\n".to_string())
    }
}

#[test]
fn insert_before_takes_priority_over_the_anchor() {
    use tidemark::parser::blocks::ThematicBreakParser;

    let mut builder = PipelineBuilder::new();
    builder
        .block_parsers
        .insert_before::<ThematicBreakParser, DashParser>(DashParser)
        .unwrap();
    let doc = builder.build().parse("---\n\n***\n");
    assert_eq!(
        tidemark::render::to_html(&doc),
        "<hr class=\"dash\" />\n<hr />\n"
    );
}

/// Stands in for the thematic break parser without matching anything.
struct InertBreakParser;

impl BlockParser for InertBreakParser {
    fn opening_characters(&self) -> &[char] {
        &['*', '-', '_']
    }

    fn try_open(&self, _processor: &mut BlockProcessor) -> BlockState {
        BlockState::None
    }
}

#[test]
fn replace_swaps_a_parser_in_place() {
    use tidemark::parser::blocks::ThematicBreakParser;

    let mut builder = PipelineBuilder::new();
    builder
        .block_parsers
        .replace::<ThematicBreakParser, InertBreakParser>(InertBreakParser)
        .unwrap();
    let doc = builder.build().parse("***\n");
    assert_eq!(tidemark::render::to_html(&doc), "<p>***</p>\n");
}

#[test]
fn duplicate_and_unknown_registrations_error() {
    use tidemark::PipelineError;
    use tidemark::parser::blocks::ThematicBreakParser;

    let mut builder = PipelineBuilder::new();
    assert!(matches!(
        builder.block_parsers.register(ThematicBreakParser),
        Err(PipelineError::DuplicateParser(_))
    ));
    let mut bare = PipelineBuilder::bare();
    assert!(matches!(
        bare.block_parsers
            .insert_after::<ThematicBreakParser, DashParser>(DashParser),
        Err(PipelineError::UnknownParser(_))
    ));
}
