use std::sync::Arc;

use crate::ast::Span;
use crate::ast::custom::CustomBlock;
use crate::ast::document::LinkReferenceDefinition;
use crate::ast::inline::Inline;
use crate::text::Line;

/// Block level nodes of the document tree.
///
/// Leaf variants keep the physical [`Line`]s they were built from in
/// addition to their parsed inline content, so the tree can serve HTML
/// rendering, normalization and byte-exact roundtrip from the same parse.
#[derive(Clone, Debug)]
pub enum Block {
    Paragraph {
        inlines: Vec<Inline>,
        lines: Vec<Line>,
    },
    Heading {
        /// 1 through 6.
        level: u8,
        /// Signalled by a following `=`/`-` underline instead of leading `#`.
        setext: bool,
        inlines: Vec<Inline>,
        lines: Vec<Line>,
        /// The setext underline line, when `setext` is set.
        underline: Option<Line>,
    },
    Quote {
        children: Vec<Block>,
    },
    List {
        ordered: bool,
        /// Start number for ordered lists, 1 otherwise.
        start: u64,
        /// Bullet char for unordered lists, the `.`/`)` delimiter for
        /// ordered ones.
        marker: char,
        loose: bool,
        items: Vec<Block>,
    },
    ListItem {
        children: Vec<Block>,
    },
    IndentedCode {
        lines: Vec<Line>,
    },
    FencedCode {
        fence: char,
        info: Option<String>,
        lines: Vec<Line>,
        opening: Line,
        closing: Option<Line>,
    },
    HtmlBlock {
        lines: Vec<Line>,
    },
    ThematicBreak {
        line: Line,
    },
    /// A side output: registered into the document map at parse time and
    /// kept in the tree only so trivia-aware rendering can reproduce its
    /// source lines.
    LinkReferenceDefinition {
        definition: LinkReferenceDefinition,
        lines: Vec<Line>,
    },
    /// Trivia: a blank source line, present only when trivia tracking is
    /// enabled.
    BlankLine {
        line: Line,
    },
    /// An extension-provided node; renders through the generic fallback
    /// unless the node supplies its own output.
    Custom(Arc<dyn CustomBlock>),
}

impl Block {
    pub fn children(&self) -> &[Block] {
        match self {
            Block::Quote { children } | Block::ListItem { children } => children,
            Block::List { items, .. } => items,
            Block::Custom(c) => c.children(),
            _ => &[],
        }
    }

    pub fn inlines(&self) -> &[Inline] {
        match self {
            Block::Paragraph { inlines, .. } | Block::Heading { inlines, .. } => inlines,
            _ => &[],
        }
    }

    /// The source range this block covers, when it is derivable from the
    /// captured lines.
    pub fn span(&self) -> Option<Span> {
        fn lines_span(lines: &[Line]) -> Option<Span> {
            let first = lines.first()?;
            let last = lines.last()?;
            Some(Span::new(first.line_start, last.line_end))
        }
        match self {
            Block::Paragraph { lines, .. }
            | Block::IndentedCode { lines }
            | Block::HtmlBlock { lines }
            | Block::LinkReferenceDefinition { lines, .. } => lines_span(lines),
            Block::Heading {
                lines, underline, ..
            } => {
                let mut span = lines_span(lines)?;
                if let Some(u) = underline {
                    span = span.cover(Span::new(u.line_start, u.line_end));
                }
                Some(span)
            }
            Block::FencedCode {
                opening, closing, ..
            } => {
                let mut span = Span::new(opening.line_start, opening.line_end);
                if let Some(c) = closing {
                    span = span.cover(Span::new(c.line_start, c.line_end));
                }
                Some(span)
            }
            Block::ThematicBreak { line } | Block::BlankLine { line } => {
                Some(Span::new(line.line_start, line.line_end))
            }
            Block::Quote { children } | Block::ListItem { children } => {
                children.iter().filter_map(Block::span).reduce(Span::cover)
            }
            Block::List { items, .. } => {
                items.iter().filter_map(Block::span).reduce(Span::cover)
            }
            Block::Custom(_) => None,
        }
    }

    /// Trivia nodes carry no content of their own.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Block::BlankLine { .. } | Block::LinkReferenceDefinition { .. }
        )
    }
}
