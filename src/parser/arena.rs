//! Index arena for in-progress blocks.
//!
//! While the block processor runs, blocks need parent links, an open flag
//! and in-place mutation from parser callbacks; an index arena gives all of
//! that without back-pointers. Once parsing finishes the arena is frozen
//! into the public [`Block`](crate::ast::Block) tree.

use crate::ast::{Block, LinkReferenceDefinition, Span};
use crate::text::Line;

/// Handle to a block in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockId(pub(crate) usize);

/// Per-kind payload of an in-progress block.
#[derive(Debug)]
pub enum BlockData {
    Document,
    Quote,
    List(ListData),
    ListItem(ListItemData),
    Paragraph {
        lines: Vec<Line>,
    },
    Heading {
        level: u8,
        setext: bool,
        lines: Vec<Line>,
        underline: Option<Line>,
    },
    IndentedCode {
        lines: Vec<Line>,
    },
    FencedCode(FencedCodeData),
    Html {
        kind: crate::parser::blocks::html::HtmlKind,
        lines: Vec<Line>,
    },
    ThematicBreak {
        line: Line,
    },
    LinkRefDef {
        definition: LinkReferenceDefinition,
        lines: Vec<Line>,
    },
    BlankLine {
        line: Line,
    },
    Custom(Box<dyn CustomBlockState>),
}

/// In-progress state of an extension-provided block.
///
/// A custom block parser allocates one of these in `try_open`, downcasts it
/// back through `any_mut` on continuation, and turns it into a finished
/// [`Block`] when the arena is frozen.
pub trait CustomBlockState: Send + std::fmt::Debug {
    fn any_mut(&mut self) -> &mut dyn std::any::Any;

    /// Whether the block accepts child blocks.
    fn is_container(&self) -> bool {
        false
    }

    /// The buffer processed lines get appended into, for leaf-style custom
    /// blocks.
    fn lines_mut(&mut self) -> Option<&mut Vec<Line>> {
        None
    }

    /// Produce the finished tree node. `children` is empty for leaves.
    fn finish(self: Box<Self>, children: Vec<Block>) -> Block;
}

#[derive(Debug)]
pub struct ListData {
    pub ordered: bool,
    pub start: u64,
    /// Bullet char for unordered lists, `.`/`)` delimiter for ordered ones.
    pub marker: char,
    pub loose: bool,
    /// A blank line was seen while the list was in scope; the next
    /// continuation turns it into looseness.
    pub pending_blank: bool,
}

#[derive(Debug)]
pub struct ListItemData {
    /// Absolute column where the item's content starts; continuation lines
    /// must be indented at least this far.
    pub content_column: usize,
    /// The item started with a blank marker line.
    pub opened_with_blank: bool,
}

#[derive(Debug)]
pub struct FencedCodeData {
    pub fence: char,
    pub count: usize,
    /// Indentation column of the opening fence; up to this many columns are
    /// stripped from every content line.
    pub indent_column: usize,
    pub info: Option<String>,
    pub lines: Vec<Line>,
    pub opening: Line,
    pub closing: Option<Line>,
}

impl BlockData {
    pub fn is_container(&self) -> bool {
        match self {
            BlockData::Document | BlockData::Quote | BlockData::List(_) | BlockData::ListItem(_) => {
                true
            }
            BlockData::Custom(state) => state.is_container(),
            _ => false,
        }
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_container()
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, BlockData::Paragraph { .. })
    }

    /// The line buffer a processed line gets appended into, for leaves that
    /// accumulate lines.
    pub fn lines_mut(&mut self) -> Option<&mut Vec<Line>> {
        match self {
            BlockData::Paragraph { lines }
            | BlockData::Heading { lines, .. }
            | BlockData::IndentedCode { lines }
            | BlockData::Html { lines, .. } => Some(lines),
            BlockData::FencedCode(data) => Some(&mut data.lines),
            BlockData::Custom(state) => state.lines_mut(),
            BlockData::ThematicBreak { .. }
            | BlockData::LinkRefDef { .. }
            | BlockData::BlankLine { .. }
            | BlockData::Document
            | BlockData::Quote
            | BlockData::List(_)
            | BlockData::ListItem(_) => None,
        }
    }
}

/// One arena node: tree links, bookkeeping shared by every block kind, and
/// the kind-specific payload.
#[derive(Debug)]
pub struct BlockNode {
    pub parent: Option<BlockId>,
    pub children: Vec<BlockId>,
    pub span: Span,
    /// Column at which the block started.
    pub column: usize,
    /// Whether the block is still extendable by further lines.
    pub is_open: bool,
    /// Registry index of the parser that created the block, for
    /// continuation and close callbacks.
    pub parser: usize,
    pub data: BlockData,
}

#[derive(Debug, Default)]
pub struct BlockArena {
    nodes: Vec<BlockNode>,
}

impl BlockArena {
    pub fn new() -> Self {
        BlockArena::default()
    }

    pub fn alloc(&mut self, node: BlockNode) -> BlockId {
        let id = BlockId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: BlockId) -> &BlockNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: BlockId) -> &mut BlockNode {
        &mut self.nodes[id.0]
    }

    /// Attach `child` as the last child of `parent`.
    pub fn attach(&mut self, parent: BlockId, child: BlockId) {
        debug_assert!(self.get(parent).data.is_container());
        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.push(child);
    }

    /// Attach `child` into `parent` just before `before`.
    pub fn attach_before(&mut self, parent: BlockId, child: BlockId, before: BlockId) {
        self.get_mut(child).parent = Some(parent);
        let children = &mut self.get_mut(parent).children;
        let at = children.iter().position(|&c| c == before).unwrap_or(children.len());
        children.insert(at, child);
    }

    /// Detach a block from its parent; the node itself stays allocated (the
    /// arena is dropped wholesale at the end of the parse).
    pub fn detach(&mut self, id: BlockId) {
        if let Some(parent) = self.get(id).parent {
            let children = &mut self.get_mut(parent).children;
            children.retain(|&c| c != id);
            self.get_mut(id).parent = None;
        }
    }

    /// Take the payload, leaving a placeholder. Used while freezing the
    /// arena into the public tree.
    pub fn take_data(&mut self, id: BlockId) -> BlockData {
        std::mem::replace(&mut self.get_mut(id).data, BlockData::Document)
    }

    pub fn take_children(&mut self, id: BlockId) -> Vec<BlockId> {
        std::mem::take(&mut self.get_mut(id).children)
    }
}
