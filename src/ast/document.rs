use std::collections::HashMap;
use std::sync::Arc;

use crate::ast::block::Block;

/// A link reference definition: `[label]: destination "title"`.
///
/// Definitions are collected while paragraphs close during block parsing and
/// consulted by the inline processor for reference-style and shortcut links.
/// They live for the whole document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkReferenceDefinition {
    /// Normalized label (case-folded, inner whitespace collapsed).
    pub label: String,
    pub dest: String,
    pub title: Option<String>,
}

/// Normalize a link label for map lookup: trim, collapse whitespace runs to
/// a single space, case-fold.
pub fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_space = false;
    for c in label.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        for lower in c.to_lowercase() {
            out.push(lower);
        }
    }
    out
}

/// The parsed document: root of the block tree.
#[derive(Clone, Debug)]
pub struct Document {
    /// The source buffer every slice in the tree points into.
    pub source: Arc<str>,
    pub children: Vec<Block>,
    /// Definitions keyed by normalized label; the first definition of a
    /// label wins.
    pub link_references: HashMap<String, LinkReferenceDefinition>,
    /// Whether trivia (blank lines, newline styles, definition lines) was
    /// tracked; required for byte-exact roundtrip rendering.
    pub trivia: bool,
}

impl Document {
    /// Depth-first walk over every block in document order.
    pub fn walk(&self, f: &mut impl FnMut(&Block)) {
        fn visit(blocks: &[Block], f: &mut impl FnMut(&Block)) {
            for block in blocks {
                f(block);
                visit(block.children(), f);
            }
        }
        visit(&self.children, f);
    }

    /// All headings in document order, e.g. for building a table of
    /// contents.
    pub fn headings(&self) -> Vec<&Block> {
        let mut out = Vec::new();
        fn visit<'a>(blocks: &'a [Block], out: &mut Vec<&'a Block>) {
            for block in blocks {
                if matches!(block, Block::Heading { .. }) {
                    out.push(block);
                }
                visit(block.children(), out);
            }
        }
        visit(&self.children, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_normalization() {
        assert_eq!(normalize_label("Foo"), "foo");
        assert_eq!(normalize_label("  ФОО  бар "), "фоо бар");
        assert_eq!(normalize_label("a\t\n b"), "a b");
    }
}
