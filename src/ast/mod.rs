pub mod block;
pub mod custom;
pub mod document;
pub mod inline;

pub use block::Block;
pub use custom::{CustomBlock, CustomInline};
pub use document::{Document, LinkReferenceDefinition, normalize_label};
pub use inline::Inline;

/// A byte range into the source buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}
