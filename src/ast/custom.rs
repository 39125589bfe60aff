//! User-custom nodes support.
//!
//! Extensions can place their own node types in the tree. Renderers that do
//! not know a custom node fall back to visiting its `children()` generically,
//! so new node kinds render reasonably even without a dedicated renderer.

use std::fmt::Debug;

use crate::ast::block::Block;
use crate::ast::inline::Inline;
use crate::text::Line;

/// A user-defined block node.
pub trait CustomBlock: Debug + Send + Sync {
    /// Stable name of the node kind, used for dispatch and diagnostics.
    fn name(&self) -> &'static str;

    /// Child blocks visited by the generic renderer fallback.
    fn children(&self) -> &[Block] {
        &[]
    }

    /// Physical source lines of a custom leaf, consulted by the roundtrip
    /// renderer.
    fn lines(&self) -> &[Line] {
        &[]
    }

    /// Direct Markdown rendering, used by the normalize renderer when
    /// provided.
    fn to_markdown(&self) -> Option<String> {
        None
    }

    /// Direct HTML rendering, used by the HTML renderer when provided.
    fn to_html(&self) -> Option<String> {
        None
    }
}

/// A user-defined inline node.
pub trait CustomInline: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn children(&self) -> &[Inline] {
        &[]
    }

    fn to_markdown(&self) -> Option<String> {
        None
    }

    fn to_html(&self) -> Option<String> {
        None
    }
}
