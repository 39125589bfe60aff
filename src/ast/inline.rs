use std::sync::Arc;

use crate::ast::custom::CustomInline;
use crate::text::TextSlice;

/// Inline level nodes within a leaf block's content.
///
/// Literal runs are zero-copy slices of the source buffer; only content
/// that cannot exist in the source (decoded entities, normalized code span
/// text) is rehomed into owned storage.
///
/// The unresolved delimiter nodes used by the inline processor are a
/// private scan-buffer representation; they can never appear here.
#[derive(Clone, Debug)]
pub enum Inline {
    Text(TextSlice),
    /// A code span; newlines are already collapsed to spaces per the
    /// CommonMark code span rules.
    Code(String),
    /// Raw inline HTML, uninterpreted.
    Html(TextSlice),
    Autolink {
        url: String,
        email: bool,
    },
    SoftBreak,
    HardBreak,
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Link {
        dest: String,
        title: String,
        children: Vec<Inline>,
    },
    Image {
        dest: String,
        title: String,
        children: Vec<Inline>,
    },
    Custom(Arc<dyn CustomInline>),
}

impl Inline {
    pub fn children(&self) -> &[Inline] {
        match self {
            Inline::Emphasis(children) | Inline::Strong(children) => children,
            Inline::Link { children, .. } | Inline::Image { children, .. } => children,
            Inline::Custom(c) => c.children(),
            _ => &[],
        }
    }

    /// The plain text of this inline subtree, links and emphasis unwrapped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_plain_text(&mut out);
        out
    }

    fn collect_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text(s) => out.push_str(s.as_str()),
            Inline::Code(s) => out.push_str(s),
            Inline::Html(_) => {}
            Inline::Autolink { url, .. } => out.push_str(url),
            Inline::SoftBreak | Inline::HardBreak => out.push('\n'),
            _ => {
                for child in self.children() {
                    child.collect_plain_text(out);
                }
            }
        }
    }
}
