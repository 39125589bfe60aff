//! An extensible CommonMark compiler with round-trip fidelity.
//!
//! Parsing is line-streamed: the block processor consumes one physical line
//! at a time, maintaining the chain of open blocks, and inline content is
//! resolved when leaf blocks freeze into the final tree. Every construct is
//! a parser registered in a [`Pipeline`]; extensions add, reorder or
//! replace parsers through the [`PipelineBuilder`] registries and can put
//! their own node types in the tree.
//!
//! ```
//! let html = tidemark::to_html("# Heading\n\nSome *text*.\n");
//! assert_eq!(html, "<h1>Heading</h1>\n<p>Some <em>text</em>.</p>\n");
//! ```
//!
//! For repeated parsing share one [`Pipeline`] (or a
//! [`ParserPool`](parser::ParserPool)) instead of going through the
//! conveniences below, and enable
//! [`track_trivia`](PipelineBuilder::track_trivia) when byte-exact
//! [`render::roundtrip`] output is needed.

pub mod ast;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod text;

pub use ast::{Block, Document, Inline};
pub use error::{PipelineError, RenderError};
pub use pipeline::{Extension, Pipeline, PipelineBuilder};

use once_cell::sync::Lazy;

static DEFAULT_PIPELINE: Lazy<Pipeline> = Lazy::new(|| PipelineBuilder::new().build());

/// Parse with the default CommonMark pipeline.
pub fn parse(text: &str) -> Document {
    DEFAULT_PIPELINE.parse(text)
}

/// Parse and render HTML with the default CommonMark pipeline.
pub fn to_html(text: &str) -> String {
    render::to_html(&parse(text))
}

/// Parse and re-emit canonical Markdown with the default CommonMark
/// pipeline.
pub fn normalize(text: &str) -> String {
    render::normalize(&parse(text))
}
