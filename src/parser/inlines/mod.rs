//! Built-in inline parsers. Triggered by character; anything unclaimed
//! becomes literal text, so malformed constructs degrade instead of
//! failing.

pub mod autolink;
pub mod code_span;
pub mod emphasis;
pub mod entity;
pub mod escape;
pub mod line_break;
pub mod link;

pub use autolink::{AutolinkParser, HtmlInlineParser};
pub use code_span::CodeSpanParser;
pub use emphasis::EmphasisParser;
pub use entity::EntityParser;
pub use escape::EscapeParser;
pub use line_break::LineBreakParser;
pub use link::LinkParser;
