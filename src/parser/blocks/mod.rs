//! Built-in block parsers, in their default registration order:
//! thematic break, ATX heading, quote, list, HTML, fenced code for the
//! marker characters, then indented code and paragraph as the global
//! fallbacks.

pub mod fenced_code;
pub mod heading;
pub mod html;
pub mod indented_code;
pub mod list;
pub mod paragraph;
pub mod quote;
pub mod thematic_break;

pub use fenced_code::FencedCodeParser;
pub use heading::HeadingParser;
pub use html::HtmlBlockParser;
pub use indented_code::IndentedCodeParser;
pub use list::ListParser;
pub use paragraph::ParagraphParser;
pub use quote::QuoteParser;
pub use thematic_break::ThematicBreakParser;
