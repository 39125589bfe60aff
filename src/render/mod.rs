//! Renderers over the parsed document tree.
//!
//! Three outputs from the same tree: [`html`] produces the CommonMark
//! reference HTML, [`normalize`] re-emits canonical Markdown, and
//! [`roundtrip`] reproduces the original source byte-for-byte from a
//! trivia-tracked parse.

pub mod html;
pub mod normalize;
pub mod roundtrip;

pub use html::to_html;
pub use normalize::normalize;
pub use roundtrip::roundtrip;
