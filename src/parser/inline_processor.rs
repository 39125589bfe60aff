//! The inline scanner.
//!
//! A leaf's lines are joined into one buffer with `\n` separators and
//! scanned left to right. Trigger characters dispatch to the registered
//! inline parsers; everything else, and every failed match, accumulates as
//! literal text. Emphasis and links leave delimiters behind instead of
//! nodes, resolved at the end by [`process_emphasis`] and at each `]` by
//! the link parser.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ast::{Inline, LinkReferenceDefinition, normalize_label};
use crate::parser::delimiter::{Delimiter, ScanNode, node_to_inline, process_emphasis};
use crate::pipeline::Pipeline;
use crate::text::{Line, TextSlice};

/// Parse the inline content of a paragraph or heading.
pub(crate) fn parse_inlines(
    pipeline: &Pipeline,
    refs: &HashMap<String, LinkReferenceDefinition>,
    lines: &[Line],
) -> Vec<Inline> {
    let mut content = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            content.push('\n');
        }
        let s = line.content();
        if i + 1 == lines.len() {
            content.push_str(s.trim_end_matches([' ', '\t']));
        } else {
            content.push_str(&s);
        }
    }
    InlineProcessor::new(pipeline, refs, Arc::from(content)).run()
}

/// Cursor and output state handed to inline parsers.
pub struct InlineProcessor<'p> {
    pipeline: &'p Pipeline,
    refs: &'p HashMap<String, LinkReferenceDefinition>,
    text: Arc<str>,
    pos: usize,
    pub(crate) scan: Vec<ScanNode>,
}

impl<'p> InlineProcessor<'p> {
    pub(crate) fn new(
        pipeline: &'p Pipeline,
        refs: &'p HashMap<String, LinkReferenceDefinition>,
        text: Arc<str>,
    ) -> Self {
        InlineProcessor {
            pipeline,
            refs,
            text,
            pos: 0,
            scan: Vec::new(),
        }
    }

    pub(crate) fn run(mut self) -> Vec<Inline> {
        let mut text_start = self.pos;
        while self.pos < self.text.len() {
            let c = self.current_char();
            let parsers = self.pipeline.inline_parsers_for(c);
            if parsers.is_empty() {
                self.pos += c.len_utf8();
                continue;
            }
            // Flush pending literal text so parsers see it as the last
            // scan node (the line break parser trims it, for one).
            let mark = self.pos;
            self.flush_text(text_start, mark);
            let mut matched = false;
            for &index in parsers {
                let parser = self.pipeline.inline_parser(index).clone();
                if parser.try_match(&mut self) {
                    matched = true;
                    break;
                }
            }
            if matched {
                debug_assert!(self.pos > mark, "inline parser matched without consuming");
                text_start = self.pos;
            } else {
                self.pos = mark + c.len_utf8();
                text_start = mark;
            }
        }
        self.flush_text(text_start, self.pos);
        process_emphasis(&mut self.scan, 0);
        self.scan.into_iter().map(node_to_inline).collect()
    }

    fn flush_text(&mut self, from: usize, to: usize) {
        if to > from {
            self.scan.push(ScanNode::Node(Inline::Text(TextSlice::new(
                self.text.clone(),
                from,
                to,
            ))));
        }
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    /// The whole inline buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte position of the cursor.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move the cursor; a matching parser must end up past where it
    /// started.
    pub fn set_pos(&mut self, pos: usize) {
        debug_assert!(pos <= self.text.len());
        self.pos = pos;
    }

    /// Unconsumed remainder of the buffer.
    pub fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    pub fn current_char(&self) -> char {
        self.rest().chars().next().unwrap_or('\0')
    }

    pub fn peek_char(&self, offset: usize) -> char {
        self.rest().chars().nth(offset).unwrap_or('\0')
    }

    /// The character just before the cursor; `'\0'` at the start of the
    /// buffer, which flanking rules treat as whitespace.
    pub fn char_before(&self, pos: usize) -> char {
        self.text[..pos].chars().next_back().unwrap_or('\0')
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    pub fn push_inline(&mut self, inline: Inline) {
        self.scan.push(ScanNode::Node(inline));
    }

    pub(crate) fn push_delimiter(&mut self, delimiter: Delimiter) {
        self.scan.push(ScanNode::Delimiter(delimiter));
    }

    /// Zero-copy slice of the inline buffer.
    pub fn slice(&self, start: usize, end: usize) -> TextSlice {
        TextSlice::new(self.text.clone(), start, end)
    }

    /// Look up a link reference definition by raw label.
    pub fn link_reference(&self, label: &str) -> Option<&LinkReferenceDefinition> {
        self.refs.get(&normalize_label(label))
    }
}
