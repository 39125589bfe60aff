use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use super::column::is_space_or_tab;

/// An immutable, zero-copy view over a range of a shared source buffer.
///
/// Cloning a slice clones an `Arc`, never the text, so slices can be handed
/// to tree nodes freely: every node keeps the buffer alive for as long as
/// the tree exists. Offsets are byte offsets; all cursor operations are
/// char-aware. `'\0'` is the end-of-slice sentinel.
#[derive(Clone, Debug)]
pub struct TextSlice {
    text: Arc<str>,
    start: usize,
    end: usize,
}

impl TextSlice {
    pub fn new(text: Arc<str>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= text.len());
        TextSlice { text, start, end }
    }

    /// A slice over a fresh, owned buffer. Used when content has to be
    /// rehomed (entity decoding, synthesized text); everything else stays
    /// backed by the source.
    pub fn owned(s: impl Into<String>) -> Self {
        let text: Arc<str> = Arc::from(s.into());
        let end = text.len();
        TextSlice { text, start: 0, end }
    }

    pub fn empty() -> Self {
        TextSlice {
            text: Arc::from(""),
            start: 0,
            end: 0,
        }
    }

    pub fn text(&self) -> &Arc<str> {
        &self.text
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn set_start(&mut self, start: usize) {
        debug_assert!(start <= self.end);
        self.start = start;
    }

    pub fn set_end(&mut self, end: usize) {
        debug_assert!(end >= self.start);
        self.end = end;
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn as_str(&self) -> &str {
        &self.text[self.start..self.end]
    }

    /// A sub-slice sharing the same buffer.
    pub fn reslice(&self, start: usize, end: usize) -> TextSlice {
        TextSlice::new(self.text.clone(), start, end)
    }

    /// The character under the cursor, `'\0'` at end.
    pub fn current_char(&self) -> char {
        if self.start < self.end {
            self.text[self.start..].chars().next().unwrap_or('\0')
        } else {
            '\0'
        }
    }

    /// Advance one character and return the new current character.
    pub fn next_char(&mut self) -> char {
        let c = self.current_char();
        if c != '\0' {
            self.start += c.len_utf8();
        }
        self.current_char()
    }

    /// Advance one character without looking at the result.
    pub fn skip(&mut self) {
        let c = self.current_char();
        if c != '\0' {
            self.start += c.len_utf8();
        }
    }

    /// Peek `offset` characters past the cursor; `peek_char(0)` is the
    /// current character.
    pub fn peek_char(&self, offset: usize) -> char {
        self.as_str().chars().nth(offset).unwrap_or('\0')
    }

    /// Count and consume a run of `c`, returning the run length.
    pub fn count_and_skip(&mut self, c: char) -> usize {
        let mut count = 0;
        while self.current_char() == c {
            count += 1;
            self.skip();
        }
        count
    }

    pub fn trim_start(&mut self) {
        while is_space_or_tab(self.current_char()) {
            self.skip();
        }
    }

    pub fn trim_end(&mut self) {
        while self.start < self.end {
            let c = self.text[..self.end].chars().next_back().unwrap_or('\0');
            if !is_space_or_tab(c) {
                break;
            }
            self.end -= c.len_utf8();
        }
    }

    pub fn trim(&mut self) {
        self.trim_start();
        self.trim_end();
    }
}

impl Display for TextSlice {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for TextSlice {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TextSlice {}
