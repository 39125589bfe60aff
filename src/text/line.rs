use std::sync::Arc;

use super::slice::TextSlice;

/// The newline style that terminated a physical line. Preserved per line so
/// the roundtrip renderer can reproduce the source byte-for-byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Newline {
    /// Last line of the buffer, no terminator.
    #[default]
    None,
    Lf,
    Cr,
    CrLf,
}

impl Newline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::None => "",
            Newline::Lf => "\n",
            Newline::Cr => "\r",
            Newline::CrLf => "\r\n",
        }
    }
}

/// One physical source line as captured by the block processor.
///
/// `slice` is the content view: it starts after whatever container markers
/// and indentation were consumed for the owning block. `line_start` and
/// `line_end` always delimit the whole physical line (markers included) so
/// trivia-aware rendering can re-emit it untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub slice: TextSlice,
    pub newline: Newline,
    pub line_start: usize,
    pub line_end: usize,
    /// Columns owed by a tab that was split by column positioning: when the
    /// content starts in the middle of a tab's expansion, this many spaces
    /// stand in for the unconsumed part of the tab.
    pub lead_spaces: usize,
}

impl Line {
    pub fn is_blank(&self) -> bool {
        self.lead_spaces == 0 && self.slice.as_str().chars().all(|c| c == ' ' || c == '\t')
    }

    /// Content with owed tab spaces applied. Allocates only when spaces are
    /// owed.
    pub fn content(&self) -> String {
        if self.lead_spaces == 0 {
            self.slice.as_str().to_string()
        } else {
            let mut s = " ".repeat(self.lead_spaces);
            s.push_str(self.slice.as_str());
            s
        }
    }
}

/// Split a source buffer into physical lines, tagging each with its newline
/// style. The content slice initially covers the whole line; the block
/// processor narrows it as markers are consumed.
pub fn split_lines(text: &Arc<str>) -> Vec<Line> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(make_line(text, start, i, Newline::Lf));
                i += 1;
                start = i;
            }
            b'\r' => {
                let newline = if bytes.get(i + 1) == Some(&b'\n') {
                    Newline::CrLf
                } else {
                    Newline::Cr
                };
                lines.push(make_line(text, start, i, newline));
                i += newline.as_str().len();
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(make_line(text, start, bytes.len(), Newline::None));
    }
    lines
}

fn make_line(text: &Arc<str>, start: usize, end: usize, newline: Newline) -> Line {
    Line {
        slice: TextSlice::new(text.clone(), start, end),
        newline,
        line_start: start,
        line_end: end,
        lead_spaces: 0,
    }
}
