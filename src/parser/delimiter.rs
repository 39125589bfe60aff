//! Delimiter bookkeeping for emphasis and links.
//!
//! Inline parsing first flattens a paragraph into a list of scan nodes:
//! finished inlines interleaved with unresolved delimiters. Emphasis is
//! resolved over that list closer-by-closer with the rule-of-three
//! restriction; whatever delimiters survive become literal text.

use crate::ast::Inline;
use crate::text::TextSlice;

#[derive(Debug)]
pub(crate) enum ScanNode {
    Node(Inline),
    Delimiter(Delimiter),
}

#[derive(Debug)]
pub(crate) struct Delimiter {
    pub kind: DelimiterKind,
    /// Remaining run length; emphasis runs shrink as they pair up.
    pub count: usize,
    pub can_open: bool,
    pub can_close: bool,
    /// Byte position in the inline text just after the delimiter run.
    pub content_start: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DelimiterKind {
    /// `*` or `_` run.
    Emphasis(char),
    /// `[` or `![`; deactivated openers can no longer form links.
    LinkOpen { image: bool, active: bool },
}

impl Delimiter {
    pub fn literal(&self) -> String {
        match self.kind {
            DelimiterKind::Emphasis(marker) => marker.to_string().repeat(self.count),
            DelimiterKind::LinkOpen { image: true, .. } => "![".to_string(),
            DelimiterKind::LinkOpen { image: false, .. } => "[".to_string(),
        }
    }
}

pub(crate) fn node_to_inline(node: ScanNode) -> Inline {
    match node {
        ScanNode::Node(inline) => inline,
        ScanNode::Delimiter(d) => Inline::Text(TextSlice::owned(d.literal())),
    }
}

/// Resolve `*`/`_` runs into `Emphasis` and `Strong` nodes over
/// `scan[bottom..]`. Link resolution calls this with the opener's position
/// as the bottom so emphasis never crosses a link boundary.
pub(crate) fn process_emphasis(scan: &mut Vec<ScanNode>, bottom: usize) {
    let mut closer = bottom;
    'closers: while closer < scan.len() {
        let (marker, closer_count, closer_can_open) = match &scan[closer] {
            ScanNode::Delimiter(d) if d.can_close && d.count > 0 => match d.kind {
                DelimiterKind::Emphasis(marker) => (marker, d.count, d.can_open),
                _ => {
                    closer += 1;
                    continue;
                }
            },
            _ => {
                closer += 1;
                continue;
            }
        };

        let mut opener = closer;
        let found = loop {
            if opener == bottom {
                break None;
            }
            opener -= 1;
            if let ScanNode::Delimiter(d) = &scan[opener] {
                if let DelimiterKind::Emphasis(m) = d.kind {
                    if m == marker && d.can_open && d.count > 0 {
                        // Rule of three: when one side could serve both
                        // roles, run lengths summing to a multiple of three
                        // cannot pair unless both already are multiples.
                        let forbidden = (closer_can_open || d.can_close)
                            && (d.count + closer_count) % 3 == 0
                            && !(d.count % 3 == 0 && closer_count % 3 == 0);
                        if !forbidden {
                            break Some((opener, d.count));
                        }
                    }
                }
            }
        };
        let Some((opener, opener_count)) = found else {
            closer += 1;
            continue 'closers;
        };

        let strong = opener_count >= 2 && closer_count >= 2;
        let take = if strong { 2 } else { 1 };
        let children: Vec<Inline> = scan
            .drain(opener + 1..closer)
            .map(node_to_inline)
            .collect();
        let node = if strong {
            Inline::Strong(children)
        } else {
            Inline::Emphasis(children)
        };

        if let ScanNode::Delimiter(d) = &mut scan[opener] {
            d.count -= take;
        }
        if let ScanNode::Delimiter(d) = &mut scan[opener + 1] {
            d.count -= take;
        }
        scan.insert(opener + 1, ScanNode::Node(node));

        let mut closer_index = opener + 2;
        if matches!(&scan[opener], ScanNode::Delimiter(d) if d.count == 0) {
            scan.remove(opener);
            closer_index -= 1;
        }
        if matches!(&scan[closer_index], ScanNode::Delimiter(d) if d.count == 0) {
            scan.remove(closer_index);
        }
        closer = closer_index.min(scan.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ScanNode {
        ScanNode::Node(Inline::Text(TextSlice::owned(s)))
    }

    fn emphasis_run(marker: char, count: usize, open: bool, close: bool) -> ScanNode {
        ScanNode::Delimiter(Delimiter {
            kind: DelimiterKind::Emphasis(marker),
            count,
            can_open: open,
            can_close: close,
            content_start: 0,
        })
    }

    #[test]
    fn single_pair_forms_emphasis() {
        let mut scan = vec![emphasis_run('*', 1, true, false), text("hi"), emphasis_run('*', 1, false, true)];
        process_emphasis(&mut scan, 0);
        assert_eq!(scan.len(), 1);
        match &scan[0] {
            ScanNode::Node(Inline::Emphasis(children)) => {
                assert_eq!(children.len(), 1);
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn double_run_forms_strong() {
        let mut scan = vec![emphasis_run('*', 2, true, false), text("hi"), emphasis_run('*', 2, false, true)];
        process_emphasis(&mut scan, 0);
        assert!(matches!(&scan[0], ScanNode::Node(Inline::Strong(_))));
    }

    #[test]
    fn triple_run_nests_emphasis_in_strong() {
        let mut scan = vec![emphasis_run('*', 3, true, false), text("hi"), emphasis_run('*', 3, false, true)];
        process_emphasis(&mut scan, 0);
        // ***hi*** → <em><strong>hi</strong></em> resolved inside-out:
        // strong pairs first, then the remaining singles pair around it.
        assert_eq!(scan.len(), 1);
        match &scan[0] {
            ScanNode::Node(Inline::Emphasis(children)) => {
                assert!(matches!(children[0], Inline::Strong(_)));
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn unmatched_delimiters_stay() {
        let mut scan = vec![emphasis_run('*', 1, true, false), text("hi")];
        process_emphasis(&mut scan, 0);
        assert_eq!(scan.len(), 2);
        assert!(matches!(&scan[0], ScanNode::Delimiter(_)));
    }
}
