//! Tab-stop and character-class arithmetic.
//!
//! CommonMark defines all indentation rules against rendered columns, not
//! character offsets: a space is one column, a tab advances to the next
//! multiple-of-4 column boundary. Everything indentation-sensitive in the
//! block processor goes through these helpers.

/// Width of a tab stop.
pub const TAB_STOP: usize = 4;

/// Advance `column` past a tab: the next multiple-of-4 boundary.
#[inline]
pub fn add_tab(column: usize) -> usize {
    (column / TAB_STOP + 1) * TAB_STOP
}

/// Whether `column` sits strictly inside a tab's expansion (not on a stop).
#[inline]
pub fn is_across_tab(column: usize) -> bool {
    column % TAB_STOP != 0
}

#[inline]
pub fn is_space_or_tab(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Whitespace for the purposes of inline flanking rules. End-of-text and
/// line boundaries count as whitespace and are represented with `'\0'` /
/// `'\n'` by the callers.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    c == '\0' || c.is_whitespace()
}

/// Punctuation class used by the flanking rules. The full Unicode
/// punctuation categories are table data; the ASCII set covers the
/// delimiter semantics the processors decide on.
#[inline]
pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_stops() {
        assert_eq!(add_tab(0), 4);
        assert_eq!(add_tab(1), 4);
        assert_eq!(add_tab(3), 4);
        assert_eq!(add_tab(4), 8);
        assert_eq!(add_tab(5), 8);
    }

    #[test]
    fn across_tab() {
        assert!(!is_across_tab(0));
        assert!(is_across_tab(1));
        assert!(is_across_tab(3));
        assert!(!is_across_tab(8));
    }
}
