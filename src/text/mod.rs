pub mod column;
pub mod line;
pub mod slice;

pub use column::{TAB_STOP, add_tab, is_across_tab, is_punctuation, is_space_or_tab, is_whitespace};
pub use line::{Line, Newline, split_lines};
pub use slice::TextSlice;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn slice(s: &str) -> TextSlice {
        let text: Arc<str> = Arc::from(s);
        let end = text.len();
        TextSlice::new(text, 0, end)
    }

    #[test]
    fn cursor_consumption() {
        let mut s = slice("abc");
        assert_eq!(s.current_char(), 'a');
        assert_eq!(s.next_char(), 'b');
        assert_eq!(s.peek_char(1), 'c');
        assert_eq!(s.next_char(), 'c');
        assert_eq!(s.next_char(), '\0');
        assert_eq!(s.current_char(), '\0');
    }

    #[test]
    fn count_and_skip_runs() {
        let mut s = slice("###rest");
        assert_eq!(s.count_and_skip('#'), 3);
        assert_eq!(s.as_str(), "rest");
        assert_eq!(s.count_and_skip('#'), 0);
    }

    #[test]
    fn trim_both_ends() {
        let mut s = slice("  \tcontent \t ");
        s.trim();
        assert_eq!(s.as_str(), "content");
    }

    #[test]
    fn multibyte_cursor() {
        let mut s = slice("héllo");
        assert_eq!(s.next_char(), 'é');
        assert_eq!(s.next_char(), 'l');
    }

    #[test]
    fn newline_styles_are_tagged() {
        let text: Arc<str> = Arc::from("a\nb\r\nc\rd");
        let lines = split_lines(&text);
        let kinds: Vec<Newline> = lines.iter().map(|l| l.newline).collect();
        assert_eq!(
            kinds,
            vec![Newline::Lf, Newline::CrLf, Newline::Cr, Newline::None]
        );
        let texts: Vec<&str> = lines.iter().map(|l| l.slice.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn blank_line_detection() {
        let text: Arc<str> = Arc::from(" \t\nx");
        let lines = split_lines(&text);
        assert!(lines[0].is_blank());
        assert!(!lines[1].is_blank());
    }
}
