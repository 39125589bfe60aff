use crate::parser::delimiter::{Delimiter, DelimiterKind};
use crate::parser::{InlineParser, InlineProcessor};
use crate::text::column::{is_punctuation, is_whitespace};

/// `*` and `_` delimiter runs. Nothing is resolved here; the run is
/// classified by the flanking rules and pushed as a delimiter for
/// [`process_emphasis`](crate::parser::delimiter::process_emphasis).
pub struct EmphasisParser;

impl InlineParser for EmphasisParser {
    fn trigger_characters(&self) -> &[char] {
        &['*', '_']
    }

    fn try_match(&self, processor: &mut InlineProcessor) -> bool {
        let marker = processor.current_char();
        let pos = processor.pos();
        let count = processor
            .rest()
            .chars()
            .take_while(|&c| c == marker)
            .count();

        let before = processor.char_before(pos);
        let after = processor.peek_char(count);

        let next_is_ws = is_whitespace(after);
        let next_is_punct = is_punctuation(after);
        let prev_is_ws = is_whitespace(before);
        let prev_is_punct = is_punctuation(before);

        let left_flanking = !next_is_ws && (!next_is_punct || prev_is_ws || prev_is_punct);
        let right_flanking = !prev_is_ws && (!prev_is_punct || next_is_ws || next_is_punct);

        let (can_open, can_close) = if marker == '_' {
            // `_` does not work intraword.
            (
                left_flanking && (!right_flanking || prev_is_punct),
                right_flanking && (!left_flanking || next_is_punct),
            )
        } else {
            (left_flanking, right_flanking)
        };

        processor.push_delimiter(Delimiter {
            kind: DelimiterKind::Emphasis(marker),
            count,
            can_open,
            can_close,
            content_start: pos + count,
        });
        processor.set_pos(pos + count);
        true
    }
}
