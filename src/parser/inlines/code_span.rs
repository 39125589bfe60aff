use crate::ast::Inline;
use crate::parser::{InlineParser, InlineProcessor};

/// Backtick code spans. The closing run must have exactly the opening
/// run's length; an unclosed run is literal text. Content newlines become
/// spaces, and one space is stripped from both ends when it is padding.
pub struct CodeSpanParser;

impl InlineParser for CodeSpanParser {
    fn trigger_characters(&self) -> &[char] {
        &['`']
    }

    fn try_match(&self, processor: &mut InlineProcessor) -> bool {
        let rest = processor.rest();
        let open = rest.bytes().take_while(|&b| b == b'`').count();
        let pos = processor.pos();

        let mut i = open;
        let bytes = rest.as_bytes();
        let close_at = loop {
            if i >= bytes.len() {
                break None;
            }
            if bytes[i] == b'`' {
                let mut run = 0;
                while i + run < bytes.len() && bytes[i + run] == b'`' {
                    run += 1;
                }
                if run == open {
                    break Some(i);
                }
                i += run;
            } else {
                i += 1;
            }
        };

        let Some(close_at) = close_at else {
            // No closer: the whole opening run is literal.
            let run = processor.slice(pos, pos + open);
            processor.push_inline(Inline::Text(run));
            processor.set_pos(pos + open);
            return true;
        };

        let mut content: String = rest[open..close_at]
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let padded = content.starts_with(' ')
            && content.ends_with(' ')
            && content.bytes().any(|b| b != b' ');
        if padded {
            content.pop();
            content.remove(0);
        }
        processor.push_inline(Inline::Code(content));
        processor.set_pos(pos + close_at + open);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Inline;
    use crate::pipeline::PipelineBuilder;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn parse(text: &str) -> Vec<Inline> {
        let pipeline = PipelineBuilder::new().build();
        let refs = HashMap::new();
        crate::parser::inline_processor::InlineProcessor::new(&pipeline, &refs, Arc::from(text))
            .run()
    }

    #[test]
    fn basic_span() {
        let inlines = parse("a `b` c");
        assert!(matches!(&inlines[1], Inline::Code(s) if s == "b"));
    }

    #[test]
    fn padding_is_stripped_once() {
        let inlines = parse("` `` `");
        assert!(matches!(&inlines[0], Inline::Code(s) if s == "``"));
    }

    #[test]
    fn all_space_content_keeps_its_spaces() {
        let inlines = parse("`  `");
        assert!(matches!(&inlines[0], Inline::Code(s) if s == "  "));
    }

    #[test]
    fn mismatched_runs_stay_literal() {
        let inlines = parse("``x`");
        assert!(matches!(&inlines[0], Inline::Text(_)));
    }

    #[test]
    fn newline_becomes_space() {
        let inlines = parse("`a\nb`");
        assert!(matches!(&inlines[0], Inline::Code(s) if s == "a b"));
    }
}
