use crate::ast::Inline;
use crate::parser::blocks::html::complete_tag_length;
use crate::parser::{InlineParser, InlineProcessor};

/// `<scheme:...>` and `<user@host>` autolinks.
pub struct AutolinkParser;

impl InlineParser for AutolinkParser {
    fn trigger_characters(&self) -> &[char] {
        &['<']
    }

    fn try_match(&self, processor: &mut InlineProcessor) -> bool {
        let rest = processor.rest();
        let Some(end) = rest[1..].find('>').map(|i| i + 1) else {
            return false;
        };
        let inner = &rest[1..end];
        if inner.is_empty() || inner.chars().any(|c| c.is_whitespace() || c == '<') {
            return false;
        }
        let pos = processor.pos();
        if is_uri(inner) {
            processor.push_inline(Inline::Autolink {
                url: inner.to_string(),
                email: false,
            });
            processor.set_pos(pos + end + 1);
            return true;
        }
        if is_email(inner) {
            processor.push_inline(Inline::Autolink {
                url: inner.to_string(),
                email: true,
            });
            processor.set_pos(pos + end + 1);
            return true;
        }
        false
    }
}

fn is_uri(s: &str) -> bool {
    let Some(colon) = s.find(':') else {
        return false;
    };
    let scheme = &s[..colon];
    let mut chars = scheme.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    if scheme.len() < 2 || scheme.len() > 32 {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

fn is_email(s: &str) -> bool {
    let Some(at) = s.find('@') else {
        return false;
    };
    let (user, host) = (&s[..at], &s[at + 1..]);
    if user.is_empty() || host.is_empty() {
        return false;
    }
    let user_ok = user.chars().all(|c| {
        c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c)
    });
    let host_ok = host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    });
    user_ok && host_ok
}

/// Raw inline HTML: a single tag, comment, processing instruction,
/// declaration or CDATA section, carried through uninterpreted.
pub struct HtmlInlineParser;

impl InlineParser for HtmlInlineParser {
    fn trigger_characters(&self) -> &[char] {
        &['<']
    }

    fn try_match(&self, processor: &mut InlineProcessor) -> bool {
        let rest = processor.rest();
        let Some(len) = inline_html_length(rest) else {
            return false;
        };
        let pos = processor.pos();
        processor.push_inline(Inline::Html(processor.slice(pos, pos + len)));
        processor.set_pos(pos + len);
        true
    }
}

fn inline_html_length(s: &str) -> Option<usize> {
    if let Some(rest) = s.strip_prefix("<!--") {
        // `<!-->` and `<!--->` are not valid comments.
        if rest.starts_with('>') || rest.starts_with("->") {
            return None;
        }
        return rest.find("-->").map(|i| i + 4 + 3);
    }
    if let Some(rest) = s.strip_prefix("<?") {
        return rest.find("?>").map(|i| i + 2 + 2);
    }
    if let Some(rest) = s.strip_prefix("<![CDATA[") {
        return rest.find("]]>").map(|i| i + 9 + 3);
    }
    if s.starts_with("<!") && s[2..].starts_with(|c: char| c.is_ascii_alphabetic()) {
        return s[2..].find('>').map(|i| i + 2 + 1);
    }
    // Unlike the tag forms above, open and closing tags may span a soft
    // line break, but the shared matcher covers the single-line case that
    // dominates in practice.
    complete_tag_length(s)
}
