//! CommonMark conformance over the HTML renderer, one construct per test.

use pretty_assertions::assert_eq;
use tidemark::to_html;

#[test]
fn paragraphs_and_soft_breaks() {
    assert_eq!(to_html("hello\n"), "<p>hello</p>\n");
    assert_eq!(to_html("line one\nline two\n"), "<p>line one\nline two</p>\n");
    assert_eq!(to_html("one\n\ntwo\n"), "<p>one</p>\n<p>two</p>\n");
}

#[test]
fn paragraph_without_trailing_newline() {
    assert_eq!(to_html("hello"), "<p>hello</p>\n");
}

#[test]
fn leading_paragraph_whitespace_is_dropped() {
    assert_eq!(to_html("  hello\n   world\n"), "<p>hello\nworld</p>\n");
}

#[test]
fn atx_headings() {
    assert_eq!(to_html("# one\n"), "<h1>one</h1>\n");
    assert_eq!(to_html("###### six\n"), "<h6>six</h6>\n");
    assert_eq!(to_html("####### seven\n"), "<p>####### seven</p>\n");
    assert_eq!(to_html("#hash\n"), "<p>#hash</p>\n");
    assert_eq!(to_html("# closed ##\n"), "<h1>closed</h1>\n");
    assert_eq!(to_html("# empty #\n"), "<h1>empty</h1>\n");
}

#[test]
fn setext_headings() {
    assert_eq!(to_html("Title\n=====\n"), "<h1>Title</h1>\n");
    assert_eq!(to_html("Title\n-\n"), "<h2>Title</h2>\n");
    assert_eq!(
        to_html("multi\nline\n---\n"),
        "<h2>multi\nline</h2>\n"
    );
}

#[test]
fn thematic_breaks() {
    assert_eq!(to_html("***\n"), "<hr />\n");
    assert_eq!(to_html("---\n"), "<hr />\n");
    assert_eq!(to_html("_ _ _\n"), "<hr />\n");
    assert_eq!(to_html("**\n"), "<p>**</p>\n");
}

#[test]
fn setext_underline_beats_thematic_break() {
    assert_eq!(to_html("Foo\n---\n"), "<h2>Foo</h2>\n");
}

#[test]
fn thematic_break_after_quote_is_not_setext() {
    // The paragraph inside the quote cannot be underlined from outside it.
    assert_eq!(
        to_html("> foo\n---\n"),
        "<blockquote>\n<p>foo</p>\n</blockquote>\n<hr />\n"
    );
}

#[test]
fn block_quotes() {
    assert_eq!(to_html("> quoted\n"), "<blockquote>\n<p>quoted</p>\n</blockquote>\n");
    assert_eq!(
        to_html("> a\n> b\n"),
        "<blockquote>\n<p>a\nb</p>\n</blockquote>\n"
    );
    assert_eq!(
        to_html("> outer\n> > inner\n"),
        "<blockquote>\n<p>outer</p>\n<blockquote>\n<p>inner</p>\n</blockquote>\n</blockquote>\n"
    );
}

#[test]
fn lazy_quote_continuation() {
    assert_eq!(
        to_html("> foo\nbar\n"),
        "<blockquote>\n<p>foo\nbar</p>\n</blockquote>\n"
    );
}

#[test]
fn quote_with_tab_marker_gap() {
    // The tab after `>` expands from the marker column; two columns of it
    // are left over and count toward the code indent.
    assert_eq!(
        to_html(">\t\tfoo\n"),
        "<blockquote>\n<pre><code>  foo\n</code></pre>\n</blockquote>\n"
    );
}

#[test]
fn tight_list() {
    assert_eq!(
        to_html("- a\n- b\n"),
        "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n"
    );
}

#[test]
fn loose_list() {
    assert_eq!(
        to_html("- a\n\n- b\n"),
        "<ul>\n<li>\n<p>a</p>\n</li>\n<li>\n<p>b</p>\n</li>\n</ul>\n"
    );
}

#[test]
fn ordered_list_start() {
    assert_eq!(
        to_html("3. a\n4. b\n"),
        "<ol start=\"3\">\n<li>a</li>\n<li>b</li>\n</ol>\n"
    );
    assert_eq!(to_html("1. a\n"), "<ol>\n<li>a</li>\n</ol>\n");
}

#[test]
fn nested_list() {
    assert_eq!(
        to_html("- a\n  - b\n"),
        "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n</ul>\n"
    );
}

#[test]
fn ordered_sibling_items() {
    // A marker after an un-continued item is a sibling, not a paragraph
    // interruption, so any ordinal is allowed.
    assert_eq!(to_html("1. i\n2. j\n"), "<ol>\n<li>i</li>\n<li>j</li>\n</ol>\n");
    assert_eq!(
        to_html("> 3. a\n> 4. b\n"),
        "<blockquote>\n<ol start=\"3\">\n<li>a</li>\n<li>b</li>\n</ol>\n</blockquote>\n"
    );
}

#[test]
fn changing_bullet_starts_a_new_list() {
    assert_eq!(
        to_html("- a\n* b\n"),
        "<ul>\n<li>a</li>\n</ul>\n<ul>\n<li>b</li>\n</ul>\n"
    );
}

#[test]
fn list_item_with_continuation_paragraph() {
    assert_eq!(
        to_html("- a\n\n  b\n"),
        "<ul>\n<li>\n<p>a</p>\n<p>b</p>\n</li>\n</ul>\n"
    );
}

#[test]
fn list_interrupting_paragraph() {
    assert_eq!(
        to_html("foo\n- bar\n"),
        "<p>foo</p>\n<ul>\n<li>bar</li>\n</ul>\n"
    );
    assert_eq!(
        to_html("foo\n1. bar\n"),
        "<p>foo</p>\n<ol>\n<li>bar</li>\n</ol>\n"
    );
    // Only ordinal 1 may interrupt.
    assert_eq!(to_html("foo\n2. bar\n"), "<p>foo\n2. bar</p>\n");
}

#[test]
fn indented_code() {
    assert_eq!(to_html("    code\n"), "<pre><code>code\n</code></pre>\n");
    assert_eq!(
        to_html("    a\n\n    b\n"),
        "<pre><code>a\n\nb\n</code></pre>\n"
    );
}

#[test]
fn indented_code_cannot_interrupt_a_paragraph() {
    assert_eq!(to_html("foo\n    bar\n"), "<p>foo\nbar</p>\n");
}

#[test]
fn fenced_code() {
    assert_eq!(
        to_html("```\ncode\n```\n"),
        "<pre><code>code\n</code></pre>\n"
    );
    assert_eq!(
        to_html("```rust\nfn main() {}\n```\n"),
        "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
    );
    // Unclosed fences run to the end of the container.
    assert_eq!(to_html("```\ncode\n"), "<pre><code>code\n</code></pre>\n");
}

#[test]
fn fenced_code_keeps_blank_lines_without_loosening_lists() {
    assert_eq!(
        to_html("- ```\n  a\n\n  b\n  ```\n- x\n"),
        "<ul>\n<li>\n<pre><code>a\n\nb\n</code></pre>\n</li>\n<li>x</li>\n</ul>\n"
    );
}

#[test]
fn html_block_passthrough() {
    assert_eq!(to_html("<div>\nfoo\n</div>\n"), "<div>\nfoo\n</div>\n");
    assert_eq!(to_html("<!-- note -->\n"), "<!-- note -->\n");
}

#[test]
fn emphasis_and_strong() {
    assert_eq!(to_html("*em*\n"), "<p><em>em</em></p>\n");
    assert_eq!(to_html("**strong**\n"), "<p><strong>strong</strong></p>\n");
    assert_eq!(
        to_html("***both***\n"),
        "<p><em><strong>both</strong></em></p>\n"
    );
    assert_eq!(to_html("a_b_c\n"), "<p>a_b_c</p>\n");
    assert_eq!(to_html("*unclosed\n"), "<p>*unclosed</p>\n");
}

#[test]
fn code_spans() {
    assert_eq!(to_html("`code`\n"), "<p><code>code</code></p>\n");
    assert_eq!(
        to_html("``with ` tick``\n"),
        "<p><code>with ` tick</code></p>\n"
    );
    assert_eq!(to_html("` padded `\n"), "<p><code>padded</code></p>\n");
    assert_eq!(to_html("`unclosed\n"), "<p>`unclosed</p>\n");
}

#[test]
fn escapes() {
    assert_eq!(to_html("\\*not em\\*\n"), "<p>*not em*</p>\n");
    assert_eq!(to_html("\\# not heading\n"), "<p># not heading</p>\n");
    // A backslash before a non-punctuation char stays literal.
    assert_eq!(to_html("\\a\n"), "<p>\\a</p>\n");
}

#[test]
fn entities() {
    assert_eq!(to_html("&amp; &copy;\n"), "<p>&amp; ©</p>\n");
    assert_eq!(to_html("&#65;\n"), "<p>A</p>\n");
    assert_eq!(to_html("&#x3C;\n"), "<p>&lt;</p>\n");
    assert_eq!(to_html("&unknown;\n"), "<p>&amp;unknown;</p>\n");
}

#[test]
fn autolinks() {
    assert_eq!(
        to_html("<http://x.y/z>\n"),
        "<p><a href=\"http://x.y/z\">http://x.y/z</a></p>\n"
    );
    assert_eq!(
        to_html("<me@example.com>\n"),
        "<p><a href=\"mailto:me@example.com\">me@example.com</a></p>\n"
    );
    // No scheme, no tag name: falls through to literal text.
    assert_eq!(to_html("<33>\n"), "<p>&lt;33&gt;</p>\n");
    assert_eq!(to_html("a < spaced>\n"), "<p>a &lt; spaced&gt;</p>\n");
}

#[test]
fn inline_html() {
    assert_eq!(to_html("a <b>x</b>\n"), "<p>a <b>x</b></p>\n");
    assert_eq!(to_html("a <kbd attr=\"v\">\n"), "<p>a <kbd attr=\"v\"></p>\n");
}

#[test]
fn inline_links() {
    assert_eq!(
        to_html("[x](/url)\n"),
        "<p><a href=\"/url\">x</a></p>\n"
    );
    assert_eq!(
        to_html("[x](/url \"title\")\n"),
        "<p><a href=\"/url\" title=\"title\">x</a></p>\n"
    );
    assert_eq!(
        to_html("[x](<my url>)\n"),
        "<p><a href=\"my%20url\">x</a></p>\n"
    );
    assert_eq!(to_html("[x](/url\n"), "<p>[x](/url</p>\n");
}

#[test]
fn reference_links() {
    assert_eq!(
        to_html("[foo]\n\n[foo]: /url\n"),
        "<p><a href=\"/url\">foo</a></p>\n"
    );
    assert_eq!(
        to_html("[Foo][]\n\n[foo]: /url \"t\"\n"),
        "<p><a href=\"/url\" title=\"t\">Foo</a></p>\n"
    );
    assert_eq!(
        to_html("[text][label]\n\n[label]: /url\n"),
        "<p><a href=\"/url\">text</a></p>\n"
    );
    assert_eq!(to_html("[none]\n"), "<p>[none]</p>\n");
}

#[test]
fn definition_only_paragraph_vanishes() {
    assert_eq!(to_html("[a]: /one\n[b]: /two\n"), "");
}

#[test]
fn first_definition_wins() {
    assert_eq!(
        to_html("[foo]\n\n[foo]: /first\n\n[foo]: /second\n"),
        "<p><a href=\"/first\">foo</a></p>\n"
    );
}

#[test]
fn images() {
    assert_eq!(
        to_html("![alt](/img.png)\n"),
        "<p><img src=\"/img.png\" alt=\"alt\" /></p>\n"
    );
    assert_eq!(
        to_html("![*em* alt](/i)\n"),
        "<p><img src=\"/i\" alt=\"em alt\" /></p>\n"
    );
}

#[test]
fn links_do_not_nest() {
    assert_eq!(
        to_html("[a [b](/inner) c](/outer)\n"),
        "<p>[a <a href=\"/inner\">b</a> c](/outer)</p>\n"
    );
}

#[test]
fn line_breaks() {
    assert_eq!(to_html("a  \nb\n"), "<p>a<br />\nb</p>\n");
    assert_eq!(to_html("a\\\nb\n"), "<p>a<br />\nb</p>\n");
    assert_eq!(to_html("a \nb\n"), "<p>a\nb</p>\n");
}

#[test]
fn link_reference_label_is_case_folded() {
    assert_eq!(
        to_html("[ФОО]\n\n[фоо]: /url\n"),
        "<p><a href=\"/url\">ФОО</a></p>\n"
    );
}

#[test]
fn quote_containing_list() {
    assert_eq!(
        to_html("> - a\n> - b\n"),
        "<blockquote>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n</blockquote>\n"
    );
}

#[test]
fn crlf_input_parses_like_lf() {
    assert_eq!(to_html("# a\r\n\r\nb\r\n"), "<h1>a</h1>\n<p>b</p>\n");
}
