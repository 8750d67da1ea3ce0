//! Constrained-markdown renderer for transcript messages.
//!
//! Pure and deterministic: the same input always yields the same blocks.
//! The input is HTML-escaped before any span substitution, so literal
//! markup in a message can never inject tags; only the four supported
//! spans (bold, italic, inline code, line break) produce HTML.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// Bold runs before italic so a `**` pair is never split by the single-`*`
// rule; inline code runs on the result of both.
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.*?)`").unwrap());
static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());

/// One rendered paragraph unit.
///
/// `list_item` marks paragraphs starting with a numbered-list pattern
/// (`<digits>.`), which the client lays out without paragraph spacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBlock {
    pub list_item: bool,
    pub html: String,
}

/// Render message content into display blocks, one per paragraph.
pub fn render_markdown(text: &str) -> Vec<RenderedBlock> {
    text.split("\n\n").map(render_paragraph).collect()
}

fn render_paragraph(paragraph: &str) -> RenderedBlock {
    let escaped = escape_html(paragraph);
    let bold = BOLD_RE.replace_all(&escaped, "<strong>$1</strong>");
    let italic = ITALIC_RE.replace_all(&bold, "<em>$1</em>");
    let code = CODE_RE.replace_all(&italic, "<code>$1</code>");
    let html = code.replace('\n', "<br />");
    let list_item = NUMBERED_RE.is_match(html.trim_start());

    RenderedBlock { list_item, html }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_paragraphs_on_double_newline() {
        let blocks = render_markdown("first paragraph\n\nsecond paragraph");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].html, "first paragraph");
        assert_eq!(blocks[1].html, "second paragraph");
    }

    #[test]
    fn bold_italic_and_code_spans_transform() {
        let blocks = render_markdown("**bold** and *italic* and `code`");
        assert_eq!(
            blocks[0].html,
            "<strong>bold</strong> and <em>italic</em> and <code>code</code>"
        );
    }

    #[test]
    fn bold_wins_over_italic() {
        // The longer-match rule: a `**` pair must not be split into two
        // italic delimiters.
        let blocks = render_markdown("**Keywords**: climate, policy");
        assert_eq!(blocks[0].html, "<strong>Keywords</strong>: climate, policy");
    }

    #[test]
    fn single_newlines_become_line_breaks() {
        let blocks = render_markdown("line one\nline two");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].html, "line one<br />line two");
    }

    #[test]
    fn numbered_paragraphs_are_list_items() {
        let blocks = render_markdown("1. first point\n\nplain closing paragraph");
        assert!(blocks[0].list_item);
        assert!(!blocks[1].list_item);
    }

    #[test]
    fn literal_markup_is_escaped_while_spans_still_transform() {
        let blocks = render_markdown("<script>alert(1)</script> with **bold** and `code`");
        let html = &blocks[0].html;
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn ampersands_escape_before_entities() {
        let blocks = render_markdown("AT&T &lt; already escaped");
        assert_eq!(blocks[0].html, "AT&amp;T &amp;lt; already escaped");
    }

    #[test]
    fn rendering_is_deterministic() {
        let input = "**Keywords**: climate, policy\n\n1. a\n2. b";
        assert_eq!(render_markdown(input), render_markdown(input));
    }
}
