//! Minimal markdown rendering for advanced-mode responses.
//!
//! The remote service answers in markdown; the history panel wants plain
//! terminal text with a little ANSI emphasis. Anything not handled here
//! degrades to its inner text.

use crossterm::style::Attribute;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Render a markdown string to terminal text.
pub fn render_markdown(input: &str) -> String {
    let mut out = String::new();
    let mut list_depth = 0usize;

    for event in Parser::new(input) {
        match event {
            Event::Start(Tag::Heading { .. }) | Event::Start(Tag::Strong) => {
                out.push_str(&Attribute::Bold.to_string());
            }
            Event::End(TagEnd::Heading(_)) => {
                out.push_str(&Attribute::NormalIntensity.to_string());
                out.push('\n');
            }
            Event::End(TagEnd::Strong) => {
                out.push_str(&Attribute::NormalIntensity.to_string());
            }
            Event::Start(Tag::Emphasis) => out.push_str(&Attribute::Italic.to_string()),
            Event::End(TagEnd::Emphasis) => out.push_str(&Attribute::NoItalic.to_string()),
            Event::Start(Tag::List(_)) => list_depth += 1,
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                if list_depth == 0 {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                out.push_str(&"  ".repeat(list_depth.saturating_sub(1)));
                out.push_str("• ");
            }
            Event::End(TagEnd::Item) => out.push('\n'),
            Event::Start(Tag::CodeBlock(_)) => out.push('\n'),
            Event::End(TagEnd::CodeBlock) => out.push('\n'),
            Event::End(TagEnd::Paragraph) => out.push('\n'),
            Event::Text(text) => out.push_str(&text),
            Event::Code(code) => {
                out.push('`');
                out.push_str(&code);
                out.push('`');
            }
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(render_markdown("just an answer"), "just an answer");
    }

    #[test]
    fn bold_text_is_emphasized() {
        let rendered = render_markdown("the answer is **4**");
        assert!(rendered.contains("the answer is "));
        assert!(rendered.contains(&Attribute::Bold.to_string()));
        assert!(rendered.contains('4'));
    }

    #[test]
    fn list_items_get_bullets() {
        let rendered = render_markdown("- first\n- second");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "• first");
        assert_eq!(lines[1], "• second");
    }

    #[test]
    fn inline_code_is_backticked() {
        assert_eq!(render_markdown("use `sqrt(2)`"), "use `sqrt(2)`");
    }

    #[test]
    fn paragraphs_separate_into_lines() {
        let rendered = render_markdown("step one\n\nstep two");
        assert_eq!(rendered.lines().count(), 2);
    }
}
