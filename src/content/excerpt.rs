//! Plain-text excerpts from markdown bodies

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Marker separating the excerpt from the rest of a post
pub const MORE_MARKER: &str = "<!-- more -->";

/// Derive a plain-text preview from a markdown body.
///
/// Uses everything before [`MORE_MARKER`] when present, otherwise the first
/// paragraph. The result is whitespace-collapsed and at most `max_chars`
/// characters long, counting the `…` that marks a cut.
pub fn extract_excerpt(markdown: &str, max_chars: usize) -> String {
    let text = match markdown.find(MORE_MARKER) {
        Some(pos) => plain_text(&markdown[..pos]),
        None => first_paragraph(markdown),
    };
    truncate(&text, max_chars)
}

fn parser(markdown: &str) -> Parser<'_> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION;
    Parser::new_ext(markdown, options)
}

fn plain_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in parser(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell,
            ) => text.push(' '),
            _ => {}
        }
    }

    collapse_whitespace(&text)
}

fn first_paragraph(markdown: &str) -> String {
    let mut text = String::new();
    let mut in_paragraph = false;

    for event in parser(markdown) {
        match event {
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                if !text.trim().is_empty() {
                    break;
                }
            }
            Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }

    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if text.chars().nth(max_chars).is_none() {
        return text.to_string();
    }
    // leave room for the ellipsis
    let cut = text
        .char_indices()
        .nth(max_chars - 1)
        .map_or(text.len(), |(i, _)| i);
    format!("{}…", text[..cut].trim_end())
}
