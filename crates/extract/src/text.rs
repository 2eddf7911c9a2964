//! Markup stripping, entity decoding and whitespace normalisation shared by
//! the matn and footnote layers.

use std::borrow::Cow;

use regex::Captures;
use scraper::Html;

use crate::consts;

/// Removes decorative inline wrappers, keeping their text.
pub(crate) fn unwrap_decorative(markup: &str) -> Cow<'_, str> {
    consts::DECORATIVE_TAG.replace_all(markup, "")
}

/// Turns explicit `<br>` tags and orphan `</p>` closers into newlines.
pub(crate) fn line_breaks_to_newlines(markup: &str) -> Cow<'_, str> {
    consts::LINE_BREAK_TAG.replace_all(markup, "\n")
}

/// Removes every remaining tag.
pub(crate) fn strip_tags(markup: &str) -> Cow<'_, str> {
    consts::ANY_TAG.replace_all(markup, "")
}

/// Decodes character entities. Unknown named entities are left as they are.
pub(crate) fn decode_entities(text: &str) -> Cow<'_, str> {
    consts::ENTITY.replace_all(text, |caps: &Captures| {
        let decoded = if let Some(decimal) = caps.get(1) {
            decimal.as_str().parse::<u32>().ok().and_then(char::from_u32).map(String::from)
        } else if let Some(hex) = caps.get(2) {
            u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32).map(String::from)
        } else {
            named_entity(&caps[0])
        };
        decoded.unwrap_or_else(|| caps[0].to_string())
    })
}

/// Resolves a named reference with the HTML parser's own entity table.
fn named_entity(reference: &str) -> Option<String> {
    let decoded: String = Html::parse_fragment(reference).root_element().text().collect();
    (!decoded.is_empty() && decoded != reference).then_some(decoded)
}

/// Escapes the three characters that would otherwise be read as markup again.
pub(crate) fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Strips all markup and decodes entities, without touching whitespace.
pub(crate) fn plain_text(markup: &str) -> String {
    decode_entities(&strip_tags(markup)).into_owned()
}

/// Number of non-whitespace characters in a string.
pub(crate) fn visible_len(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Normalises whitespace:
///
/// - `\r\n` and lone `\r` become `\n`,
/// - U+00A0 becomes a regular space,
/// - runs of horizontal whitespace collapse to one space,
/// - each line is trimmed,
/// - three or more consecutive newlines collapse to a single blank line,
/// - the result is trimmed.
///
/// Zero-width characters are content, not whitespace, and are left alone.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n").replace('\u{00A0}', " ");
    let lines: Vec<String> =
        text.split('\n').map(|line| consts::HORIZONTAL_SPACE.replace_all(line, " ").trim().to_string()).collect();
    consts::BLANK_RUN.replace_all(&lines.join("\n"), "\n\n").trim().to_string()
}
