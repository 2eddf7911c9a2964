//! Matn cleaning.
//!
//! Turns the matn layer's markup into plain text and collects the structural
//! signals on the way. Order matters:
//!
//! 1. tables are rendered in place (they'd be flattened by stripping),
//! 2. verse is detected on the markup, before stripping,
//! 3. decorative wrappers are unwrapped and line breaks become newlines,
//! 4. all other markup is stripped and entities decoded,
//! 5. references that name a footnote on this page are removed,
//! 6. whitespace is normalised and the heading signal read.

mod table;
mod verse;

use std::collections::BTreeSet;

use regex::Captures;

use crate::consts;
use crate::numerals::parse_digits;
use crate::text::{
    decode_entities, line_breaks_to_newlines, normalize_whitespace, plain_text, strip_tags, unwrap_decorative,
    visible_len,
};

/// Two zero-width non-joiners open a section heading.
const ZWNJ_HEADING: &str = "\u{200C}\u{200C}";
/// Pages with fewer visible characters than this (and an image) are image-only.
const IMAGE_ONLY_MAX_TEXT: usize = 3;

/// The cleaned matn layer of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanMatn {
    pub text: String,
    /// Stripped reference numbers, ascending and unique.
    pub reference_numbers: Vec<u32>,
    pub has_verse: bool,
    pub has_tables: bool,
    pub has_images: bool,
    pub starts_with_zwnj_heading: bool,
}

/// Cleans matn markup.
///
/// A parenthesised number is only removed when it is in `known_footnotes`;
/// exercise numbers and citations that happen to be parenthesised stay put.
/// With `lenient_references`, invisible formatting characters between the
/// parentheses and the digits don't prevent a match.
///
/// ```
/// use std::collections::BTreeSet;
/// use kitab_extract::clean_matn;
/// let known = BTreeSet::from([1]);
/// let matn = clean_matn("قال (1) وفي المسألة (3) أقوال", &known, false);
/// assert_eq!(matn.text, "قال وفي المسألة (3) أقوال");
/// assert_eq!(matn.reference_numbers, vec![1]);
/// ```
pub fn clean_matn(markup: &str, known_footnotes: &BTreeSet<u32>, lenient_references: bool) -> CleanMatn {
    let (markup, has_tables) = table::render_tables(markup);
    let has_verse = verse::has_verse(&markup);
    let has_images = consts::IMAGE_TAG.is_match(&markup);

    let text = unwrap_decorative(&markup);
    let text = line_breaks_to_newlines(&text);
    let text = strip_tags(&text);
    let text = decode_entities(&text);

    let mut stripped = BTreeSet::new();
    let reference = match lenient_references {
        true => &*consts::REFERENCE_LENIENT,
        false => &*consts::REFERENCE,
    };
    let text = reference.replace_all(&text, |caps: &Captures| match parse_digits(&caps[1]) {
        Some(number) if known_footnotes.contains(&number) => {
            stripped.insert(number);
            String::new()
        },
        _ => caps[0].to_string(),
    });

    let text = normalize_whitespace(&text);
    CleanMatn {
        starts_with_zwnj_heading: text.starts_with(ZWNJ_HEADING),
        text,
        reference_numbers: stripped.into_iter().collect(),
        has_verse,
        has_tables,
        has_images,
    }
}

/// Returns `true` when a page body is nothing but an embedded image.
///
/// The whole body (both layers, header already removed) is checked: an image
/// with real footnotes below it is a textual page.
pub fn is_image_only(body: &str) -> bool {
    consts::IMAGE_TAG.is_match(body) && visible_len(&plain_text(body)) < IMAGE_ONLY_MAX_TEXT
}
