//! Splitting a page body into matn and footnote regions.
//!
//! Three rules look alike in the source: the rule inside the running header
//! (bare `<hr/>`, already gone by the time we get here), the title-page rule
//! (`width` but no `align`) and the footnote separator (`width='95'` with
//! `align='right'`). Only the last one splits layers.
//!
//! Commentary works add a fourth shape: a bare rule followed by an unclosed
//! `<span class='sharh'>` sentinel between the original text and its
//! commentary. Both halves are matn. Any numbered note before the footnote
//! separator stays in the matn, however much it looks like a footnote.

use std::borrow::Cow;

use crate::consts;

/// The two layers of one page body, still as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layers<'a> {
    /// Matn plus any commentary sub-layer.
    pub matn: Cow<'a, str>,
    /// Everything after the first footnote separator. Empty when there is none.
    pub footnotes: &'a str,
    /// `true` when a commentary boundary was found (and removed) in the matn.
    pub has_commentary: bool,
}

/// Splits a page body at the first footnote separator.
///
/// ```
/// use kitab_extract::split_layers;
/// let layers = split_layers("text (1)<hr width='95' align='right'>(1) note");
/// assert_eq!(layers.matn, "text (1)");
/// assert_eq!(layers.footnotes, "(1) note");
/// ```
pub fn split_layers(body: &str) -> Layers<'_> {
    let (matn, footnotes) = match consts::FOOTNOTE_SEPARATOR.find(body) {
        Some(separator) => (&body[..separator.start()], &body[separator.end()..]),
        None => (body, ""),
    };
    let has_commentary = consts::COMMENTARY_BOUNDARY.is_match(matn);
    let matn = match has_commentary {
        true => consts::COMMENTARY_BOUNDARY.replace_all(matn, "\n"),
        false => Cow::Borrowed(matn),
    };
    Layers { matn, footnotes, has_commentary }
}
