//! Page segmentation by marker start offsets.
//!
//! A page block runs from one page-wrapper marker to the next (or to the end
//! of the document). The wrapper is never matched as an open/close pair: the
//! footnote container nested inside a page closes with the same `</div>` as
//! the page itself, so pairing delimiters truncates pages early.

use tracing::instrument;

use crate::consts;

/// Splits a decoded volume document into ordered raw page blocks.
///
/// Anything before the first marker (document head, styles) is not a page and
/// is not returned. Every marker produces exactly one block, so
/// `segment_pages(text).len() == count_page_markers(text.as_bytes())`.
///
/// ```
/// use kitab_extract::segment_pages;
/// let html = "<html><div class='PageText'>one<div class='footnote'>x</div></div><div class='PageText'>two</div>";
/// let pages = segment_pages(html);
/// assert_eq!(pages.len(), 2);
/// assert!(pages[0].contains("footnote"));
/// assert!(pages[1].contains("two"));
/// ```
#[instrument(level = "debug", skip(text), fields(size = text.len()))]
pub fn segment_pages(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = consts::PAGE_MARKER.find_iter(text).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

/// Counts page-wrapper markers in raw, undecoded bytes.
///
/// Used to account for pages in documents that are never decoded (skipped
/// volume files). The marker is pure ASCII, so no decoding is necessary.
pub fn count_page_markers(bytes: &[u8]) -> usize {
    consts::PAGE_MARKER_BYTES.find_iter(bytes).count()
}
