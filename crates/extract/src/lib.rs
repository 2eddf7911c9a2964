mod consts;
mod decode;
pub mod error;
mod footnotes;
mod header;
mod layers;
mod matn;
pub mod models;
mod numerals;
mod page;
mod segment;
mod text;
mod xref;

use tracing::instrument;

pub use crate::decode::decode;
use crate::error::Result;
pub use crate::footnotes::parse_footnotes;
pub use crate::header::{Header, extract_header};
pub use crate::layers::{Layers, split_layers};
pub use crate::matn::{CleanMatn, clean_matn, is_image_only};
pub use crate::models::{
    ContentType, FootnoteEntry, FootnoteFormat, Footnotes, PageNumber, PageOutcome, PageWarning, ParsedPage, RawLayers,
};
pub use crate::numerals::{digit_value, parse_digits};
pub use crate::page::{PageOptions, PageParser};
pub use crate::segment::{count_page_markers, segment_pages};
pub use crate::xref::{CrossReference, cross_reference};

/// Easy, top-level entrypoint for parsing every page block of one volume
/// document from raw bytes.
///
/// - Decodes strictly (see [`decode`]); a document that can't be decoded is
///   an error, never silently repaired, and
/// - Returns one [`PageOutcome`] per page marker, in document order, so the
///   caller can reconcile markers found against pages emitted.
///
/// ```
/// use kitab_extract::{PageOptions, parse_volume};
/// let html = "<html><div class='PageText'>title</div>\
///             <div class='PageText'><span class='PageNumber'>(ص: ١)</span>text</div></html>";
/// let outcomes = parse_volume(html, PageOptions::default()).unwrap();
/// assert_eq!(outcomes.len(), 2);
/// assert!(outcomes[0].is_metadata());
/// assert_eq!(outcomes[1].clone().into_page().unwrap().matn_text, "text");
/// ```
#[instrument(skip(html), fields(html_size = html.as_ref().len()))]
pub fn parse_volume(html: impl AsRef<[u8]>, options: PageOptions) -> Result<Vec<PageOutcome>> {
    let text = decode(html.as_ref())?;
    let parser = PageParser::new(options);
    Ok(segment_pages(&text).into_iter().map(|block| parser.parse(block)).collect())
}
