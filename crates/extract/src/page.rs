//! Parsing a single page block end to end.

use tracing::instrument;

use crate::consts;
use crate::footnotes::parse_footnotes;
use crate::header::extract_header;
use crate::layers::split_layers;
use crate::matn::{clean_matn, is_image_only};
use crate::models::{ContentType, FootnoteFormat, PageOutcome, PageWarning, ParsedPage, RawLayers};
use crate::xref::cross_reference;

/// Options for the page engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Keep each layer's raw markup on the parsed page (debugging only).
    pub retain_raw_layers: bool,
    /// Tolerate invisible formatting characters inside reference parentheses.
    pub lenient_reference_boundaries: bool,
}

/// Parses page blocks into [`ParsedPage`]s.
///
/// Parsing is a pure function of the block and the options: no page depends
/// on another page's content, so blocks may be parsed in any order.
#[derive(Debug, Clone, Default)]
pub struct PageParser {
    options: PageOptions,
}
impl PageParser {
    pub fn new(options: PageOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Header → layers → footnotes → matn → cross-reference.
    ///
    /// ```
    /// use kitab_extract::{PageOutcome, PageParser};
    /// let parser = PageParser::default();
    /// let block = "<div class='PageText'><div class='PageHead'><span class='PageNumber'>(ص: ٥)</span><hr/></div>\
    ///              النص (1) .<hr width='95' align='right'><div class='footnote'>(1) حاشية</div></div>";
    /// let page = parser.parse(block).into_page().unwrap();
    /// assert_eq!(page.page_number.value, 5);
    /// assert_eq!(page.matn_text, "النص .");
    /// assert_eq!(page.footnote_ref_numbers, vec![1]);
    ///
    /// assert_eq!(parser.parse("<div class='PageText'>عنوان الكتاب</div>"), PageOutcome::Metadata);
    /// ```
    #[instrument(level = "trace", skip_all, fields(size = block.len()))]
    pub fn parse(&self, block: &str) -> PageOutcome {
        let Some(header) = extract_header(block) else {
            return PageOutcome::Metadata;
        };
        let layers = split_layers(&header.body);
        let raw = self.options.retain_raw_layers.then(|| RawLayers {
            matn_html: layers.matn.to_string(),
            footnote_html: layers.footnotes.to_string(),
        });
        let mut warnings = Vec::new();
        if layers.has_commentary {
            warnings.push(PageWarning::CommentaryLayer);
        }

        if is_image_only(&header.body) {
            tracing::debug!(page = %header.page_number, "image-only page");
            warnings.push(PageWarning::ImageOnly);
            return PageOutcome::Page(Box::new(ParsedPage {
                page_number: header.page_number,
                matn_text: String::new(),
                footnotes: Vec::new(),
                footnote_preamble: String::new(),
                footnote_section_format: FootnoteFormat::None,
                footnote_ref_numbers: Vec::new(),
                has_verse: false,
                has_tables: false,
                has_images: true,
                has_commentary: layers.has_commentary,
                starts_with_zwnj_heading: false,
                content_type: ContentType::ImageOnly,
                warnings,
                raw,
            }));
        }

        let footnotes = parse_footnotes(layers.footnotes);
        let known = footnotes.known_numbers();
        let matn = clean_matn(&layers.matn, &known, self.options.lenient_reference_boundaries);
        let check = cross_reference(&matn.reference_numbers, &known);

        let has_images = matn.has_images || consts::IMAGE_TAG.is_match(layers.footnotes);
        if has_images {
            warnings.push(PageWarning::EmbeddedImage);
        }
        if footnotes.format.is_unparsed() {
            warnings.push(PageWarning::UnparsedFootnoteSection);
        } else if !footnotes.preamble.is_empty() {
            warnings.push(PageWarning::FootnotePreamble);
        }
        warnings.extend(check.warnings());
        if !warnings.is_empty() {
            tracing::debug!(page = %header.page_number, ?warnings, "page anomalies");
        }

        PageOutcome::Page(Box::new(ParsedPage {
            page_number: header.page_number,
            matn_text: matn.text,
            footnotes: footnotes.entries,
            footnote_preamble: footnotes.preamble,
            footnote_section_format: footnotes.format,
            footnote_ref_numbers: matn.reference_numbers,
            has_verse: matn.has_verse,
            has_tables: matn.has_tables,
            has_images,
            has_commentary: layers.has_commentary,
            starts_with_zwnj_heading: matn.starts_with_zwnj_heading,
            content_type: ContentType::Text,
            warnings,
            raw,
        }))
    }
}
impl From<PageOptions> for PageParser {
    fn from(options: PageOptions) -> Self {
        Self::new(options)
    }
}
