use std::fmt::{Display, Formatter, Result as FmtResult};

use super::{FootnoteEntry, FootnoteFormat, PageWarning};

/// A printed page number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageNumber {
    /// The digit run exactly as it appears in the source
    pub text: String,
    /// Its integer value
    pub value: u32,
}
impl Display for PageNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.text)
    }
}

/// What kind of content a page carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ContentType {
    #[default]
    Text,
    /// The page is a single embedded image (a scanned table, a diagram).
    ImageOnly,
}
impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::ImageOnly => "image_only",
        }
    }
}
impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// The raw markup of both layers, kept only for debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawLayers {
    pub matn_html: String,
    pub footnote_html: String,
}

/// Everything that can be derived from a single page block in isolation.
///
/// Book-level fields (sequence index, volume, duplicate detection) are added
/// when the page is assembled into a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    pub page_number: PageNumber,
    pub matn_text: String,
    pub footnotes: Vec<FootnoteEntry>,
    pub footnote_preamble: String,
    pub footnote_section_format: FootnoteFormat,
    /// Reference numbers actually stripped from the matn, ascending and unique
    pub footnote_ref_numbers: Vec<u32>,
    pub has_verse: bool,
    pub has_tables: bool,
    pub has_images: bool,
    pub has_commentary: bool,
    pub starts_with_zwnj_heading: bool,
    pub content_type: ContentType,
    pub warnings: Vec<PageWarning>,
    pub raw: Option<RawLayers>,
}
impl ParsedPage {
    pub fn is_image_only(&self) -> bool {
        self.content_type == ContentType::ImageOnly
    }
}

/// The result of parsing one page block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// A title or metadata block without a page number. Nothing is emitted,
    /// but the block still has to be counted.
    Metadata,
    Page(Box<ParsedPage>),
}
impl PageOutcome {
    pub fn is_metadata(&self) -> bool {
        matches!(self, Self::Metadata)
    }

    pub fn into_page(self) -> Option<ParsedPage> {
        match self {
            Self::Metadata => None,
            Self::Page(page) => Some(*page),
        }
    }
}
