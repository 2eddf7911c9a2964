use kitab_extract::{ContentType, FootnoteEntry, FootnoteFormat, PageWarning, ParsedPage, RawLayers};
use serde::{Deserialize, Serialize};

/// Bumped whenever a field of [`PageRecord`] or [`BookReport`](crate::BookReport)
/// changes meaning, so downstream consumers can detect drift.
pub const SCHEMA_VERSION: &str = "1.0";

/// One emitted page.
///
/// `seq_index` is the only unique key: `(volume, page_number_int)` repeats in
/// real data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub schema_version: String,
    pub book_id: String,
    pub seq_index: u64,
    pub volume: u32,
    /// The page number's digits exactly as printed.
    pub page_number_arabic: String,
    pub page_number_int: u32,
    pub matn_text: String,
    pub footnotes: Vec<FootnoteEntry>,
    pub footnote_preamble: String,
    pub footnote_section_format: FootnoteFormat,
    pub footnote_ref_numbers: Vec<u32>,
    pub has_verse: bool,
    pub has_tables: bool,
    pub has_images: bool,
    pub has_commentary: bool,
    pub starts_with_zwnj_heading: bool,
    pub is_image_only: bool,
    pub content_type: ContentType,
    pub warnings: Vec<PageWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawLayers>,
}
impl PageRecord {
    pub fn new(book_id: impl Into<String>, seq_index: u64, volume: u32, page: ParsedPage) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            book_id: book_id.into(),
            seq_index,
            volume,
            is_image_only: page.is_image_only(),
            page_number_arabic: page.page_number.text,
            page_number_int: page.page_number.value,
            matn_text: page.matn_text,
            footnotes: page.footnotes,
            footnote_preamble: page.footnote_preamble,
            footnote_section_format: page.footnote_section_format,
            footnote_ref_numbers: page.footnote_ref_numbers,
            has_verse: page.has_verse,
            has_tables: page.has_tables,
            has_images: page.has_images,
            has_commentary: page.has_commentary,
            starts_with_zwnj_heading: page.starts_with_zwnj_heading,
            content_type: page.content_type,
            warnings: page.warnings,
            raw: page.raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitab_extract::{PageOptions, PageParser};

    fn parsed(body: &str, options: PageOptions) -> ParsedPage {
        let block = format!("<div class='PageText'><span class='PageNumber'>(ص: ٤٢)</span>{body}</div>");
        PageParser::new(options).parse(&block).into_page().unwrap()
    }

    #[test]
    fn serialized_shape() {
        let page = parsed("نص (1)<hr width='95' align='right'>(1) حاشية<br>(2) أخرى", PageOptions::default());
        let record = PageRecord::new("book-7", 3, 2, page);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["schema_version"], "1.0");
        assert_eq!(json["book_id"], "book-7");
        assert_eq!(json["seq_index"], 3);
        assert_eq!(json["volume"], 2);
        assert_eq!(json["page_number_arabic"], "٤٢");
        assert_eq!(json["page_number_int"], 42);
        assert_eq!(json["footnotes"][1]["number"], 2);
        assert_eq!(json["footnote_section_format"], "numbered_parens");
        assert_eq!(json["content_type"], "text");
        assert_eq!(json["warnings"], serde_json::json!(["orphan_footnote:2"]));
        assert!(json.get("raw").is_none());
    }

    #[test]
    fn raw_layers_are_serialized_when_retained() {
        let options = PageOptions { retain_raw_layers: true, ..Default::default() };
        let record = PageRecord::new("b", 0, 1, parsed("نص", options));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"raw\":{\"matn_html\""));
        let back: PageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
