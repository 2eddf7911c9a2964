//! The book-level integrity report.

use std::collections::BTreeMap;

use kitab_extract::{FootnoteFormat, PageWarning};
use serde::{Deserialize, Serialize};

use crate::record::{PageRecord, SCHEMA_VERSION};
use crate::resolve::SkipReason;

/// Per-volume statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub number: u32,
    pub file_name: String,
    /// BLAKE3 of this volume's raw bytes.
    pub hash: String,
    pub crc32: u32,
    pub length: u64,
    pub page_markers: u64,
    pub pages_emitted: u64,
}

/// A file passed over during volume resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFileReport {
    pub file_name: String,
    pub reason: SkipReason,
    /// Page markers found in the file's raw bytes; all counted as skipped.
    /// `None` when the file could not be read.
    pub page_markers: Option<u64>,
}

/// Every count needed to audit one book run.
///
/// Every non-fatal anomaly of a run shows up here, so nothing else has to be
/// inspected to know whether a book went through cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReport {
    pub book_id: String,
    pub schema_version: String,
    /// BLAKE3 over the raw bytes of every volume, in processing order.
    pub source_hash: String,
    pub volumes: Vec<VolumeStats>,
    pub page_markers_found: u64,
    pub pages_emitted: u64,
    pub pages_skipped_metadata: u64,
    pub pages_skipped_nonnumeric_volume: u64,
    pub pages_skipped_out_of_range: u64,
    pub footnotes_total: u64,
    /// Character totals count Unicode scalar values.
    pub matn_chars: u64,
    pub footnote_chars: u64,
    pub preamble_chars: u64,
    pub verse_pages: u64,
    pub table_pages: u64,
    pub image_only_pages: u64,
    pub embedded_image_pages: u64,
    pub duplicate_page_numbers: u64,
    pub zwnj_heading_pages: u64,
    pub commentary_pages: u64,
    pub orphan_references: u64,
    pub orphan_footnotes: u64,
    pub footnote_format_counts: BTreeMap<FootnoteFormat, u64>,
    pub skipped_files: Vec<SkippedFileReport>,
}
impl BookReport {
    pub fn new(book_id: impl Into<String>) -> Self {
        Self {
            book_id: book_id.into(),
            schema_version: SCHEMA_VERSION.to_string(),
            source_hash: String::new(),
            volumes: Vec::new(),
            page_markers_found: 0,
            pages_emitted: 0,
            pages_skipped_metadata: 0,
            pages_skipped_nonnumeric_volume: 0,
            pages_skipped_out_of_range: 0,
            footnotes_total: 0,
            matn_chars: 0,
            footnote_chars: 0,
            preamble_chars: 0,
            verse_pages: 0,
            table_pages: 0,
            image_only_pages: 0,
            embedded_image_pages: 0,
            duplicate_page_numbers: 0,
            zwnj_heading_pages: 0,
            commentary_pages: 0,
            orphan_references: 0,
            orphan_footnotes: 0,
            footnote_format_counts: BTreeMap::new(),
            skipped_files: Vec::new(),
        }
    }

    /// Every page marker found is either an emitted page or a counted skip.
    pub fn reconciles(&self) -> bool {
        self.pages_emitted
            + self.pages_skipped_metadata
            + self.pages_skipped_nonnumeric_volume
            + self.pages_skipped_out_of_range
            == self.page_markers_found
    }

    pub(crate) fn record_page(&mut self, record: &PageRecord) {
        self.pages_emitted += 1;
        self.footnotes_total += count(record.footnotes.len());
        self.matn_chars += chars(&record.matn_text);
        self.footnote_chars += record.footnotes.iter().map(|entry| chars(&entry.text)).sum::<u64>();
        self.preamble_chars += chars(&record.footnote_preamble);
        self.verse_pages += u64::from(record.has_verse);
        self.table_pages += u64::from(record.has_tables);
        self.image_only_pages += u64::from(record.is_image_only);
        self.embedded_image_pages += u64::from(record.has_images && !record.is_image_only);
        self.zwnj_heading_pages += u64::from(record.starts_with_zwnj_heading);
        self.commentary_pages += u64::from(record.has_commentary);
        for warning in &record.warnings {
            match warning {
                PageWarning::DuplicatePageNumber => self.duplicate_page_numbers += 1,
                PageWarning::OrphanReference(_) => self.orphan_references += 1,
                PageWarning::OrphanFootnote(_) => self.orphan_footnotes += 1,
                _ => {},
            }
        }
        *self.footnote_format_counts.entry(record.footnote_section_format).or_default() += 1;
    }
}

fn chars(text: &str) -> u64 {
    count(text.chars().count())
}

fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}
