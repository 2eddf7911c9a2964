//! Assembling parsed pages into a book.

use std::collections::BTreeSet;

use exn::ResultExt;
use kitab_config::{Config, PageRange};
use kitab_extract::{PageParser, PageWarning, count_page_markers, decode, segment_pages};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::record::PageRecord;
use crate::report::{BookReport, SkippedFileReport, VolumeStats};
use crate::resolve::{SkippedFile, VolumeFile};

/// Accumulates the records and report of one book.
///
/// Holds the only state shared between pages: the sequence counter and the
/// running report. Both live exactly as long as the book; nothing carries
/// over into the next one. Volumes must be added in ascending order.
pub struct Book {
    book_id: String,
    parser: PageParser,
    page_range: Option<PageRange>,
    next_seq_index: u64,
    last_volume: Option<u32>,
    hasher: blake3::Hasher,
    records: Vec<PageRecord>,
    report: BookReport,
}
impl Book {
    pub fn new(book_id: impl Into<String>, config: &Config) -> Self {
        let book_id = book_id.into();
        Self {
            report: BookReport::new(&book_id),
            book_id,
            parser: PageParser::new(config.page_options()),
            page_range: config.page_range,
            next_seq_index: 0,
            last_volume: None,
            hasher: blake3::Hasher::new(),
            records: Vec::new(),
        }
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    /// The report so far. Its `source_hash` is only set by [`finish`](Self::finish).
    pub fn report(&self) -> &BookReport {
        &self.report
    }

    /// Decodes, segments and parses one volume, appending its pages.
    ///
    /// An undecodable volume fails the whole book; nothing of that volume is
    /// appended. Every page-level anomaly is recorded and processing goes on.
    #[instrument(skip_all, fields(book = %self.book_id, volume = volume.number, size = bytes.len()))]
    pub fn add_volume(&mut self, volume: &VolumeFile, bytes: &[u8]) -> Result<()> {
        if let Some(last) = self.last_volume
            && volume.number <= last
        {
            tracing::warn!(last, "Volume added out of order");
        }
        let text = decode(bytes).or_raise(|| ErrorKind::Decode(volume.path.clone()))?;
        self.hasher.update(bytes);
        self.last_volume = Some(volume.number);

        let mut stats = VolumeStats {
            number: volume.number,
            file_name: volume.file_name(),
            hash: blake3::hash(bytes).to_string(),
            crc32: crc32fast::hash(bytes),
            length: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            page_markers: 0,
            pages_emitted: 0,
        };
        // Page numbers restart with each volume, so duplicates are per volume.
        let mut seen = BTreeSet::new();
        for block in segment_pages(&text) {
            stats.page_markers += 1;
            self.report.page_markers_found += 1;
            let Some(mut page) = self.parser.parse(block).into_page() else {
                self.report.pages_skipped_metadata += 1;
                continue;
            };
            if let Some(range) = self.page_range
                && !range.contains(page.page_number.value)
            {
                self.report.pages_skipped_out_of_range += 1;
                continue;
            }
            if !seen.insert(page.page_number.value) {
                tracing::debug!(page = %page.page_number, "Duplicate page number");
                page.warnings.push(PageWarning::DuplicatePageNumber);
            }
            let record = PageRecord::new(self.book_id.as_str(), self.next_seq_index, volume.number, page);
            self.next_seq_index += 1;
            stats.pages_emitted += 1;
            self.report.record_page(&record);
            self.records.push(record);
        }
        tracing::info!(markers = stats.page_markers, emitted = stats.pages_emitted, "Volume processed");
        self.report.volumes.push(stats);
        Ok(())
    }

    /// Accounts for the page markers of a file that is not a volume.
    ///
    /// The bytes are never decoded: the marker is plain ASCII.
    #[instrument(skip_all, fields(book = %self.book_id, file = %file.file_name()))]
    pub fn skip_file(&mut self, file: &SkippedFile, bytes: &[u8]) {
        let markers = u64::try_from(count_page_markers(bytes)).unwrap_or(u64::MAX);
        if markers > 0 {
            tracing::warn!(markers, reason = %file.reason, "Page markers in skipped file will not be emitted");
        }
        self.report.page_markers_found += markers;
        self.report.pages_skipped_nonnumeric_volume += markers;
        self.report.skipped_files.push(SkippedFileReport {
            file_name: file.file_name(),
            reason: file.reason,
            page_markers: Some(markers),
        });
    }

    /// Records a file that is not a volume and could not be read.
    ///
    /// Its markers are unknown, so no counter moves: only the volumes decide
    /// whether the book reconciles.
    #[instrument(skip_all, fields(book = %self.book_id, file = %file.file_name()))]
    pub fn skip_unreadable_file(&mut self, file: &SkippedFile) {
        tracing::warn!(reason = %file.reason, "Skipped file could not be read; its page markers are not counted");
        self.report.skipped_files.push(SkippedFileReport {
            file_name: file.file_name(),
            reason: file.reason,
            page_markers: None,
        });
    }

    /// Seals the book: computes the provenance hash and checks reconciliation.
    pub fn finish(mut self) -> (Vec<PageRecord>, BookReport) {
        self.report.source_hash = self.hasher.finalize().to_string();
        if !self.report.reconciles() {
            tracing::error!(
                book = %self.book_id,
                markers = self.report.page_markers_found,
                emitted = self.report.pages_emitted,
                "Page accounting does not reconcile"
            );
        }
        (self.records, self.report)
    }
}
