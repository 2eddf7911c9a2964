mod aggregate;
pub mod error;
mod output;
mod record;
mod report;
mod resolve;

use std::path::Path;

use exn::ResultExt;
use kitab_config::Config;
use tracing::instrument;

pub use crate::aggregate::Book;
use crate::error::{ErrorKind, Result};
pub use crate::output::{write_records, write_report};
pub use crate::record::{PageRecord, SCHEMA_VERSION};
pub use crate::report::{BookReport, SkippedFileReport, VolumeStats};
pub use crate::resolve::{Resolution, SkipReason, SkippedFile, VolumeFile, resolve_volumes};

/// Everything produced for one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookOutput {
    /// Ordered by `seq_index`.
    pub records: Vec<PageRecord>,
    pub report: BookReport,
}

/// Easy, top-level entrypoint for processing a whole book from disk.
///
/// Resolves the volumes under `path`, reads each one as raw bytes, and feeds
/// them through a [`Book`] in ascending volume order. Files that are not
/// volumes are still read, to count their page markers; one that can't be
/// read is reported without counts rather than failing the book. Input is
/// never modified.
#[instrument(skip(path, config), fields(path = %path.as_ref().display()))]
pub fn process_book(book_id: &str, path: impl AsRef<Path>, config: &Config) -> Result<BookOutput> {
    let resolution = resolve_volumes(path.as_ref())?;
    let mut book = Book::new(book_id, config);
    for volume in &resolution.volumes {
        let bytes = std::fs::read(&volume.path).or_raise(|| ErrorKind::Unreadable(volume.path.clone()))?;
        book.add_volume(volume, &bytes)?;
    }
    for file in &resolution.skipped {
        match std::fs::read(&file.path) {
            Ok(bytes) => book.skip_file(file, &bytes),
            Err(error) => {
                tracing::warn!(file = %file.path.display(), %error, "Could not read skipped file");
                book.skip_unreadable_file(file);
            },
        }
    }
    let (records, report) = book.finish();
    Ok(BookOutput { records, report })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use kitab_config::PageRange;

    use super::*;

    const VOLUME_ONE: &str = concat!(
        "<html><head><meta charset='utf-8'></head><body>",
        "<div class='PageText'><span class='title'>كتاب الاختبار</span></div>",
        "<div class='PageText'><div class='PageHead'><span class='PageNumber'>(ص: ١)</span><hr/></div>",
        "قال المصنف (1) في أول كتابه<hr width='95' align='right'><div class='footnote'>(1) هو الإمام</div></div>",
        "<div class='PageText'><div class='PageHead'><span class='PageNumber'>(ص: ٢)</span><hr/></div>",
        "<img src='map.png'></div>",
        "</body></html>"
    );
    const VOLUME_TWO: &str = concat!(
        "<div class='PageText'><div class='PageHead'><span class='PageNumber'>(ص: ١)</span><hr/></div>",
        "تتمة الكلام</div>"
    );

    fn book_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1.htm"), VOLUME_ONE).unwrap();
        fs::write(dir.path().join("2.htm"), VOLUME_TWO).unwrap();
        fs::write(dir.path().join("cover.htm"), "<div class='PageText'>غلاف</div>").unwrap();
        dir
    }

    #[test]
    fn processes_a_directory_of_volumes() {
        let dir = book_dir();
        let output = process_book("test-book", dir.path(), &Config::default()).unwrap();

        let summary: Vec<(u64, u32, &str)> =
            output.records.iter().map(|r| (r.seq_index, r.volume, r.page_number_arabic.as_str())).collect();
        assert_eq!(summary, vec![(0, 1, "١"), (1, 1, "٢"), (2, 2, "١")]);
        assert_eq!(output.records[0].matn_text, "قال المصنف في أول كتابه");
        assert_eq!(output.records[0].footnote_ref_numbers, vec![1]);
        assert!(output.records[1].is_image_only);
        assert!(output.records.iter().all(|r| r.book_id == "test-book"));

        let report = &output.report;
        assert_eq!(report.page_markers_found, 5);
        assert_eq!(report.pages_emitted, 3);
        assert_eq!(report.pages_skipped_metadata, 1);
        assert_eq!(report.pages_skipped_nonnumeric_volume, 1);
        assert!(report.reconciles());
        assert_eq!(report.skipped_files.len(), 1);
        assert_eq!(report.skipped_files[0].file_name, "cover.htm");
        assert_eq!(report.volumes.iter().map(|v| v.file_name.as_str()).collect::<Vec<_>>(), vec!["1.htm", "2.htm"]);
    }

    #[test]
    fn processes_a_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whole-book.html");
        fs::write(&path, VOLUME_ONE).unwrap();
        let output = process_book("single", &path, &Config::default()).unwrap();
        assert_eq!(output.records.len(), 2);
        assert!(output.records.iter().all(|r| r.volume == 1));
        assert!(output.report.reconciles());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let dir = book_dir();
        let config = Config { page_range: Some(PageRange { start: 1, end: 1 }), ..Default::default() };
        let first = process_book("b", dir.path(), &config).unwrap();
        let second = process_book("b", dir.path(), &config).unwrap();
        assert_eq!(first, second);

        let mut a = Vec::new();
        let mut b = Vec::new();
        write_records(&first.records, &mut a).unwrap();
        write_records(&second.records, &mut b).unwrap();
        assert_eq!(a, b);
        assert_eq!(first.report.pages_skipped_out_of_range, 1);
        assert!(first.report.reconciles());
    }

    #[test]
    fn undecodable_volume_aborts_the_book() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1.htm"), b"<div class='PageText'>\xC3\x28</div>").unwrap();
        let error = process_book("b", dir.path(), &Config::default()).unwrap_err();
        assert!(matches!(&*error, ErrorKind::Decode(_)));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_skipped_file_does_not_abort_the_book() {
        let dir = book_dir();
        let _listener = std::os::unix::net::UnixListener::bind(dir.path().join("notes.sock")).unwrap();
        let output = process_book("b", dir.path(), &Config::default()).unwrap();
        assert_eq!(output.records.len(), 3);
        let skipped: Vec<(&str, Option<u64>)> =
            output.report.skipped_files.iter().map(|s| (s.file_name.as_str(), s.page_markers)).collect();
        assert_eq!(skipped, vec![("cover.htm", Some(1)), ("notes.sock", None)]);
        assert!(output.report.reconciles());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_volume_link_aborts_the_book() {
        let dir = book_dir();
        std::os::unix::fs::symlink(dir.path().join("gone.htm"), dir.path().join("3.htm")).unwrap();
        let error = process_book("b", dir.path(), &Config::default()).unwrap_err();
        assert_eq!(*error, ErrorKind::Unreadable(dir.path().join("3.htm")));
    }

    #[test]
    fn input_is_not_modified() {
        let dir = book_dir();
        process_book("b", dir.path(), &Config::default()).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("1.htm")).unwrap(), VOLUME_ONE);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }
}
