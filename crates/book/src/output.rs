//! Writing records and reports.

use std::io::Write;

use exn::ResultExt;

use crate::error::{ErrorKind, Result};
use crate::record::PageRecord;
use crate::report::BookReport;

/// Writes records as JSON Lines, one record per line, in the given order.
pub fn write_records<'a>(records: impl IntoIterator<Item = &'a PageRecord>, mut writer: impl Write) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record).or_raise(|| ErrorKind::Output)?;
        writer.write_all(b"\n").or_raise(|| ErrorKind::Output)?;
    }
    writer.flush().or_raise(|| ErrorKind::Output)
}

/// Writes the report as pretty-printed JSON.
pub fn write_report(report: &BookReport, mut writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report).or_raise(|| ErrorKind::Output)?;
    writer.write_all(b"\n").or_raise(|| ErrorKind::Output)?;
    writer.flush().or_raise(|| ErrorKind::Output)
}

#[cfg(test)]
mod tests {
    use kitab_config::Config;

    use super::*;
    use crate::Book;
    use crate::resolve::VolumeFile;

    fn processed() -> (Vec<PageRecord>, BookReport) {
        let html = "<div class='PageText'><span class='PageNumber'>(ص: ١)</span>أ</div>\
                    <div class='PageText'><span class='PageNumber'>(ص: ٢)</span>ب</div>";
        let mut book = Book::new("b", &Config::default());
        book.add_volume(&VolumeFile { number: 1, path: "1.htm".into() }, html.as_bytes()).unwrap();
        book.finish()
    }

    #[test]
    fn one_record_per_line() {
        let (records, _) = processed();
        let mut buffer = Vec::new();
        write_records(&records, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(text.ends_with('\n'));
        let first: PageRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, records[0]);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["seq_index"], 1);
        assert_eq!(second["matn_text"], "ب");
    }

    #[test]
    fn report_round_trips() {
        let (_, report) = processed();
        let mut buffer = Vec::new();
        write_report(&report, &mut buffer).unwrap();
        let back: BookReport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(back, report);
    }
}
